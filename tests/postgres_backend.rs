//! Runs only when `TEST_DATABASE_URL` points at a Postgres database.

use anyhow::Result;
use directory_tests::postgres_pool;
use products_hr::{
    Compensation, CompensationService, Employee, EmployeeService, SeaCompensationRepository,
    SeaEmployeeRepository,
};

#[tokio::test]
async fn hierarchy_and_compensation_on_postgres() -> Result<()> {
    let Some(pool) = postgres_pool().await? else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };
    let employees = EmployeeService::new(SeaEmployeeRepository::new(pool.clone()));

    let ringo = employees
        .create(
            Employee::new("Ringo", "Starr", "Developer V", "Engineering").with_direct_reports(vec![
                Employee::new("Pete", "Best", "Developer II", "Engineering"),
                Employee::new("George", "Harrison", "Developer III", "Engineering"),
            ]),
        )
        .await?;
    let ringo_id = ringo.id.clone().expect("id assigned");

    let structure = employees.get_reporting_structure(&ringo_id).await?.unwrap();
    assert_eq!(structure.number_of_reports(), 2);

    let compensations = CompensationService::new(
        SeaCompensationRepository::new(pool.clone()),
        SeaEmployeeRepository::new(pool),
    );
    let created = compensations
        .create(Compensation::new(Employee::stub(ringo_id.clone()), 98_000.0))
        .await?;
    let fetched = compensations.get_by_employee_id(&ringo_id).await?.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.employee, ringo);

    employees.replace(Some(ringo), None).await?;
    assert_eq!(employees.get_by_id(&ringo_id).await?, None);
    Ok(())
}
