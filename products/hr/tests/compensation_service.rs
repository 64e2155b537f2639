use chrono::{Duration, TimeZone, Utc};
use products_hr::{
    Compensation, CompensationService, Employee, EmployeeId, EmployeeService, InMemoryCompensationRepository,
    InMemoryEmployeeRepository, InMemoryStore,
};

fn compensations(
    store: &InMemoryStore,
) -> CompensationService<InMemoryCompensationRepository, InMemoryEmployeeRepository> {
    CompensationService::new(store.compensation_repository(), store.employee_repository())
}

async fn john(store: &InMemoryStore) -> Employee {
    EmployeeService::new(store.employee_repository())
        .create(Employee::new("John", "Lennon", "Development Manager", "Engineering"))
        .await
        .unwrap()
}

#[tokio::test]
async fn create_resolves_stub_to_stored_employee() {
    let store = InMemoryStore::new();
    let john = john(&store).await;
    let john_id = john.id.clone().unwrap();
    let effective = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let created = compensations(&store)
        .create(Compensation::new(Employee::stub(john_id.clone()), 100_000.0).effective_on(effective))
        .await
        .unwrap();

    assert!(created.id.is_some());
    assert_eq!(created.employee, john);
    assert_eq!(created.salary, 100_000.0);
    assert_eq!(created.effective_date, Some(effective));
}

#[tokio::test]
async fn create_keeps_unresolved_employee_as_submitted() {
    let store = InMemoryStore::new();
    let neil = Employee::new("Neil", "Young", "Developer", "Engineering");

    let created = compensations(&store)
        .create(Compensation::new(neil.clone(), 90_000.0))
        .await
        .unwrap();
    assert_eq!(created.employee, neil);

    let ghost = Employee::stub("not-stored");
    let created = compensations(&store)
        .create(Compensation::new(ghost.clone(), 1.0))
        .await
        .unwrap();
    assert_eq!(created.employee, ghost);
}

#[tokio::test]
async fn create_defaults_effective_date_to_now() {
    let store = InMemoryStore::new();
    let before = Utc::now();
    let created = compensations(&store)
        .create(Compensation::new(Employee::stub("anyone"), 50_000.0))
        .await
        .unwrap();
    let effective = created.effective_date.unwrap();

    assert!(effective >= before);
    assert!(effective - before < Duration::seconds(5));
}

#[tokio::test]
async fn create_assigns_fresh_compensation_id() {
    let store = InMemoryStore::new();
    let mut submitted = Compensation::new(Employee::stub("anyone"), 1.0);
    submitted.id = Some("client-id".into());

    let created = compensations(&store).create(submitted).await.unwrap();
    assert_ne!(created.id.as_ref().map(|id| id.as_str()), Some("client-id"));
}

#[tokio::test]
async fn get_by_employee_id_finds_created_compensation() {
    let store = InMemoryStore::new();
    let john = john(&store).await;
    let john_id = john.id.clone().unwrap();
    let service = compensations(&store);
    let created = service
        .create(Compensation::new(Employee::stub(john_id.clone()), 100_000.0))
        .await
        .unwrap();

    let fetched = service.get_by_employee_id(&john_id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_by_employee_id_returns_first_of_several() {
    let store = InMemoryStore::new();
    let service = compensations(&store);
    let first = service
        .create(Compensation::new(Employee::stub("e1"), 10.0))
        .await
        .unwrap();
    service
        .create(Compensation::new(Employee::stub("e1"), 20.0))
        .await
        .unwrap();

    let fetched = service.get_by_employee_id(&EmployeeId::from("e1")).await.unwrap();
    assert_eq!(fetched.map(|c| c.id), Some(first.id));
}

#[tokio::test]
async fn get_by_employee_id_unknown_or_empty_is_not_found() {
    let store = InMemoryStore::new();
    let service = compensations(&store);
    assert_eq!(service.get_by_employee_id(&EmployeeId::from("Invalid_Id")).await.unwrap(), None);

    store.set_unavailable(true);
    assert_eq!(service.get_by_employee_id(&EmployeeId::from("")).await.unwrap(), None);
}
