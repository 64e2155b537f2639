//! Demo hierarchy loaded by `seed` and `SEED_ON_START`.

use tracing::{debug, info};

use crate::model::employee::Employee;
use crate::repo::{EmployeeRepository, RepoResult};

const DEMO_EMPLOYEES: &str = include_str!("../fixtures/employees.json");

pub fn demo_employees() -> serde_json::Result<Vec<Employee>> {
    serde_json::from_str(DEMO_EMPLOYEES)
}

/// Inserts the demo employees that are not stored yet and returns how many
/// were added. Running it twice is harmless.
pub async fn seed_demo_employees<R: EmployeeRepository>(repo: &R) -> RepoResult<usize> {
    let mut inserted = 0;
    for employee in demo_employees()? {
        if let Some(id) = &employee.id {
            if repo.get_by_id(id).await?.is_some() {
                debug!(%id, "demo employee already present");
                continue;
            }
        }
        repo.add(employee).await?;
        inserted += 1;
    }
    repo.save().await?;
    info!(inserted, "demo employees seeded");
    Ok(inserted)
}
