use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::model::compensation::Compensation;
use crate::model::employee::EmployeeId;
use crate::repo::{CompensationRepository, EmployeeRepository, RepoResult};

pub struct CompensationService<C, E> {
    compensations: C,
    employees: E,
}

impl<C: CompensationRepository, E: EmployeeRepository> CompensationService<C, E> {
    pub fn new(compensations: C, employees: E) -> Self {
        Self {
            compensations,
            employees,
        }
    }

    /// Persists a compensation under a fresh id.
    ///
    /// When the embedded employee id resolves, the stored employee replaces
    /// whatever was submitted; otherwise the submitted employee is kept as is.
    /// A missing effective date becomes the current time.
    #[instrument(name = "compensation.create", skip_all)]
    pub async fn create(&self, mut compensation: Compensation) -> RepoResult<Compensation> {
        let employee_id = compensation.employee.id.clone().filter(|id| !id.is_empty());
        if let Some(employee_id) = employee_id {
            match self.employees.get_by_id(&employee_id).await? {
                Some(stored) => compensation.employee = stored,
                None => debug!(%employee_id, "employee not stored; keeping submitted record"),
            }
        }
        compensation.effective_date.get_or_insert_with(Utc::now);
        compensation.id = None;

        let created = self.compensations.add(compensation).await?;
        self.compensations.save().await?;
        info!(
            compensation_id = ?created.id,
            employee_id = ?created.employee.id,
            "compensation created"
        );
        Ok(created)
    }

    /// Empty ids short-circuit to `None` without scanning the store.
    #[instrument(name = "compensation.get", skip(self))]
    pub async fn get_by_employee_id(&self, id: &EmployeeId) -> RepoResult<Option<Compensation>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.compensations.get_by_employee_id(id).await
    }
}
