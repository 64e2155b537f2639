use tracing::{debug, info, instrument};

use crate::model::employee::{Employee, EmployeeId};
use crate::reporting::ReportingStructure;
use crate::repo::{EmployeeRepository, RepoResult};

pub struct EmployeeService<R> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new employee under a store-generated id. Any id supplied by
    /// the caller is discarded.
    #[instrument(name = "employee.create", skip_all)]
    pub async fn create(&self, mut employee: Employee) -> RepoResult<Employee> {
        employee.id = None;
        let created = self.repo.add(employee).await?;
        self.repo.save().await?;
        if let Some(id) = &created.id {
            info!(employee_id = %id, "employee created");
        }
        Ok(created)
    }

    /// Empty ids short-circuit to `None` without touching the store.
    #[instrument(name = "employee.get", skip(self))]
    pub async fn get_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>> {
        if id.is_empty() {
            return Ok(None);
        }
        let found = self.repo.get_by_id(id).await?;
        if found.is_none() {
            debug!("employee not found");
        }
        Ok(found)
    }

    /// Replaces `original` by deleting it and inserting `replacement` under
    /// the original's id.
    ///
    /// The delete and the insert are saved separately; a failure in between
    /// leaves the employee deleted. Without an `original` nothing is stored
    /// and `replacement` comes back untouched. Without a `replacement` the
    /// original is only deleted.
    #[instrument(name = "employee.replace", skip_all)]
    pub async fn replace(
        &self,
        original: Option<Employee>,
        replacement: Option<Employee>,
    ) -> RepoResult<Option<Employee>> {
        let Some(original) = original else {
            return Ok(replacement);
        };

        self.repo.remove(&original).await?;
        self.repo.save().await?;

        let Some(mut replacement) = replacement else {
            info!(employee_id = ?original.id, "employee removed without replacement");
            return Ok(None);
        };
        replacement.id = original.id.clone();
        let replaced = self.repo.add(replacement).await?;
        self.repo.save().await?;
        info!(employee_id = ?replaced.id, "employee replaced");
        Ok(Some(replaced))
    }

    #[instrument(name = "employee.reporting_structure", skip(self))]
    pub async fn get_reporting_structure(
        &self,
        id: &EmployeeId,
    ) -> RepoResult<Option<ReportingStructure>> {
        Ok(self.get_by_id(id).await?.map(ReportingStructure::new))
    }
}
