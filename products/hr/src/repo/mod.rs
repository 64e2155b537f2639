//! Persistence contracts for employees and compensations.
//!
//! Repositories are unit-of-work handles: `add` and `remove` stage changes
//! and `save` applies everything staged so far, in order. Reads always see
//! saved state only. A handle is meant to live for one request.

pub mod memory;
pub mod sea;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::compensation::Compensation;
use crate::model::employee::{Employee, EmployeeId};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("{entity} `{id}` already exists")]
    DuplicateId { entity: &'static str, id: String },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepoError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Stages an insert. A fresh id is assigned when `employee.id` is `None`;
    /// id-less direct reports are staged as new employees as well.
    async fn add(&self, employee: Employee) -> RepoResult<Employee>;

    /// Saved employee with its direct reports resolved.
    async fn get_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>>;

    /// Stages removal of the employee row and its outgoing report edges.
    /// Edges from other managers that point at this id are left in place.
    async fn remove(&self, employee: &Employee) -> RepoResult<()>;

    async fn save(&self) -> RepoResult<()>;
}

#[async_trait]
pub trait CompensationRepository: Send + Sync {
    /// Stages an insert under a fresh id when `compensation.id` is `None`.
    async fn add(&self, compensation: Compensation) -> RepoResult<Compensation>;

    /// First saved compensation whose embedded employee has `id`.
    async fn get_by_employee_id(&self, id: &EmployeeId) -> RepoResult<Option<Compensation>>;

    async fn remove(&self, compensation: &Compensation) -> RepoResult<()>;

    async fn save(&self) -> RepoResult<()>;
}
