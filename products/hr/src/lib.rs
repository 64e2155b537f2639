//! HR vertical slice: employee records, their reporting hierarchy and
//! compensation entries.
//!
//! Storage is reached only through the traits in [`repo`]; the services own
//! the read-modify-write contracts and never talk to a database directly.

pub mod graph;
pub mod model;
pub mod reporting;
pub mod repo;
pub mod seed;
pub mod service;

pub use graph::{EmployeeArena, EmployeeRecord};
pub use model::compensation::{Compensation, CompensationId};
pub use model::employee::{Employee, EmployeeId};
pub use reporting::{ReportingStructure, count_reports};
pub use repo::memory::{InMemoryCompensationRepository, InMemoryEmployeeRepository, InMemoryStore};
pub use repo::sea::{SeaCompensationRepository, SeaEmployeeRepository};
pub use repo::{CompensationRepository, EmployeeRepository, RepoError, RepoResult};
pub use seed::seed_demo_employees;
pub use service::compensation::CompensationService;
pub use service::employee::EmployeeService;
