//! sea-orm entities for the employee directory tables.

pub mod compensation;
pub mod direct_report;
pub mod employee;

pub mod prelude {
    pub use super::compensation::Entity as Compensation;
    pub use super::direct_report::Entity as DirectReport;
    pub use super::employee::Entity as Employee;
}
