//! Repositories over the sea-orm entities.
//!
//! Each handle owns a clone of the connection pool and applies its staged
//! changes in one transaction on `save`.

mod compensation;
mod employee;

use std::sync::PoisonError;

use sea_orm::DbErr;

use super::RepoError;

pub use compensation::SeaCompensationRepository;
pub use employee::SeaEmployeeRepository;

fn store_err(err: DbErr) -> RepoError {
    RepoError::backend(err)
}

fn poisoned<T>(_: PoisonError<T>) -> RepoError {
    RepoError::backend("staged change lock poisoned")
}
