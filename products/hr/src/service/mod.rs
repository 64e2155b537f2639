//! Use-case services over the repository contracts.
//!
//! "Not found" is an `Ok(None)`; only store failures surface as errors.

pub mod compensation;
pub mod employee;
