//! Budgetpace Core - Domain entities, services, and traits.
//!
//! This crate contains the budget calculation engine: the monthly budget
//! calculator, the daily pace corrector, manual adjustment management and the
//! spending aggregator. It is database-agnostic and defines the repository
//! traits that are implemented by the `storage-sqlite` crate.

pub mod budget;
pub mod constants;
pub mod errors;
pub mod reserves;
pub mod spending;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
