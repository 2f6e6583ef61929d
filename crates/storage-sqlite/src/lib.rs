//! SQLite storage implementation for Budgetpace.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `budgetpace-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serializes every write
//! - Repository implementations for transactions, reserves and budget settings
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budget;
pub mod reserves;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use budget::BudgetSettingsRepository;
pub use reserves::ReserveRepository;
pub use transactions::TransactionRepository;

// Re-export from budgetpace-core for convenience
pub use budgetpace_core::errors::{DatabaseError, Error, Result};
