//! SQLite storage implementation for per-month budget settings.

mod model;
mod repository;

pub use model::BudgetSettingsDB;
pub use repository::BudgetSettingsRepository;
