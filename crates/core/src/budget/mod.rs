//! Budget module - monthly budget calculator, daily pace corrector and
//! manual adjustment management.

mod budget_model;
mod budget_service;
mod budget_traits;

pub use budget_model::{BudgetCalculation, BudgetSettings, DailyBudget};
pub use budget_service::BudgetService;
pub use budget_traits::{BudgetServiceTrait, BudgetSettingsRepositoryTrait};
