use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::budget::budget_model::{BudgetCalculation, BudgetSettings, DailyBudget};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for the manual adjustment store.
#[async_trait]
pub trait BudgetSettingsRepositoryTrait: Send + Sync {
    fn get_settings(&self, month: u32, year: i32) -> Result<Option<BudgetSettings>>;
    /// Replaces the adjustment for (month, year) or creates the row. Never
    /// produces a second row for the same key.
    async fn upsert_manual_adjustment(
        &self,
        month: u32,
        year: i32,
        adjustment: Decimal,
    ) -> Result<BudgetSettings>;
}

/// Trait for budget engine operations.
///
/// Every operation takes the caller's `today` explicitly; the engine never
/// reads the clock.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn calculate_monthly_budget(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<BudgetCalculation>;
    fn calculate_pace_correction(&self, month: u32, year: i32, today: NaiveDate)
        -> Result<Decimal>;
    fn calculate_daily_budget(&self, month: u32, year: i32, today: NaiveDate)
        -> Result<DailyBudget>;
    fn get_manual_daily_adjustment(&self, month: u32, year: i32) -> Result<Decimal>;
    async fn set_manual_daily_adjustment(
        &self,
        month: u32,
        year: i32,
        adjustment: Decimal,
        today: NaiveDate,
    ) -> Result<BudgetCalculation>;
}
