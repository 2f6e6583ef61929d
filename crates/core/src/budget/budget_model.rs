//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a month's spending plan. Computed on every request, never stored.
///
/// `total_reserves` is the reserve balance at query time, not a monthly
/// flow, so it is subtracted in full from whichever month is requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCalculation {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_reserves: Decimal,
    /// `total_income - total_expenses - total_reserves`; may be negative.
    pub remaining_budget: Decimal,
    /// `remaining_budget / days_left_in_month`, or 0 when no day is left.
    pub daily_spending_limit: Decimal,
    pub days_left_in_month: u32,
    pub overspend_amount: Decimal,
    pub manual_daily_adjustment: Decimal,
    /// `max(0, daily_spending_limit + manual_daily_adjustment)`
    pub adjusted_daily_limit: Decimal,
}

/// The "today" view: the monthly snapshot combined with the automatic pace
/// correction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBudget {
    pub month: u32,
    pub year: i32,
    pub basic_daily_limit: Decimal,
    pub adjusted_daily_limit: Decimal,
    pub automatic_adjustment: Decimal,
    pub final_daily_limit: Decimal,
    pub days_left_in_month: u32,
    pub remaining_budget: Decimal,
    pub overspend_amount: Decimal,
    pub is_current_month: bool,
}

/// Stored manual adjustment; at most one row per (month, year).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    pub id: String,
    pub month: u32,
    pub year: i32,
    pub manual_daily_adjustment: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
