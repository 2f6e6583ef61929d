//! Spending aggregation models. Display only; nothing here feeds the limit
//! calculators.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::Priority;

/// Per-key accumulator used by the summary breakdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownBucket {
    pub income: Decimal,
    pub expense: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_amount: Decimal,
    pub transaction_count: u64,
    /// Key order is unspecified.
    pub category_breakdown: HashMap<String, BreakdownBucket>,
    pub priority_breakdown: HashMap<Priority, BreakdownBucket>,
}

/// One month of the trailing trend series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category: String,
    pub amount: Decimal,
    /// Share of total expenses, 2 dp.
    pub percentage: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriorityExpense {
    pub priority: Priority,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpenseComparison {
    /// `YYYY-MM`
    pub period: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub difference: Decimal,
    /// Change of `difference` against the previous month, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_change: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrendPoint {
    pub period: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_amount: Decimal,
    pub transaction_count: u64,
    pub top_expense_category: Option<String>,
}
