//! Spending module - read-only aggregations of the ledger for display.

mod spending_model;
mod spending_service;
mod spending_traits;

pub use spending_model::{
    BreakdownBucket, CategoryExpense, CategoryTrendPoint, IncomeExpenseComparison,
    MonthlySummary, PriorityExpense, SpendingSummary, TrendPoint,
};
pub use spending_service::SpendingService;
pub use spending_traits::SpendingServiceTrait;
