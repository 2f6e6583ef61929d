use chrono::NaiveDate;

use crate::errors::Result;
use crate::spending::spending_model::{
    CategoryExpense, CategoryTrendPoint, IncomeExpenseComparison, MonthlySummary,
    PriorityExpense, SpendingSummary, TrendPoint,
};

/// Read-only aggregations over the ledger.
pub trait SpendingServiceTrait: Send + Sync {
    fn get_spending_summary(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<SpendingSummary>;
    /// Trailing `months_back` months ending at `today`'s month, oldest first.
    fn get_spending_trends(&self, months_back: u32, today: NaiveDate) -> Result<Vec<TrendPoint>>;
    fn get_expenses_by_category(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CategoryExpense>>;
    fn get_expenses_by_priority(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriorityExpense>>;
    fn get_income_vs_expense(
        &self,
        months_back: u32,
        today: NaiveDate,
    ) -> Result<Vec<IncomeExpenseComparison>>;
    fn get_category_trends(
        &self,
        category: &str,
        months_back: u32,
        today: NaiveDate,
    ) -> Result<Vec<CategoryTrendPoint>>;
    fn get_monthly_summary(&self, today: NaiveDate) -> Result<MonthlySummary>;
}
