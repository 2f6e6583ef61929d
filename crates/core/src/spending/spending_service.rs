use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::spending_model::{
    BreakdownBucket, CategoryExpense, CategoryTrendPoint, IncomeExpenseComparison,
    MonthlySummary, PriorityExpense, SpendingSummary, TrendPoint,
};
use super::spending_traits::SpendingServiceTrait;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::transactions::{Transaction, TransactionKind, TransactionRepositoryTrait};
use crate::utils::decimal_utils::{checked_add, checked_div, checked_mul, checked_sub, checked_sum};
use crate::utils::time_utils::{
    earliest_date, format_period, latest_date, month_bounds, month_name, trailing_months,
};

pub struct SpendingService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

/// Expense total and count for one grouping key.
struct ExpenseGroup<K> {
    key: K,
    amount: Decimal,
    count: u64,
}

impl SpendingService {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        SpendingService {
            transaction_repository,
        }
    }

    fn resolve_interval(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<(NaiveDate, NaiveDate)> {
        let start = start_date.unwrap_or_else(earliest_date);
        let end = end_date.unwrap_or_else(latest_date);
        if start > end {
            return Err(Error::invalid_argument(
                "startDate must not be after endDate",
            ));
        }
        Ok((start, end))
    }

    fn month_totals(&self, month: u32, year: i32) -> Result<(Decimal, Decimal)> {
        let (start, end) = month_bounds(month, year)?;
        let income = self
            .transaction_repository
            .sum_by_kind(TransactionKind::Income, start, end)?;
        let expenses = self
            .transaction_repository
            .sum_by_kind(TransactionKind::Expense, start, end)?;
        Ok((income, expenses))
    }

    /// Groups expenses by `key_fn`, largest amount first. Returns the groups
    /// and the overall expense total.
    fn group_expenses<K, F>(
        transactions: &[Transaction],
        key_fn: F,
    ) -> Result<(Vec<ExpenseGroup<K>>, Decimal)>
    where
        K: Eq + Hash + Clone + Ord,
        F: Fn(&Transaction) -> K,
    {
        let mut groups: HashMap<K, ExpenseGroup<K>> = HashMap::new();
        let mut total = Decimal::ZERO;
        for tx in transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
        {
            let key = key_fn(tx);
            let group = groups.entry(key.clone()).or_insert_with(|| ExpenseGroup {
                key,
                amount: Decimal::ZERO,
                count: 0,
            });
            group.amount = checked_add(group.amount, tx.amount)?;
            group.count += 1;
            total = checked_add(total, tx.amount)?;
        }
        let mut groups: Vec<ExpenseGroup<K>> = groups.into_values().collect();
        groups.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.key.cmp(&b.key)));
        Ok((groups, total))
    }

    fn share_of(amount: Decimal, total: Decimal) -> Result<Decimal> {
        if total.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let share = checked_mul(checked_div(amount, total)?, dec!(100))?;
        Ok(share.round_dp(DISPLAY_DECIMAL_PRECISION))
    }
}

impl SpendingServiceTrait for SpendingService {
    fn get_spending_summary(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<SpendingSummary> {
        if start_date > end_date {
            return Err(Error::invalid_argument(
                "startDate must not be after endDate",
            ));
        }
        let transactions = self
            .transaction_repository
            .list_by_date_range(start_date, end_date)?;

        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        let mut category_breakdown: HashMap<String, BreakdownBucket> = HashMap::new();
        let mut priority_breakdown = HashMap::new();

        for tx in &transactions {
            let category = category_breakdown.entry(tx.category.clone()).or_default();
            let priority: &mut BreakdownBucket = priority_breakdown.entry(tx.priority).or_default();
            match tx.kind {
                TransactionKind::Income => {
                    total_income = checked_add(total_income, tx.amount)?;
                    category.income = checked_add(category.income, tx.amount)?;
                    priority.income = checked_add(priority.income, tx.amount)?;
                }
                TransactionKind::Expense => {
                    total_expenses = checked_add(total_expenses, tx.amount)?;
                    category.expense = checked_add(category.expense, tx.amount)?;
                    priority.expense = checked_add(priority.expense, tx.amount)?;
                }
            }
            category.count += 1;
            priority.count += 1;
        }

        Ok(SpendingSummary {
            start_date,
            end_date,
            total_income,
            total_expenses,
            net_amount: checked_sub(total_income, total_expenses)?,
            transaction_count: transactions.len() as u64,
            category_breakdown,
            priority_breakdown,
        })
    }

    fn get_spending_trends(&self, months_back: u32, today: NaiveDate) -> Result<Vec<TrendPoint>> {
        let mut points = Vec::with_capacity(months_back as usize);
        for (month, year) in trailing_months(today, months_back) {
            let (total_income, total_expenses) = self.month_totals(month, year)?;
            points.push(TrendPoint {
                month,
                year,
                month_name: month_name(month),
                total_income,
                total_expenses,
                net_amount: checked_sub(total_income, total_expenses)?,
            });
        }
        debug!("Built {} spending trend points", points.len());
        Ok(points)
    }

    fn get_expenses_by_category(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CategoryExpense>> {
        let (start, end) = Self::resolve_interval(start_date, end_date)?;
        let transactions = self.transaction_repository.list_by_date_range(start, end)?;
        let (groups, total) = Self::group_expenses(&transactions, |t| t.category.clone())?;
        groups
            .into_iter()
            .map(|g| {
                Ok(CategoryExpense {
                    percentage: Self::share_of(g.amount, total)?,
                    category: g.key,
                    amount: g.amount,
                    count: g.count,
                })
            })
            .collect()
    }

    fn get_expenses_by_priority(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriorityExpense>> {
        let (start, end) = Self::resolve_interval(start_date, end_date)?;
        let transactions = self.transaction_repository.list_by_date_range(start, end)?;
        let (groups, total) = Self::group_expenses(&transactions, |t| t.priority)?;
        groups
            .into_iter()
            .map(|g| {
                Ok(PriorityExpense {
                    percentage: Self::share_of(g.amount, total)?,
                    priority: g.key,
                    amount: g.amount,
                    count: g.count,
                })
            })
            .collect()
    }

    fn get_income_vs_expense(
        &self,
        months_back: u32,
        today: NaiveDate,
    ) -> Result<Vec<IncomeExpenseComparison>> {
        let mut comparisons: Vec<IncomeExpenseComparison> =
            Vec::with_capacity(months_back as usize);
        let mut previous_difference: Option<Decimal> = None;
        for (month, year) in trailing_months(today, months_back) {
            let (income, expenses) = self.month_totals(month, year)?;
            let difference = checked_sub(income, expenses)?;
            let percentage_change = match previous_difference.filter(|prev| !prev.is_zero()) {
                Some(prev) => {
                    let change = checked_div(checked_sub(difference, prev)?, prev.abs())?;
                    Some(checked_mul(change, dec!(100))?.round_dp(DISPLAY_DECIMAL_PRECISION))
                }
                None => None,
            };
            comparisons.push(IncomeExpenseComparison {
                period: format_period(month, year),
                income,
                expenses,
                difference,
                percentage_change,
            });
            previous_difference = Some(difference);
        }
        Ok(comparisons)
    }

    fn get_category_trends(
        &self,
        category: &str,
        months_back: u32,
        today: NaiveDate,
    ) -> Result<Vec<CategoryTrendPoint>> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::invalid_argument("category must not be empty"));
        }
        let mut points = Vec::with_capacity(months_back as usize);
        for (month, year) in trailing_months(today, months_back) {
            let (start, end) = month_bounds(month, year)?;
            let mut income = Decimal::ZERO;
            let mut expenses = Decimal::ZERO;
            for tx in self
                .transaction_repository
                .list_by_date_range(start, end)?
                .iter()
                .filter(|t| t.category == category)
            {
                match tx.kind {
                    TransactionKind::Income => income = checked_add(income, tx.amount)?,
                    TransactionKind::Expense => expenses = checked_add(expenses, tx.amount)?,
                }
            }
            points.push(CategoryTrendPoint {
                period: format_period(month, year),
                income,
                expenses,
                net: checked_sub(income, expenses)?,
            });
        }
        Ok(points)
    }

    fn get_monthly_summary(&self, today: NaiveDate) -> Result<MonthlySummary> {
        let (start, end) = month_bounds(today.month(), today.year())?;
        let transactions = self.transaction_repository.list_by_date_range(start, end)?;

        let total_income = checked_sum(
            transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Income)
                .map(|t| t.amount),
        )?;
        let (groups, total_expenses) =
            Self::group_expenses(&transactions, |t| t.category.clone())?;

        Ok(MonthlySummary {
            month: today.month(),
            year: today.year(),
            total_income,
            total_expenses,
            net_amount: checked_sub(total_income, total_expenses)?,
            transaction_count: transactions.len() as u64,
            top_expense_category: groups.into_iter().next().map(|g| g.key),
        })
    }
}
