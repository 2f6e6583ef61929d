use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use super::budget_model::{BudgetCalculation, DailyBudget};
use super::budget_traits::{BudgetServiceTrait, BudgetSettingsRepositoryTrait};
use crate::errors::Result;
use crate::reserves::ReserveRepositoryTrait;
use crate::transactions::{TransactionKind, TransactionRepositoryTrait};
use crate::utils::decimal_utils::{checked_add, checked_mul, checked_sub, validate_amount_range};
use crate::utils::time_utils::{classify_month, month_bounds, validate_month, MonthPosition};

/// The budget engine. Holds no state of its own; every figure is re-derived
/// from the ports on each call.
pub struct BudgetService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    reserve_repository: Arc<dyn ReserveRepositoryTrait>,
    settings_repository: Arc<dyn BudgetSettingsRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        reserve_repository: Arc<dyn ReserveRepositoryTrait>,
        settings_repository: Arc<dyn BudgetSettingsRepositoryTrait>,
    ) -> Self {
        BudgetService {
            transaction_repository,
            reserve_repository,
            settings_repository,
        }
    }

    fn days_left_in_month(
        month: u32,
        year: i32,
        month_length: u32,
        today: NaiveDate,
    ) -> u32 {
        match classify_month(month, year, today) {
            // Today still counts as a spendable day.
            MonthPosition::Current => (month_length + 1).saturating_sub(today.day()).max(1),
            MonthPosition::Future => month_length,
            MonthPosition::Past => 0,
        }
    }

    /// Spreads the gap between actual and linearly expected month-to-date
    /// spending over the remaining days. Compares against the unadjusted
    /// daily limit.
    fn pace_correction_for(
        &self,
        budget: &BudgetCalculation,
        today: NaiveDate,
    ) -> Result<Decimal> {
        if classify_month(budget.month, budget.year, today) != MonthPosition::Current {
            return Ok(Decimal::ZERO);
        }
        let (month_start, _) = month_bounds(budget.month, budget.year)?;
        let actual_spending =
            self.transaction_repository
                .sum_by_kind(TransactionKind::Expense, month_start, today)?;
        let expected_spending =
            checked_mul(budget.daily_spending_limit, Decimal::from(today.day()))?;
        let overspend = checked_sub(actual_spending, expected_spending)?;

        if budget.days_left_in_month == 0 || overspend.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let correction = -(overspend / Decimal::from(budget.days_left_in_month));
        debug!(
            "Pace correction for {}-{:02}: spent {} vs expected {} -> {}",
            budget.year, budget.month, actual_spending, expected_spending, correction
        );
        Ok(correction)
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn calculate_monthly_budget(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<BudgetCalculation> {
        let (month_start, month_end) = month_bounds(month, year)?;

        let total_income = self.transaction_repository.sum_by_kind(
            TransactionKind::Income,
            month_start,
            month_end,
        )?;
        let total_expenses = self.transaction_repository.sum_by_kind(
            TransactionKind::Expense,
            month_start,
            month_end,
        )?;
        let total_reserves = self.reserve_repository.get_total_current_amount()?;

        let remaining_budget =
            checked_sub(checked_sub(total_income, total_expenses)?, total_reserves)?;
        let days_left_in_month = Self::days_left_in_month(month, year, month_end.day(), today);
        let daily_spending_limit = if days_left_in_month > 0 {
            remaining_budget / Decimal::from(days_left_in_month)
        } else {
            Decimal::ZERO
        };

        let manual_daily_adjustment = self.get_manual_daily_adjustment(month, year)?;
        let overspend_amount = (-remaining_budget).max(Decimal::ZERO);
        let adjusted_daily_limit =
            checked_add(daily_spending_limit, manual_daily_adjustment)?.max(Decimal::ZERO);

        debug!(
            "Budget {}-{:02}: remaining {} over {} days, daily limit {} (adjusted {})",
            year,
            month,
            remaining_budget,
            days_left_in_month,
            daily_spending_limit,
            adjusted_daily_limit
        );

        Ok(BudgetCalculation {
            month,
            year,
            total_income,
            total_expenses,
            total_reserves,
            remaining_budget,
            daily_spending_limit,
            days_left_in_month,
            overspend_amount,
            manual_daily_adjustment,
            adjusted_daily_limit,
        })
    }

    fn calculate_pace_correction(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<Decimal> {
        validate_month(month)?;
        if classify_month(month, year, today) != MonthPosition::Current {
            return Ok(Decimal::ZERO);
        }
        let budget = self.calculate_monthly_budget(month, year, today)?;
        self.pace_correction_for(&budget, today)
    }

    fn calculate_daily_budget(
        &self,
        month: u32,
        year: i32,
        today: NaiveDate,
    ) -> Result<DailyBudget> {
        let budget = self.calculate_monthly_budget(month, year, today)?;
        let automatic_adjustment = self.pace_correction_for(&budget, today)?;
        let final_daily_limit =
            checked_add(budget.adjusted_daily_limit, automatic_adjustment)?.max(Decimal::ZERO);

        Ok(DailyBudget {
            month,
            year,
            basic_daily_limit: budget.daily_spending_limit,
            adjusted_daily_limit: budget.adjusted_daily_limit,
            automatic_adjustment,
            final_daily_limit,
            days_left_in_month: budget.days_left_in_month,
            remaining_budget: budget.remaining_budget,
            overspend_amount: budget.overspend_amount,
            is_current_month: classify_month(month, year, today) == MonthPosition::Current,
        })
    }

    fn get_manual_daily_adjustment(&self, month: u32, year: i32) -> Result<Decimal> {
        Ok(self
            .settings_repository
            .get_settings(month, year)?
            .map(|s| s.manual_daily_adjustment)
            .unwrap_or(Decimal::ZERO))
    }

    async fn set_manual_daily_adjustment(
        &self,
        month: u32,
        year: i32,
        adjustment: Decimal,
        today: NaiveDate,
    ) -> Result<BudgetCalculation> {
        validate_month(month)?;
        validate_amount_range("adjustment", adjustment)?;
        self.settings_repository
            .upsert_manual_adjustment(month, year, adjustment)
            .await?;
        debug!(
            "Manual daily adjustment for {}-{:02} set to {}",
            year, month, adjustment
        );
        self.calculate_monthly_budget(month, year, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetSettings;
    use crate::errors::{DatabaseError, Error, ValidationError};
    use crate::reserves::{NewReserve, Reserve, ReserveUpdate};
    use crate::transactions::{
        NewTransaction, Transaction, TransactionSearchFilters, TransactionSearchResponse,
        TransactionUpdate,
    };
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::RwLock;

    // ============== Mock Repositories ==============

    #[derive(Default)]
    struct MockLedger {
        entries: RwLock<Vec<(TransactionKind, NaiveDate, Decimal)>>,
        fail: bool,
    }

    impl MockLedger {
        fn with(entries: Vec<(TransactionKind, NaiveDate, Decimal)>) -> Self {
            Self {
                entries: RwLock::new(entries),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                entries: RwLock::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockLedger {
        fn sum_by_kind(
            &self,
            kind: TransactionKind,
            start_date: NaiveDate,
            end_date: NaiveDate,
        ) -> Result<Decimal> {
            if self.fail {
                return Err(Error::Database(DatabaseError::ConnectionFailed(
                    "ledger offline".to_string(),
                )));
            }
            Ok(self
                .entries
                .read()
                .unwrap()
                .iter()
                .filter(|(k, d, _)| *k == kind && *d >= start_date && *d <= end_date)
                .map(|(_, _, amount)| *amount)
                .sum())
        }

        fn list_by_date_range(&self, _: NaiveDate, _: NaiveDate) -> Result<Vec<Transaction>> {
            unimplemented!()
        }
        fn get_transaction(&self, _: &str) -> Result<Transaction> {
            unimplemented!()
        }
        fn search_transactions(
            &self,
            _: &TransactionSearchFilters,
            _: i64,
            _: i64,
        ) -> Result<TransactionSearchResponse> {
            unimplemented!()
        }
        async fn create_transaction(&self, _: NewTransaction) -> Result<Transaction> {
            unimplemented!()
        }
        async fn update_transaction(&self, _: &str, _: TransactionUpdate) -> Result<Transaction> {
            unimplemented!()
        }
        async fn delete_transaction(&self, _: &str) -> Result<()> {
            unimplemented!()
        }
    }

    struct MockReserves {
        total: Decimal,
    }

    #[async_trait]
    impl ReserveRepositoryTrait for MockReserves {
        fn get_total_current_amount(&self) -> Result<Decimal> {
            Ok(self.total)
        }
        fn get_reserve(&self, _: &str) -> Result<Reserve> {
            unimplemented!()
        }
        fn list_reserves(&self) -> Result<Vec<Reserve>> {
            unimplemented!()
        }
        async fn create_reserve(&self, _: NewReserve) -> Result<Reserve> {
            unimplemented!()
        }
        async fn update_reserve(&self, _: &str, _: ReserveUpdate) -> Result<Reserve> {
            unimplemented!()
        }
        async fn delete_reserve(&self, _: &str) -> Result<()> {
            unimplemented!()
        }
        async fn adjust_current_amount(&self, _: &str, _: Decimal) -> Result<Reserve> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct MockSettings {
        rows: RwLock<HashMap<(u32, i32), BudgetSettings>>,
    }

    #[async_trait]
    impl BudgetSettingsRepositoryTrait for MockSettings {
        fn get_settings(&self, month: u32, year: i32) -> Result<Option<BudgetSettings>> {
            Ok(self.rows.read().unwrap().get(&(month, year)).cloned())
        }

        async fn upsert_manual_adjustment(
            &self,
            month: u32,
            year: i32,
            adjustment: Decimal,
        ) -> Result<BudgetSettings> {
            let now = Utc::now().naive_utc();
            let mut rows = self.rows.write().unwrap();
            let row = rows.entry((month, year)).or_insert_with(|| BudgetSettings {
                id: format!("{}-{}", year, month),
                month,
                year,
                manual_daily_adjustment: Decimal::ZERO,
                created_at: now,
                updated_at: now,
            });
            row.manual_daily_adjustment = adjustment;
            row.updated_at = now;
            Ok(row.clone())
        }
    }

    // ============== Helper Functions ==============

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Reference "today" for most tests (2025-06-10, a 30-day month).
    fn today() -> NaiveDate {
        date(2025, 6, 10)
    }

    fn income(d: NaiveDate, amount: Decimal) -> (TransactionKind, NaiveDate, Decimal) {
        (TransactionKind::Income, d, amount)
    }

    fn expense(d: NaiveDate, amount: Decimal) -> (TransactionKind, NaiveDate, Decimal) {
        (TransactionKind::Expense, d, amount)
    }

    fn make_service(
        entries: Vec<(TransactionKind, NaiveDate, Decimal)>,
        reserves: Decimal,
    ) -> (BudgetService, Arc<MockSettings>) {
        let settings = Arc::new(MockSettings::default());
        let service = BudgetService::new(
            Arc::new(MockLedger::with(entries)),
            Arc::new(MockReserves { total: reserves }),
            settings.clone(),
        );
        (service, settings)
    }

    // ============== Monthly Budget Calculator ==============

    #[test]
    fn test_scenario_a_income_expenses_and_reserves() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(50000)),
                expense(date(2025, 6, 5), dec!(15000)),
            ],
            dec!(10000),
        );

        let calc = service.calculate_monthly_budget(6, 2025, today()).unwrap();

        assert_eq!(calc.total_income, dec!(50000));
        assert_eq!(calc.total_expenses, dec!(15000));
        assert_eq!(calc.total_reserves, dec!(10000));
        assert_eq!(calc.remaining_budget, dec!(25000));
        assert_eq!(calc.overspend_amount, Decimal::ZERO);
        assert_eq!(calc.days_left_in_month, 21);
        assert_eq!(calc.daily_spending_limit, dec!(25000) / dec!(21));
        assert_eq!(calc.adjusted_daily_limit, calc.daily_spending_limit);
    }

    #[test]
    fn test_scenario_b_overspent_month_clamps_adjusted_limit() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(30000)),
                expense(date(2025, 6, 3), dec!(40000)),
            ],
            Decimal::ZERO,
        );

        let calc = service.calculate_monthly_budget(6, 2025, today()).unwrap();

        assert_eq!(calc.remaining_budget, dec!(-10000));
        assert_eq!(calc.overspend_amount, dec!(10000));
        assert!(calc.daily_spending_limit < Decimal::ZERO);
        assert_eq!(calc.adjusted_daily_limit, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_scenario_c_manual_adjustment_is_added() {
        let (service, _) = make_service(vec![income(date(2025, 6, 1), dec!(50000))], Decimal::ZERO);

        let calc = service
            .set_manual_daily_adjustment(6, 2025, dec!(500), today())
            .await
            .unwrap();

        assert_eq!(calc.manual_daily_adjustment, dec!(500));
        assert_eq!(calc.adjusted_daily_limit, calc.daily_spending_limit + dec!(500));
    }

    #[test]
    fn test_scenario_d_future_month_still_subtracts_reserves() {
        let (service, _) = make_service(vec![income(date(2025, 6, 1), dec!(1000))], dec!(7500));

        let calc = service.calculate_monthly_budget(8, 2025, today()).unwrap();

        assert_eq!(calc.total_income, Decimal::ZERO);
        assert_eq!(calc.total_expenses, Decimal::ZERO);
        assert_eq!(calc.days_left_in_month, 31);
        assert_eq!(calc.remaining_budget, dec!(-7500));
        assert_eq!(calc.overspend_amount, dec!(7500));
    }

    #[test]
    fn test_future_february_uses_leap_year_length() {
        let (service, _) = make_service(vec![], Decimal::ZERO);
        let leap = service.calculate_monthly_budget(2, 2028, today()).unwrap();
        let common = service.calculate_monthly_budget(2, 2027, today()).unwrap();
        assert_eq!(leap.days_left_in_month, 29);
        assert_eq!(common.days_left_in_month, 28);
    }

    #[test]
    fn test_past_month_has_no_days_and_zero_limit() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 4, 2), dec!(20000)),
                expense(date(2025, 4, 20), dec!(5000)),
            ],
            Decimal::ZERO,
        );

        let calc = service.calculate_monthly_budget(4, 2025, today()).unwrap();

        assert_eq!(calc.remaining_budget, dec!(15000));
        assert_eq!(calc.days_left_in_month, 0);
        assert_eq!(calc.daily_spending_limit, Decimal::ZERO);
        assert_eq!(calc.adjusted_daily_limit, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_past_month_with_positive_adjustment() {
        let (service, _) = make_service(vec![], Decimal::ZERO);
        let calc = service
            .set_manual_daily_adjustment(1, 2025, dec!(300), today())
            .await
            .unwrap();
        assert_eq!(calc.daily_spending_limit, Decimal::ZERO);
        assert_eq!(calc.adjusted_daily_limit, dec!(300));
    }

    #[test]
    fn test_last_day_of_current_month_leaves_one_day() {
        let (service, _) = make_service(vec![income(date(2025, 6, 1), dec!(900))], Decimal::ZERO);

        let calc = service
            .calculate_monthly_budget(6, 2025, date(2025, 6, 30))
            .unwrap();

        assert_eq!(calc.days_left_in_month, 1);
        assert_eq!(calc.daily_spending_limit, dec!(900));
    }

    #[test]
    fn test_first_day_of_current_month_counts_whole_month() {
        let (service, _) = make_service(vec![], Decimal::ZERO);
        let calc = service
            .calculate_monthly_budget(6, 2025, date(2025, 6, 1))
            .unwrap();
        assert_eq!(calc.days_left_in_month, 30);
    }

    #[tokio::test]
    async fn test_negative_manual_adjustment_clamps_to_zero() {
        let (service, _) = make_service(vec![income(date(2025, 6, 1), dec!(2100))], Decimal::ZERO);

        let calc = service
            .set_manual_daily_adjustment(6, 2025, dec!(-250), today())
            .await
            .unwrap();

        assert_eq!(calc.daily_spending_limit, dec!(100));
        assert_eq!(calc.adjusted_daily_limit, Decimal::ZERO);
        assert_eq!(calc.overspend_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_setting_adjustment_twice_keeps_one_row_with_latest_value() {
        let (service, settings) = make_service(vec![], Decimal::ZERO);

        service
            .set_manual_daily_adjustment(6, 2025, dec!(200), today())
            .await
            .unwrap();
        let calc = service
            .set_manual_daily_adjustment(6, 2025, dec!(-50), today())
            .await
            .unwrap();

        assert_eq!(settings.rows.read().unwrap().len(), 1);
        assert_eq!(calc.manual_daily_adjustment, dec!(-50));
        assert_eq!(service.get_manual_daily_adjustment(6, 2025).unwrap(), dec!(-50));
        assert_eq!(service.get_manual_daily_adjustment(7, 2025).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_invalid_month_is_rejected_before_any_query() {
        let service = BudgetService::new(
            Arc::new(MockLedger::failing()),
            Arc::new(MockReserves {
                total: Decimal::ZERO,
            }),
            Arc::new(MockSettings::default()),
        );

        for month in [0, 13] {
            let result = service.calculate_monthly_budget(month, 2025, today());
            assert!(matches!(
                result,
                Err(Error::Validation(ValidationError::InvalidArgument(_)))
            ));
            assert!(service.calculate_pace_correction(month, 2025, today()).is_err());
        }
    }

    #[tokio::test]
    async fn test_oversized_adjustment_is_rejected() {
        let (service, settings) = make_service(vec![], Decimal::ZERO);
        let result = service
            .set_manual_daily_adjustment(6, 2025, Decimal::MAX, today())
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidArgument(_)))
        ));
        assert!(settings.rows.read().unwrap().is_empty());
    }

    #[test]
    fn test_totals_beyond_decimal_range_are_an_error() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), Decimal::MAX),
                expense(date(2025, 6, 2), Decimal::MIN),
            ],
            Decimal::ZERO,
        );

        let result = service.calculate_monthly_budget(6, 2025, today());
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidArgument(_)))
        ));
        assert!(service.calculate_daily_budget(6, 2025, today()).is_err());
    }

    #[test]
    fn test_port_failure_propagates_unchanged() {
        let service = BudgetService::new(
            Arc::new(MockLedger::failing()),
            Arc::new(MockReserves {
                total: Decimal::ZERO,
            }),
            Arc::new(MockSettings::default()),
        );

        let result = service.calculate_monthly_budget(6, 2025, today());
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::ConnectionFailed(_)))
        ));
    }

    // ============== Daily Pace Corrector ==============

    #[test]
    fn test_scenario_e_on_pace_spending_needs_no_correction() {
        // 3100 income over 30 days, today is day 10: 21 days left, limit 100.
        // Spending 1000 over 10 days is exactly on pace.
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(3100)),
                expense(date(2025, 6, 4), dec!(400)),
                expense(date(2025, 6, 9), dec!(600)),
            ],
            Decimal::ZERO,
        );

        let calc = service.calculate_monthly_budget(6, 2025, today()).unwrap();
        assert_eq!(calc.daily_spending_limit, dec!(100));

        let correction = service.calculate_pace_correction(6, 2025, today()).unwrap();
        assert_eq!(correction, Decimal::ZERO);
    }

    #[test]
    fn test_pace_deviation_is_spread_over_remaining_days() {
        // Limit (5200 - 1000) / 21 = 200, expected 2000 by day 10, spent 1000:
        // under pace, so the remaining days loosen by 1000 / 21.
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(5200)),
                expense(date(2025, 6, 2), dec!(1000)),
            ],
            Decimal::ZERO,
        );
        let under = service.calculate_pace_correction(6, 2025, today()).unwrap();
        assert_eq!(under, dec!(1000) / dec!(21));

        // Limit (4200 - 2100) / 21 = 100, expected 1000, spent 2100: tighten.
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(4200)),
                expense(date(2025, 6, 5), dec!(2100)),
            ],
            Decimal::ZERO,
        );
        let calc = service.calculate_monthly_budget(6, 2025, today()).unwrap();
        assert_eq!(calc.daily_spending_limit, dec!(100));
        let over = service.calculate_pace_correction(6, 2025, today()).unwrap();
        assert_eq!(over, -(dec!(1100) / dec!(21)));
        assert!(over < Decimal::ZERO);
    }

    #[test]
    fn test_pace_correction_ignores_spending_after_today() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(4100)),
                expense(date(2025, 6, 8), dec!(1000)),
                expense(date(2025, 6, 25), dec!(1000)),
            ],
            Decimal::ZERO,
        );
        // Whole-month expenses 2000 -> remaining 2100, limit 100, expected 1000.
        // Month-to-date spending is 1000, so exactly on pace.
        let correction = service.calculate_pace_correction(6, 2025, today()).unwrap();
        assert_eq!(correction, Decimal::ZERO);
    }

    #[test]
    fn test_pace_correction_is_zero_outside_current_month() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 5, 1), dec!(1000)),
                expense(date(2025, 5, 2), dec!(900)),
                expense(date(2025, 7, 2), dec!(900)),
            ],
            Decimal::ZERO,
        );
        assert_eq!(
            service.calculate_pace_correction(5, 2025, today()).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            service.calculate_pace_correction(7, 2025, today()).unwrap(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_pace_uses_unadjusted_limit() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(3100)),
                expense(date(2025, 6, 4), dec!(1000)),
            ],
            Decimal::ZERO,
        );
        service
            .set_manual_daily_adjustment(6, 2025, dec!(400), today())
            .await
            .unwrap();

        let correction = service.calculate_pace_correction(6, 2025, today()).unwrap();
        assert_eq!(correction, Decimal::ZERO);
    }

    // ============== Daily view ==============

    #[tokio::test]
    async fn test_daily_budget_combines_manual_and_automatic() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(4200)),
                expense(date(2025, 6, 5), dec!(2100)),
            ],
            Decimal::ZERO,
        );
        service
            .set_manual_daily_adjustment(6, 2025, dec!(50), today())
            .await
            .unwrap();

        let daily = service.calculate_daily_budget(6, 2025, today()).unwrap();

        assert!(daily.is_current_month);
        assert_eq!(daily.basic_daily_limit, dec!(100));
        assert_eq!(daily.adjusted_daily_limit, dec!(150));
        assert_eq!(daily.automatic_adjustment, -(dec!(1100) / dec!(21)));
        assert_eq!(
            daily.final_daily_limit,
            dec!(150) + daily.automatic_adjustment
        );
        assert_eq!(daily.days_left_in_month, 21);
    }

    #[test]
    fn test_daily_budget_final_limit_never_negative() {
        let (service, _) = make_service(
            vec![
                income(date(2025, 6, 1), dec!(3100)),
                expense(date(2025, 6, 2), dec!(3000)),
            ],
            Decimal::ZERO,
        );
        let daily = service.calculate_daily_budget(6, 2025, today()).unwrap();
        assert!(daily.automatic_adjustment < Decimal::ZERO);
        assert_eq!(daily.final_daily_limit, Decimal::ZERO);
    }

    #[test]
    fn test_daily_budget_for_future_month_has_no_correction() {
        let (service, _) = make_service(vec![], dec!(100));
        let daily = service.calculate_daily_budget(9, 2025, today()).unwrap();
        assert!(!daily.is_current_month);
        assert_eq!(daily.automatic_adjustment, Decimal::ZERO);
        assert_eq!(daily.days_left_in_month, 30);
        assert_eq!(daily.final_daily_limit, Decimal::ZERO);
    }
}
