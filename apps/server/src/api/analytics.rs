use std::sync::Arc;

use crate::{
    api::shared::{months_back, today, ApiQuery, MAX_COMPARISON_MONTHS, MAX_TREND_MONTHS},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use budgetpace_core::{
    constants::{DEFAULT_COMPARISON_MONTHS, DEFAULT_TREND_MONTHS},
    spending::{
        CategoryExpense, CategoryTrendPoint, IncomeExpenseComparison, MonthlySummary,
        PriorityExpense, TrendPoint,
    },
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OptionalDateRangeQuery {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl OptionalDateRangeQuery {
    fn checked(self) -> ApiResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ApiError::BadRequest(
                    "startDate must not be after endDate".to_string(),
                ));
            }
        }
        Ok((self.start_date, self.end_date))
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthsQuery {
    /// Number of trailing months, including the current one
    months: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/analytics/expenses",
    params(OptionalDateRangeQuery),
    responses((status = 200, description = "Expenses grouped by category"))
)]
pub async fn get_expenses_by_category(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<OptionalDateRangeQuery>,
) -> ApiResult<Json<Vec<CategoryExpense>>> {
    let (start, end) = query.checked()?;
    let expenses = state.spending_service.get_expenses_by_category(start, end)?;
    Ok(Json(expenses))
}

#[utoipa::path(
    get,
    path = "/api/analytics/priority",
    params(OptionalDateRangeQuery),
    responses((status = 200, description = "Expenses grouped by priority"))
)]
pub async fn get_expenses_by_priority(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<OptionalDateRangeQuery>,
) -> ApiResult<Json<Vec<PriorityExpense>>> {
    let (start, end) = query.checked()?;
    let expenses = state.spending_service.get_expenses_by_priority(start, end)?;
    Ok(Json(expenses))
}

#[utoipa::path(
    get,
    path = "/api/analytics/trends",
    params(MonthsQuery),
    responses((status = 200, description = "Monthly totals, oldest first"), (status = 400, description = "months outside 1-60"))
)]
pub async fn get_spending_trends(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MonthsQuery>,
) -> ApiResult<Json<Vec<TrendPoint>>> {
    let months = months_back(query.months, DEFAULT_TREND_MONTHS, MAX_TREND_MONTHS)?;
    let trends = state.spending_service.get_spending_trends(months, today())?;
    Ok(Json(trends))
}

#[utoipa::path(
    get,
    path = "/api/analytics/comparison",
    params(MonthsQuery),
    responses((status = 200, description = "Income against expenses per month"), (status = 400, description = "months outside 1-24"))
)]
pub async fn get_income_vs_expense(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MonthsQuery>,
) -> ApiResult<Json<Vec<IncomeExpenseComparison>>> {
    let months = months_back(query.months, DEFAULT_COMPARISON_MONTHS, MAX_COMPARISON_MONTHS)?;
    let comparison = state
        .spending_service
        .get_income_vs_expense(months, today())?;
    Ok(Json(comparison))
}

#[utoipa::path(
    get,
    path = "/api/analytics/category-trends/{category}",
    params(("category" = String, Path, description = "Category name"), MonthsQuery),
    responses((status = 200, description = "Monthly totals for one category"), (status = 400, description = "months outside 1-24"))
)]
pub async fn get_category_trends(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    ApiQuery(query): ApiQuery<MonthsQuery>,
) -> ApiResult<Json<Vec<CategoryTrendPoint>>> {
    let months = months_back(query.months, DEFAULT_COMPARISON_MONTHS, MAX_COMPARISON_MONTHS)?;
    let trends = state
        .spending_service
        .get_category_trends(&category, months, today())?;
    Ok(Json(trends))
}

#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    responses((status = 200, description = "Current month totals"))
)]
pub async fn get_monthly_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthlySummary>> {
    let summary = state.spending_service.get_monthly_summary(today())?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics/expenses", get(get_expenses_by_category))
        .route("/analytics/priority", get(get_expenses_by_priority))
        .route("/analytics/trends", get(get_spending_trends))
        .route("/analytics/comparison", get(get_income_vs_expense))
        .route("/analytics/category-trends/{category}", get(get_category_trends))
        .route("/analytics/summary", get(get_monthly_summary))
}
