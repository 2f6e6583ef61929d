use std::sync::Arc;

use crate::{
    api::shared::{resolve_period, today, validate_month, validate_year, ApiJson, ApiQuery},
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use budgetpace_core::{
    budget::{BudgetCalculation, DailyBudget},
    spending::SpendingSummary,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// 1-12, defaults to the current month
    month: Option<u32>,
    /// 2000-3000, defaults to the current year
    year: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustRequest {
    month: u32,
    year: i32,
    adjustment: Decimal,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RequiredDateRangeQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/api/budget/monthly",
    params(PeriodQuery),
    responses((status = 200, description = "Budget plan for the month"), (status = 400, description = "Invalid month or year"))
)]
pub async fn get_monthly_budget(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> ApiResult<Json<BudgetCalculation>> {
    let today = today();
    let (month, year) = resolve_period(query.month, query.year, today)?;
    let budget = state
        .budget_service
        .calculate_monthly_budget(month, year, today)?;
    Ok(Json(budget))
}

#[utoipa::path(
    get,
    path = "/api/budget/daily",
    params(PeriodQuery),
    responses((status = 200, description = "Daily limit including pace correction"), (status = 400, description = "Invalid month or year"))
)]
pub async fn get_daily_budget(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> ApiResult<Json<DailyBudget>> {
    let today = today();
    let (month, year) = resolve_period(query.month, query.year, today)?;
    let daily = state
        .budget_service
        .calculate_daily_budget(month, year, today)?;
    Ok(Json(daily))
}

#[utoipa::path(
    post,
    path = "/api/budget/adjust",
    responses((status = 200, description = "Recalculated budget plan"), (status = 400, description = "Invalid month or year"))
)]
pub async fn adjust_daily_budget(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AdjustRequest>,
) -> ApiResult<Json<BudgetCalculation>> {
    let month = validate_month(request.month)?;
    let year = validate_year(request.year)?;
    let budget = state
        .budget_service
        .set_manual_daily_adjustment(month, year, request.adjustment, today())
        .await?;
    Ok(Json(budget))
}

#[utoipa::path(
    get,
    path = "/api/budget/summary",
    params(RequiredDateRangeQuery),
    responses((status = 200, description = "Totals and breakdowns for the interval"), (status = 400, description = "Missing or inverted dates"))
)]
pub async fn get_spending_summary(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<RequiredDateRangeQuery>,
) -> ApiResult<Json<SpendingSummary>> {
    if query.start_date > query.end_date {
        return Err(ApiError::BadRequest(
            "startDate must not be after endDate".to_string(),
        ));
    }
    let summary = state
        .spending_service
        .get_spending_summary(query.start_date, query.end_date)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budget/monthly", get(get_monthly_budget))
        .route("/budget/daily", get(get_daily_budget))
        .route("/budget/adjust", post(adjust_daily_budget))
        .route("/budget/summary", get(get_spending_summary))
}
