use axum::{
    extract::{FromRequest, FromRequestParts, Query},
    Json,
};
use budgetpace_core::utils::time_utils;
use chrono::{Datelike, Local, NaiveDate};

use crate::error::{ApiError, ApiResult};

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 3000;
pub const MAX_TREND_MONTHS: u32 = 60;
pub const MAX_COMPARISON_MONTHS: u32 = 24;

/// The only place the server reads the wall clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `Query` whose decode failures use the JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Json` request body whose decode failures use the JSON error body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub fn validate_month(month: u32) -> ApiResult<u32> {
    time_utils::validate_month(month)?;
    Ok(month)
}

pub fn validate_year(year: i32) -> ApiResult<i32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ApiError::BadRequest(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(year)
}

/// Fills a missing month or year from `today` and range-checks the result.
pub fn resolve_period(
    month: Option<u32>,
    year: Option<i32>,
    today: NaiveDate,
) -> ApiResult<(u32, i32)> {
    let month = validate_month(month.unwrap_or_else(|| today.month()))?;
    let year = validate_year(year.unwrap_or_else(|| today.year()))?;
    Ok((month, year))
}

/// Absent means `default`; present values must lie in `1..=max`.
pub fn months_back(requested: Option<u32>, default: u32, max: u32) -> ApiResult<u32> {
    match requested {
        None => Ok(default),
        Some(m) if (1..=max).contains(&m) => Ok(m),
        Some(m) => Err(ApiError::BadRequest(format!(
            "months must be between 1 and {}, got {}",
            max, m
        ))),
    }
}
