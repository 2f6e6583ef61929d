use chrono::{Datelike, Month, NaiveDate};

use crate::errors::{Error, Result};

/// Where a requested (month, year) sits relative to the caller's "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthPosition {
    Past,
    Current,
    Future,
}

pub fn validate_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid_argument(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(())
}

/// Returns the first and last calendar day of a month (both inclusive).
///
/// The last day is derived from the first day of the following month, so
/// leap years come out right without a lookup table.
pub fn month_bounds(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    validate_month(month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid_argument(format!("unsupported year {}", year)))?;
    let (next_month, next_year) = if month == 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| Error::invalid_argument(format!("unsupported year {}", year)))?;
    Ok((first, last))
}

pub fn days_in_month(month: u32, year: i32) -> Result<u32> {
    let (_, last) = month_bounds(month, year)?;
    Ok(last.day())
}

pub fn classify_month(month: u32, year: i32, today: NaiveDate) -> MonthPosition {
    let requested = (year, month);
    let current = (today.year(), today.month());
    match requested.cmp(&current) {
        std::cmp::Ordering::Less => MonthPosition::Past,
        std::cmp::Ordering::Equal => MonthPosition::Current,
        std::cmp::Ordering::Greater => MonthPosition::Future,
    }
}

/// Steps `months_back` calendar months backwards from (month, year).
pub fn shift_month(month: u32, year: i32, months_back: u32) -> (u32, i32) {
    let index = i64::from(year) * 12 + i64::from(month) - 1 - i64::from(months_back);
    let shifted_year = index.div_euclid(12) as i32;
    let shifted_month = index.rem_euclid(12) as u32 + 1;
    (shifted_month, shifted_year)
}

/// Trailing window of `count` months ending at `reference`'s month, oldest first.
pub fn trailing_months(reference: NaiveDate, count: u32) -> Vec<(u32, i32)> {
    let mut months: Vec<(u32, i32)> = (0..count)
        .map(|i| shift_month(reference.month(), reference.year(), i))
        .collect();
    months.reverse();
    months
}

/// `YYYY-MM` label used by the analytics series.
pub fn format_period(month: u32, year: i32) -> String {
    format!("{:04}-{:02}", year, month)
}

pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_default()
}

/// Lower bound used when a date interval is left open.
pub fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Upper bound used when a date interval is left open.
pub fn latest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}
