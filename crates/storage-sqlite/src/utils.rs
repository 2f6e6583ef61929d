//! Utility functions for SQLite storage operations.
//!
//! Money and calendar dates are stored as text. Decimal text keeps amounts
//! exact, and ISO dates compare correctly as plain strings.

use budgetpace_core::utils::decimal_utils::checked_add;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_stored_date(value: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| StorageError::CorruptValue(format!("date '{}': {}", value, e)))
}

/// Parses a stored decimal column. A malformed value is a storage fault and
/// is reported rather than read as zero.
pub fn parse_stored_decimal(value: &str, field_name: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value).map_err(|e| {
        log::error!("Failed to parse stored {} '{}': {}", field_name, value, e);
        StorageError::CorruptValue(format!("{} '{}' is not a decimal", field_name, value))
    })
}

/// Sums decimal text values exactly. A total outside `Decimal`'s range is
/// reported as an invalid argument.
pub fn sum_stored_decimals(values: &[String], field_name: &str) -> Result<Decimal, StorageError> {
    values.iter().try_fold(Decimal::ZERO, |total, value| {
        let amount = parse_stored_decimal(value, field_name)?;
        Ok(checked_add(total, amount)?)
    })
}
