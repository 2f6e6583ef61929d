//! Overflow-checked money arithmetic.
//!
//! `Decimal` operators panic on overflow. Sums and products over stored or
//! user-supplied amounts go through these helpers and fail with a
//! validation error instead.

use rust_decimal::Decimal;

use crate::constants::MAX_AMOUNT;
use crate::errors::{Error, Result};

fn out_of_range(operation: &str) -> Error {
    Error::invalid_argument(format!("amount out of range in {}", operation))
}

pub fn checked_add(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| out_of_range("addition"))
}

pub fn checked_sub(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| out_of_range("subtraction"))
}

pub fn checked_mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range("multiplication"))
}

/// Division by zero is reported the same way as an overflow.
pub fn checked_div(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| out_of_range("division"))
}

pub fn checked_sum<I>(values: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, checked_add)
}

/// Rejects amounts whose magnitude exceeds [`MAX_AMOUNT`].
pub fn validate_amount_range(field: &str, value: Decimal) -> Result<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(Error::invalid_argument(format!(
            "{} must not exceed {} in magnitude",
            field, MAX_AMOUNT
        )));
    }
    Ok(())
}
