//! Reserve domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DISPLAY_DECIMAL_PRECISION, MAX_RESERVE_NAME_LENGTH, MAX_RESERVE_PURPOSE_LENGTH,
};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::{checked_sum, validate_amount_range};

/// A named savings goal. Its `current_amount` is money set aside and is
/// subtracted from every month's remaining budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reserve {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub purpose: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Reserve {
    /// `min(100, current / target * 100)`, or 0 when there is no target.
    pub fn completion_percentage(&self) -> Decimal {
        completion_percentage(self.current_amount, self.target_amount)
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.target_amount.saturating_sub(self.current_amount).max(Decimal::ZERO)
    }
}

/// Reserve plus its computed funding progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReserveWithProgress {
    #[serde(flatten)]
    pub reserve: Reserve,
    pub completion_percentage: Decimal,
    pub remaining_amount: Decimal,
}

impl From<Reserve> for ReserveWithProgress {
    fn from(reserve: Reserve) -> Self {
        let completion_percentage = reserve.completion_percentage();
        let remaining_amount = reserve.remaining_amount();
        ReserveWithProgress {
            reserve,
            completion_percentage,
            remaining_amount,
        }
    }
}

/// Input model for creating a new reserve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReserve {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Option<Decimal>,
    pub purpose: Option<String>,
}

impl NewReserve {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_non_negative("targetAmount", self.target_amount)?;
        if let Some(current) = self.current_amount {
            validate_non_negative("currentAmount", current)?;
        }
        validate_purpose(self.purpose.as_deref())
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub purpose: Option<String>,
}

impl ReserveUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(target) = self.target_amount {
            validate_non_negative("targetAmount", target)?;
        }
        if let Some(current) = self.current_amount {
            validate_non_negative("currentAmount", current)?;
        }
        validate_purpose(self.purpose.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_amount.is_none()
            && self.current_amount.is_none()
            && self.purpose.is_none()
    }
}

/// Aggregate funding state across all reserves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTotals {
    pub total_reserves: usize,
    pub total_current_amount: Decimal,
    pub total_target_amount: Decimal,
    pub total_remaining_amount: Decimal,
    pub overall_completion_percentage: Decimal,
    pub fully_funded_reserves: usize,
    pub partially_funded_reserves: usize,
    pub empty_reserves: usize,
}

impl ReserveTotals {
    pub fn from_reserves(reserves: &[Reserve]) -> Result<Self> {
        let total_current_amount = checked_sum(reserves.iter().map(|r| r.current_amount))?;
        let total_target_amount = checked_sum(reserves.iter().map(|r| r.target_amount))?;
        Ok(ReserveTotals {
            total_reserves: reserves.len(),
            total_current_amount,
            total_target_amount,
            total_remaining_amount: total_target_amount
                .saturating_sub(total_current_amount)
                .max(Decimal::ZERO),
            overall_completion_percentage: completion_percentage(
                total_current_amount,
                total_target_amount,
            ),
            fully_funded_reserves: reserves
                .iter()
                .filter(|r| r.current_amount >= r.target_amount)
                .count(),
            partially_funded_reserves: reserves
                .iter()
                .filter(|r| r.current_amount > Decimal::ZERO && r.current_amount < r.target_amount)
                .count(),
            empty_reserves: reserves
                .iter()
                .filter(|r| r.current_amount.is_zero())
                .count(),
        })
    }
}

fn completion_percentage(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    // A ratio too large to represent is far past fully funded.
    current
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map_or(dec!(100), |percentage| percentage.min(dec!(100)))
        .round_dp(DISPLAY_DECIMAL_PRECISION)
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if trimmed.chars().count() > MAX_RESERVE_NAME_LENGTH {
        return Err(Error::invalid_argument(format!(
            "name must be at most {} characters",
            MAX_RESERVE_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::invalid_argument(format!(
            "{} must not be negative",
            field
        )));
    }
    validate_amount_range(field, value)
}

fn validate_purpose(purpose: Option<&str>) -> Result<()> {
    match purpose {
        Some(p) if p.chars().count() > MAX_RESERVE_PURPOSE_LENGTH => {
            Err(Error::invalid_argument(format!(
                "purpose must be at most {} characters",
                MAX_RESERVE_PURPOSE_LENGTH
            )))
        }
        _ => Ok(()),
    }
}
