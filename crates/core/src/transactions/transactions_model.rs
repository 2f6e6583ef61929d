//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CATEGORY_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_NOTES_LENGTH};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::decimal_utils::validate_amount_range;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// User-assigned importance of a transaction. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Maximum,
    Target,
}

impl Priority {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Maximum => "maximum",
            Priority::Target => "target",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "maximum" => Some(Priority::Maximum),
            "target" => Some(Priority::Target),
            _ => None,
        }
    }
}

/// Domain model representing a ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub priority: Priority,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub priority: Priority,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        validate_category(&self.category)?;
        validate_amount(self.amount)?;
        validate_description(&self.description)?;
        validate_notes(self.notes.as_deref())
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_notes(self.notes.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.date.is_none()
            && self.notes.is_none()
    }
}

/// Filters and pagination for listing transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchFilters {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Free text matched against description, notes and category.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchResponse {
    pub items: Vec<Transaction>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

fn validate_category(category: &str) -> Result<()> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "category".to_string(),
        )));
    }
    if trimmed.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(Error::invalid_argument(format!(
            "category must be at most {} characters",
            MAX_CATEGORY_LENGTH
        )));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_argument("amount must be greater than 0"));
    }
    validate_amount_range("amount", amount)
}

fn validate_description(description: &str) -> Result<()> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "description".to_string(),
        )));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(Error::invalid_argument(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

fn validate_notes(notes: Option<&str>) -> Result<()> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LENGTH => Err(Error::invalid_argument(format!(
            "notes must be at most {} characters",
            MAX_NOTES_LENGTH
        ))),
        _ => Ok(()),
    }
}
