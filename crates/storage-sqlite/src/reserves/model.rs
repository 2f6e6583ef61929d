//! Database models for reserves.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use budgetpace_core::reserves::{NewReserve, Reserve, ReserveUpdate};

use crate::errors::StorageError;
use crate::utils::parse_stored_decimal;

/// Database model for reserves
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reserves)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReserveDB {
    pub id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub purpose: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::reserves)]
pub struct ReserveChangesetDB {
    pub name: Option<String>,
    pub target_amount: Option<String>,
    pub current_amount: Option<String>,
    pub purpose: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl ReserveDB {
    pub fn from_new(id: String, domain: NewReserve, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: domain.name.trim().to_string(),
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.unwrap_or(Decimal::ZERO).to_string(),
            purpose: domain.purpose,
            created_at: now,
            updated_at: now,
        }
    }
}

impl ReserveChangesetDB {
    pub fn from_update(update: ReserveUpdate, now: NaiveDateTime) -> Self {
        Self {
            name: update.name.map(|n| n.trim().to_string()),
            target_amount: update.target_amount.map(|a| a.to_string()),
            current_amount: update.current_amount.map(|a| a.to_string()),
            purpose: update.purpose,
            updated_at: Some(now),
        }
    }

    pub fn balance(current_amount: Decimal, now: NaiveDateTime) -> Self {
        Self {
            current_amount: Some(current_amount.to_string()),
            updated_at: Some(now),
            ..Default::default()
        }
    }
}

impl TryFrom<ReserveDB> for Reserve {
    type Error = StorageError;

    fn try_from(db: ReserveDB) -> Result<Self, Self::Error> {
        Ok(Reserve {
            target_amount: parse_stored_decimal(&db.target_amount, "target_amount")?,
            current_amount: parse_stored_decimal(&db.current_amount, "current_amount")?,
            id: db.id,
            name: db.name,
            purpose: db.purpose,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
