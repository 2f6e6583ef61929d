//! Database models for budget settings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetpace_core::budget::BudgetSettings;

use crate::errors::StorageError;
use crate::utils::parse_stored_decimal;

/// Database model for budget settings
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budget_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetSettingsDB {
    pub id: String,
    pub month: i32,
    pub year: i32,
    pub manual_daily_adjustment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetSettingsDB> for BudgetSettings {
    type Error = StorageError;

    fn try_from(db: BudgetSettingsDB) -> Result<Self, Self::Error> {
        let month = u32::try_from(db.month)
            .map_err(|_| StorageError::CorruptValue(format!("month {}", db.month)))?;
        Ok(BudgetSettings {
            manual_daily_adjustment: parse_stored_decimal(
                &db.manual_daily_adjustment,
                "manual_daily_adjustment",
            )?,
            id: db.id,
            month,
            year: db.year,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
