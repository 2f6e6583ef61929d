use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use budgetpace_core::budget::{BudgetSettings, BudgetSettingsRepositoryTrait};
use budgetpace_core::{Error, Result};

use super::model::BudgetSettingsDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budget_settings;

pub struct BudgetSettingsRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetSettingsRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetSettingsRepository { pool, writer }
    }
}

fn month_column(month: u32) -> Result<i32> {
    i32::try_from(month).map_err(|_| Error::invalid_argument(format!("invalid month {}", month)))
}

#[async_trait]
impl BudgetSettingsRepositoryTrait for BudgetSettingsRepository {
    fn get_settings(&self, month: u32, year: i32) -> Result<Option<BudgetSettings>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budget_settings::table
            .filter(budget_settings::month.eq(month_column(month)?))
            .filter(budget_settings::year.eq(year))
            .select(BudgetSettingsDB::as_select())
            .first::<BudgetSettingsDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(row.map(BudgetSettings::try_from).transpose()?)
    }

    async fn upsert_manual_adjustment(
        &self,
        month: u32,
        year: i32,
        adjustment: Decimal,
    ) -> Result<BudgetSettings> {
        let month = month_column(month)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetSettings> {
                let now = Utc::now().naive_utc();
                let row = BudgetSettingsDB {
                    id: Uuid::new_v4().to_string(),
                    month,
                    year,
                    manual_daily_adjustment: adjustment.to_string(),
                    created_at: now,
                    updated_at: now,
                };

                let result_db = diesel::insert_into(budget_settings::table)
                    .values(&row)
                    .on_conflict((budget_settings::month, budget_settings::year))
                    .do_update()
                    .set((
                        budget_settings::manual_daily_adjustment
                            .eq(row.manual_daily_adjustment.clone()),
                        budget_settings::updated_at.eq(now),
                    ))
                    .returning(BudgetSettingsDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(BudgetSettings::try_from(result_db)?)
            })
            .await
    }
}
