use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use budgetpace_core::reserves::{NewReserve, Reserve, ReserveRepositoryTrait, ReserveUpdate};
use budgetpace_core::utils::decimal_utils::checked_add;
use budgetpace_core::{Error, Result};

use super::model::{ReserveChangesetDB, ReserveDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reserves;
use crate::utils::{parse_stored_decimal, sum_stored_decimals};

pub struct ReserveRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ReserveRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ReserveRepository { pool, writer }
    }
}

#[async_trait]
impl ReserveRepositoryTrait for ReserveRepository {
    fn get_total_current_amount(&self) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let balances = reserves::table
            .select(reserves::current_amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(sum_stored_decimals(&balances, "current_amount")?)
    }

    fn get_reserve(&self, reserve_id: &str) -> Result<Reserve> {
        let mut conn = get_connection(&self.pool)?;
        let row = reserves::table
            .find(reserve_id)
            .select(ReserveDB::as_select())
            .first::<ReserveDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Reserve::try_from(row)?)
    }

    fn list_reserves(&self) -> Result<Vec<Reserve>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reserves::table
            .order((reserves::created_at.desc(), reserves::id.asc()))
            .select(ReserveDB::as_select())
            .load::<ReserveDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Reserve::try_from(row).map_err(Into::into))
            .collect()
    }

    async fn create_reserve(&self, new_reserve: NewReserve) -> Result<Reserve> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reserve> {
                let row = ReserveDB::from_new(
                    Uuid::new_v4().to_string(),
                    new_reserve,
                    Utc::now().naive_utc(),
                );
                let result_db = diesel::insert_into(reserves::table)
                    .values(&row)
                    .returning(ReserveDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Reserve::try_from(result_db)?)
            })
            .await
    }

    async fn update_reserve(&self, reserve_id: &str, update: ReserveUpdate) -> Result<Reserve> {
        let id_owned = reserve_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reserve> {
                let changes = ReserveChangesetDB::from_update(update, Utc::now().naive_utc());
                let result_db = diesel::update(reserves::table.find(id_owned))
                    .set(&changes)
                    .returning(ReserveDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Reserve::try_from(result_db)?)
            })
            .await
    }

    async fn delete_reserve(&self, reserve_id: &str) -> Result<()> {
        let id_owned = reserve_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let deleted = diesel::delete(reserves::table.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(StorageError::QueryFailed(diesel::result::Error::NotFound).into());
                }
                Ok(())
            })
            .await
    }

    async fn adjust_current_amount(&self, reserve_id: &str, delta: Decimal) -> Result<Reserve> {
        let id_owned = reserve_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Reserve> {
                // Read and write happen in the writer's immediate transaction.
                let stored = reserves::table
                    .find(id_owned.as_str())
                    .select(reserves::current_amount)
                    .first::<String>(conn)
                    .map_err(StorageError::from)?;
                let balance = checked_add(parse_stored_decimal(&stored, "current_amount")?, delta)?;
                if balance < Decimal::ZERO {
                    return Err(Error::invalid_argument(
                        "insufficient funds in reserve for this withdrawal",
                    ));
                }

                let result_db = diesel::update(reserves::table.find(id_owned.as_str()))
                    .set(&ReserveChangesetDB::balance(balance, Utc::now().naive_utc()))
                    .returning(ReserveDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Reserve::try_from(result_db)?)
            })
            .await
    }
}
