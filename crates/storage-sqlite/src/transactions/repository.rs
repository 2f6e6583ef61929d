use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use budgetpace_core::transactions::{
    NewTransaction, Transaction, TransactionKind, TransactionRepositoryTrait,
    TransactionSearchFilters, TransactionSearchResponse, TransactionUpdate,
};
use budgetpace_core::Result;

use super::model::{TransactionChangesetDB, TransactionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::utils::{format_date, sum_stored_decimals};

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TransactionRepository { pool, writer }
    }

    fn to_domain(rows: Vec<TransactionDB>) -> Result<Vec<Transaction>> {
        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn sum_by_kind(
        &self,
        kind: TransactionKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        // Amounts are decimal text; summing in SQL would go through REAL.
        let amounts = transactions::table
            .filter(transactions::kind.eq(kind.as_db_str()))
            .filter(transactions::date.ge(format_date(start_date)))
            .filter(transactions::date.le(format_date(end_date)))
            .select(transactions::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(sum_stored_decimals(&amounts, "amount")?)
    }

    fn list_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::date.ge(format_date(start_date)))
            .filter(transactions::date.le(format_date(end_date)))
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::to_domain(rows)
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Transaction::try_from(row)?)
    }

    fn search_transactions(
        &self,
        filters: &TransactionSearchFilters,
        limit: i64,
        offset: i64,
    ) -> Result<TransactionSearchResponse> {
        let mut conn = get_connection(&self.pool)?;

        let create_base_query = || {
            let mut query = transactions::table.into_boxed();

            if let Some(kind) = filters.kind {
                query = query.filter(transactions::kind.eq(kind.as_db_str()));
            }
            if let Some(ref category) = filters.category {
                query = query.filter(transactions::category.eq(category.clone()));
            }
            if let Some(priority) = filters.priority {
                query = query.filter(transactions::priority.eq(priority.as_db_str()));
            }
            if let Some(date_from) = filters.date_from {
                query = query.filter(transactions::date.ge(format_date(date_from)));
            }
            if let Some(date_to) = filters.date_to {
                query = query.filter(transactions::date.le(format_date(date_to)));
            }
            if let Some(ref search) = filters.search {
                let trimmed = search.trim();
                if !trimmed.is_empty() {
                    let pattern = format!("%{}%", trimmed);
                    query = query.filter(
                        transactions::description
                            .like(pattern.clone())
                            .or(transactions::category.like(pattern.clone()))
                            .or(transactions::notes.like(pattern)),
                    );
                }
            }
            query
        };

        let total = create_base_query()
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = create_base_query()
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .select(TransactionDB::as_select())
            .limit(limit)
            .offset(offset)
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        let items = Self::to_domain(rows)?;
        Ok(TransactionSearchResponse {
            has_more: offset + (items.len() as i64) < total,
            items,
            total,
            limit,
            offset,
        })
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = TransactionDB::from_new(
                    Uuid::new_v4().to_string(),
                    new_transaction,
                    Utc::now().naive_utc(),
                );

                let result_db = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(result_db)?)
            })
            .await
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let changes = TransactionChangesetDB::from_update(update, Utc::now().naive_utc());
                let result_db = diesel::update(transactions::table.find(id_owned))
                    .set(&changes)
                    .returning(TransactionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(result_db)?)
            })
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        let id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let deleted = diesel::delete(transactions::table.find(id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(StorageError::QueryFailed(diesel::result::Error::NotFound).into());
                }
                Ok(())
            })
            .await
    }
}
