use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionKind, TransactionSearchFilters,
    TransactionSearchResponse, TransactionUpdate,
};
use async_trait::async_trait;

/// Trait for transaction repository operations.
///
/// `sum_by_kind` and `list_by_date_range` form the ledger query port the
/// budget engine reads from. Date intervals are closed on both ends.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn sum_by_kind(
        &self,
        kind: TransactionKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Decimal>;
    /// Ordered by date desc, then creation desc.
    fn list_by_date_range(&self, start_date: NaiveDate, end_date: NaiveDate)
        -> Result<Vec<Transaction>>;
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;
    fn search_transactions(
        &self,
        filters: &TransactionSearchFilters,
        limit: i64,
        offset: i64,
    ) -> Result<TransactionSearchResponse>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;
    fn search_transactions(
        &self,
        filters: TransactionSearchFilters,
    ) -> Result<TransactionSearchResponse>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;
}
