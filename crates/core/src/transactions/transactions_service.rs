use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionSearchFilters, TransactionSearchResponse,
    TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::errors::{Error, Result};

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }

    fn resolve_page(filters: &TransactionSearchFilters) -> Result<(i64, i64)> {
        let limit = filters.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = filters.offset.unwrap_or(0);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(Error::invalid_argument(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }
        if offset < 0 {
            return Err(Error::invalid_argument("offset must not be negative"));
        }
        if let (Some(from), Some(to)) = (filters.date_from, filters.date_to) {
            if from > to {
                return Err(Error::invalid_argument(
                    "dateFrom must not be after dateTo",
                ));
            }
        }
        Ok((limit, offset))
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_transaction(transaction_id)
    }

    fn search_transactions(
        &self,
        filters: TransactionSearchFilters,
    ) -> Result<TransactionSearchResponse> {
        let (limit, offset) = Self::resolve_page(&filters)?;
        self.repository.search_transactions(&filters, limit, offset)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        let created = self.repository.create_transaction(new_transaction).await?;
        debug!(
            "Created {} transaction {} of {}",
            created.kind.as_db_str(),
            created.id,
            created.amount
        );
        Ok(created)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        update.validate()?;
        if update.is_empty() {
            return self.repository.get_transaction(transaction_id);
        }
        self.repository
            .update_transaction(transaction_id, update)
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        self.repository.delete_transaction(transaction_id).await?;
        debug!("Deleted transaction {}", transaction_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{DatabaseError, ValidationError};
    use crate::transactions::{Priority, TransactionKind};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    // ============== Mock Repositories ==============

    #[derive(Default)]
    struct MockTransactionRepository {
        transactions: RwLock<Vec<Transaction>>,
        last_page: RwLock<Option<(i64, i64)>>,
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn sum_by_kind(
            &self,
            _: TransactionKind,
            _: NaiveDate,
            _: NaiveDate,
        ) -> Result<Decimal> {
            unimplemented!()
        }

        fn list_by_date_range(&self, _: NaiveDate, _: NaiveDate) -> Result<Vec<Transaction>> {
            unimplemented!()
        }

        fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
            self.transactions
                .read()
                .unwrap()
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(transaction_id.to_string()))
                })
        }

        fn search_transactions(
            &self,
            _: &TransactionSearchFilters,
            limit: i64,
            offset: i64,
        ) -> Result<TransactionSearchResponse> {
            *self.last_page.write().unwrap() = Some((limit, offset));
            let items = self.transactions.read().unwrap().clone();
            Ok(TransactionSearchResponse {
                total: items.len() as i64,
                items,
                limit,
                offset,
                has_more: false,
            })
        }

        async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
            let now = Utc::now().naive_utc();
            let created = Transaction {
                id: format!("tx-{}", self.transactions.read().unwrap().len() + 1),
                kind: new_transaction.kind,
                category: new_transaction.category,
                amount: new_transaction.amount,
                description: new_transaction.description,
                priority: new_transaction.priority,
                date: new_transaction.date,
                notes: new_transaction.notes,
                created_at: now,
                updated_at: now,
            };
            self.transactions.write().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_transaction(
            &self,
            transaction_id: &str,
            update: TransactionUpdate,
        ) -> Result<Transaction> {
            let mut transactions = self.transactions.write().unwrap();
            let existing = transactions
                .iter_mut()
                .find(|t| t.id == transaction_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(transaction_id.to_string()))
                })?;
            if let Some(amount) = update.amount {
                existing.amount = amount;
            }
            if let Some(category) = update.category {
                existing.category = category;
            }
            Ok(existing.clone())
        }

        async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
            let mut transactions = self.transactions.write().unwrap();
            let before = transactions.len();
            transactions.retain(|t| t.id != transaction_id);
            if transactions.len() == before {
                return Err(Error::Database(DatabaseError::NotFound(
                    transaction_id.to_string(),
                )));
            }
            Ok(())
        }
    }

    // ============== Helper Functions ==============

    fn make_service() -> (TransactionService, Arc<MockTransactionRepository>) {
        let repo = Arc::new(MockTransactionRepository::default());
        (TransactionService::new(repo.clone()), repo)
    }

    fn new_expense(amount: Decimal) -> NewTransaction {
        NewTransaction {
            kind: TransactionKind::Expense,
            category: "Transport".to_string(),
            amount,
            description: "Metro card".to_string(),
            priority: Priority::High,
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            notes: Some("monthly pass".to_string()),
        }
    }

    // ============== Tests ==============

    #[tokio::test]
    async fn test_create_transaction_validates_input() {
        let (service, repo) = make_service();

        let result = service.create_transaction(new_expense(dec!(0))).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidArgument(_)))
        ));
        assert!(repo.transactions.read().unwrap().is_empty());

        let created = service
            .create_transaction(new_expense(dec!(2900)))
            .await
            .unwrap();
        assert_eq!(created.amount, dec!(2900));
        assert_eq!(service.get_transaction(&created.id).unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_with_no_fields_returns_stored_record() {
        let (service, _) = make_service();
        let created = service
            .create_transaction(new_expense(dec!(100)))
            .await
            .unwrap();

        let unchanged = service
            .update_transaction(&created.id, TransactionUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, created);

        let updated = service
            .update_transaction(
                &created.id,
                TransactionUpdate {
                    amount: Some(dec!(250)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.amount, dec!(250));
    }

    #[tokio::test]
    async fn test_delete_missing_transaction_is_not_found() {
        let (service, _) = make_service();
        let result = service.delete_transaction("missing").await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[test]
    fn test_search_applies_default_page() {
        let (service, repo) = make_service();
        let page = service
            .search_transactions(TransactionSearchFilters::default())
            .unwrap();
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(page.offset, 0);
        assert_eq!(*repo.last_page.read().unwrap(), Some((DEFAULT_PAGE_LIMIT, 0)));
    }

    #[test]
    fn test_search_rejects_bad_page_and_inverted_dates() {
        let (service, repo) = make_service();
        for filters in [
            TransactionSearchFilters {
                limit: Some(0),
                ..Default::default()
            },
            TransactionSearchFilters {
                offset: Some(-1),
                ..Default::default()
            },
            TransactionSearchFilters {
                date_from: NaiveDate::from_ymd_opt(2025, 5, 2),
                date_to: NaiveDate::from_ymd_opt(2025, 5, 1),
                ..Default::default()
            },
        ] {
            assert!(service.search_transactions(filters).is_err());
        }
        assert!(repo.last_page.read().unwrap().is_none());
    }
}
