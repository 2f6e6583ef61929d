//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetpace_core::transactions::{
    NewTransaction, Priority, Transaction, TransactionKind, TransactionUpdate,
};

use crate::errors::StorageError;
use crate::utils::{format_date, parse_stored_date, parse_stored_decimal};

/// Database model for transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub priority: String,
    pub date: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset for partial updates. `None` leaves the column untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesetDB {
    pub kind: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TransactionDB {
    pub fn from_new(id: String, domain: NewTransaction, now: NaiveDateTime) -> Self {
        Self {
            id,
            kind: domain.kind.as_db_str().to_string(),
            category: domain.category.trim().to_string(),
            amount: domain.amount.to_string(),
            description: domain.description.trim().to_string(),
            priority: domain.priority.as_db_str().to_string(),
            date: format_date(domain.date),
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TransactionChangesetDB {
    pub fn from_update(update: TransactionUpdate, now: NaiveDateTime) -> Self {
        Self {
            kind: update.kind.map(|k| k.as_db_str().to_string()),
            category: update.category.map(|c| c.trim().to_string()),
            amount: update.amount.map(|a| a.to_string()),
            description: update.description.map(|d| d.trim().to_string()),
            priority: update.priority.map(|p| p.as_db_str().to_string()),
            date: update.date.map(format_date),
            notes: update.notes,
            updated_at: Some(now),
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let kind = TransactionKind::from_db_str(&db.kind)
            .ok_or_else(|| StorageError::CorruptValue(format!("unknown kind '{}'", db.kind)))?;
        let priority = Priority::from_db_str(&db.priority).ok_or_else(|| {
            StorageError::CorruptValue(format!("unknown priority '{}'", db.priority))
        })?;
        let date = parse_stored_date(&db.date)?;

        Ok(Transaction {
            amount: parse_stored_decimal(&db.amount, "amount")?,
            id: db.id,
            kind,
            category: db.category,
            description: db.description,
            priority,
            date,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_transaction_is_stored_as_text() {
        let db = TransactionDB::from_new(
            "tx-1".to_string(),
            NewTransaction {
                kind: TransactionKind::Income,
                category: " Salary ".to_string(),
                amount: dec!(50000.50),
                description: "June pay".to_string(),
                priority: Priority::High,
                date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
                notes: None,
            },
            now(),
        );

        assert_eq!(db.kind, "income");
        assert_eq!(db.category, "Salary");
        assert_eq!(db.amount, "50000.50");
        assert_eq!(db.date, "2025-06-05");

        let tx = Transaction::try_from(db).unwrap();
        assert_eq!(tx.amount, dec!(50000.50));
        assert_eq!(tx.priority, Priority::High);
    }

    #[test]
    fn test_corrupt_row_is_rejected() {
        let mut db = TransactionDB::from_new(
            "tx-2".to_string(),
            NewTransaction {
                kind: TransactionKind::Expense,
                category: "Food".to_string(),
                amount: dec!(10),
                description: "Lunch".to_string(),
                priority: Priority::Low,
                date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
                notes: None,
            },
            now(),
        );
        db.amount = "ten".to_string();
        assert!(matches!(
            Transaction::try_from(db),
            Err(StorageError::CorruptValue(_))
        ));
    }
}
