//! Transaction service
//!
//! Adds, lists and deletes ledger entries. A transaction must reference an
//! existing category of its own kind and carry a non-negative amount.

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Kind, Money, Transaction, TransactionId};
use crate::storage::{NewTransaction, Storage};

use super::CategoryService;

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub amount: Money,
    /// Category name or ID
    pub category: String,
    pub kind: Kind,
    pub description: Option<String>,
    /// Defaults to the current local time
    pub timestamp: Option<NaiveDateTime>,
}

/// A transaction joined with its category
#[derive(Debug, Clone)]
pub struct TransactionWithCategory {
    pub transaction: Transaction,
    /// `None` when the category no longer exists
    pub category: Option<Category>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TrackerResult<Transaction> {
        Transaction::validate_amount(input.amount)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = CategoryService::new(self.storage)
            .find(&input.category)?
            .ok_or_else(|| TrackerError::category_not_found(input.category.trim()))?;

        if category.kind != input.kind {
            return Err(TrackerError::Validation(format!(
                "Category '{}' is an {} category, not {}",
                category.name, category.kind, input.kind
            )));
        }

        let timestamp = input
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());

        let txn = self.storage.transactions.insert(NewTransaction {
            amount: input.amount,
            category_id: category.id,
            description: input.description.unwrap_or_default().trim().to_string(),
            timestamp,
            kind: input.kind,
        })?;
        self.storage.transactions.save()?;

        info!(
            id = %txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            category = %category.name,
            "added transaction"
        );
        Ok(txn)
    }

    /// List transactions newest first, optionally only the most recent `limit`
    pub fn list(&self, limit: Option<usize>) -> TrackerResult<Vec<TransactionWithCategory>> {
        let mut transactions = self.storage.transactions.get_all()?;
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }

        transactions
            .into_iter()
            .map(|transaction| -> TrackerResult<TransactionWithCategory> {
                let category = self.storage.categories.get(transaction.category_id)?;
                Ok(TransactionWithCategory {
                    transaction,
                    category,
                })
            })
            .collect()
    }

    /// Delete the given transactions, returning how many existed
    ///
    /// Fails with `NotFound` without deleting anything if no ID matches.
    pub fn delete_many(&self, ids: &[TransactionId]) -> TrackerResult<usize> {
        let removed = self.storage.transactions.delete_many(ids)?;
        if removed == 0 {
            let identifier = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(TrackerError::transaction_not_found(identifier));
        }

        self.storage.transactions.save()?;
        info!(removed, requested = ids.len(), "deleted transactions");
        Ok(removed)
    }

    /// Delete every transaction, returning how many were removed
    pub fn delete_all(&self) -> TrackerResult<usize> {
        let removed = self.storage.transactions.clear()?;
        self.storage.transactions.save()?;
        info!(removed, "cleared all transactions");
        Ok(removed)
    }

    /// Count transactions
    pub fn count(&self) -> TrackerResult<usize> {
        self.storage.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::storage::init::initialize_storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(cents: i64, category: &str, kind: Kind, day: u32) -> CreateTransactionInput {
        CreateTransactionInput {
            amount: Money::from_cents(cents),
            category: category.to_string(),
            kind,
            description: None,
            timestamp: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(12, 0, 0),
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut new = input(4250, "food", Kind::Expense, 3);
        new.description = Some(" lunch ".into());
        let txn = service.create(new).unwrap();

        assert_eq!(txn.amount.cents(), 4250);
        assert_eq!(txn.description, "lunch");
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(service.list(None).unwrap()[0].transaction, txn);
    }

    #[test]
    fn test_timestamp_defaults_to_now() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut new = input(100, "Salary", Kind::Income, 1);
        new.timestamp = None;
        let before = Local::now().naive_local();
        let txn = service.create(new).unwrap();
        assert!(txn.timestamp >= before - chrono::Duration::seconds(1));
    }

    #[test]
    fn test_zero_amount_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        assert!(service.create(input(0, "Food", Kind::Expense, 1)).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.create(input(-1, "Food", Kind::Expense, 1)).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("must not be negative"));
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_amount_above_max_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service
            .create(input(Money::MAX.cents(), "Food", Kind::Expense, 1))
            .unwrap();
        let err = service
            .create(input(Money::MAX.cents() + 1, "Food", Kind::Expense, 2))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_max_amounts_aggregate_without_overflow() {
        use crate::reports::Aggregator;

        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let largest = Money::parse("1000000000").unwrap();

        for day in 1..=20 {
            service
                .create(CreateTransactionInput {
                    amount: largest,
                    ..input(0, "Food", Kind::Expense, day)
                })
                .unwrap();
        }

        let totals = Aggregator::new(&storage).category_distribution().unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total_amount.cents(), Money::MAX.cents() * 20);
    }

    #[test]
    fn test_kind_must_match_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.create(input(500, "Salary", Kind::Expense, 1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.create(input(500, "Yachts", Kind::Expense, 1)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(input(100, "Food", Kind::Expense, 1)).unwrap();
        service.create(input(200, "Food", Kind::Expense, 9)).unwrap();
        service.create(input(300, "Housing", Kind::Expense, 5)).unwrap();

        let all = service.list(None).unwrap();
        let amounts: Vec<_> = all.iter().map(|t| t.transaction.amount.cents()).collect();
        assert_eq!(amounts, vec![200, 300, 100]);
        assert_eq!(all[1].category.as_ref().unwrap().name, "Housing");

        assert_eq!(service.list(Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_many() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let a = service.create(input(100, "Food", Kind::Expense, 1)).unwrap();
        let b = service.create(input(200, "Food", Kind::Expense, 2)).unwrap();
        service.create(input(300, "Food", Kind::Expense, 3)).unwrap();

        let removed = service
            .delete_many(&[a.id, b.id, TransactionId::new(999)])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(service.count().unwrap(), 1);

        let err = service.delete_many(&[TransactionId::new(999)]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_all() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(input(100, "Food", Kind::Expense, 1)).unwrap();
        service.create(input(200, "Salary", Kind::Income, 2)).unwrap();

        assert_eq!(service.delete_all().unwrap(), 2);
        assert_eq!(service.count().unwrap(), 0);
        assert_eq!(service.delete_all().unwrap(), 0);
    }
}
