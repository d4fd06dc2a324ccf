//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::TrackerError;
use crate::models::{CategoryId, Kind, Money, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    next_id: Option<TransactionId>,
    transactions: Vec<Transaction>,
}

/// Fields of a transaction before the repository assigns its ID
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Money,
    pub category_id: CategoryId,
    pub description: String,
    pub timestamp: NaiveDateTime,
    pub kind: Kind,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<TransactionId, Transaction>>,
    next_id: RwLock<TransactionId>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(TransactionId::new(1)),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: TransactionData = read_json(&self.path)?;
        for txn in &file_data.transactions {
            txn.validate().map_err(|e| {
                TrackerError::Storage(format!(
                    "Transaction {} in {} is invalid: {}",
                    txn.id,
                    self.path.display(),
                    e
                ))
            })?;
        }

        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next_id = self.next_id.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        let after_max = data
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or(TransactionId::new(1));
        *next_id = file_data.next_id.map_or(after_max, |stored| stored.max(after_max));

        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), TrackerError> {
        let transactions = self.get_all()?;
        let next_id = *self.next_id.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = TransactionData {
            next_id: Some(next_id),
            transactions,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(transactions)
    }

    /// Insert a new transaction, assigning it the next free ID
    pub fn insert(&self, new: NewTransaction) -> Result<Transaction, TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next_id = self.next_id.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let txn = Transaction::new(*next_id, new.amount, new.category_id, new.timestamp, new.kind)
            .with_description(new.description);
        *next_id = next_id.next();
        data.insert(txn.id, txn.clone());
        Ok(txn)
    }

    /// Delete several transactions, returning how many existed
    pub fn delete_many(&self, ids: &[TransactionId]) -> Result<usize, TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(ids.iter().filter(|id| data.remove(*id).is_some()).count())
    }

    /// Remove every transaction, returning how many were removed
    ///
    /// The ID sequence is not reset.
    pub fn clear(&self) -> Result<usize, TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.len();
        data.clear();
        Ok(removed)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn new_txn(day: u32, cents: i64) -> NewTransaction {
        NewTransaction {
            amount: Money::from_cents(cents),
            category_id: CategoryId::new(1),
            description: String::new(),
            timestamp: NaiveDate::from_ymd_opt(2025, 1, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            kind: Kind::Expense,
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let first = repo.insert(new_txn(15, 5000)).unwrap();
        let second = repo.insert(new_txn(14, 100)).unwrap();
        assert_eq!(first.id, TransactionId::new(1));
        assert_eq!(second.id, TransactionId::new(2));
        assert_eq!(repo.get_all().unwrap()[0], first);
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.insert(new_txn(10, 100)).unwrap();
        repo.insert(new_txn(20, 200)).unwrap();
        repo.insert(new_txn(15, 300)).unwrap();

        let amounts: Vec<_> = repo
            .get_all()
            .unwrap()
            .iter()
            .map(|t| t.amount.cents())
            .collect();
        assert_eq!(amounts, vec![200, 300, 100]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let txn = repo.insert(new_txn(15, 5000)).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get_all().unwrap(), vec![txn]);
        assert_eq!(repo2.insert(new_txn(16, 1)).unwrap().id, TransactionId::new(2));
    }

    #[test]
    fn test_load_rejects_out_of_range_amounts() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.insert(new_txn(1, 100)).unwrap();
        repo.insert(new_txn(2, Money::MAX.cents() + 1)).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        let err = reloaded.load().unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
        assert!(err.to_string().contains("txn-2"));
        assert_eq!(reloaded.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_many_counts_existing_only() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let a = repo.insert(new_txn(1, 100)).unwrap();
        let b = repo.insert(new_txn(2, 200)).unwrap();
        repo.insert(new_txn(3, 300)).unwrap();

        let removed = repo
            .delete_many(&[a.id, b.id, TransactionId::new(99)])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get_all().unwrap().iter().all(|t| t.id != a.id));
        assert_eq!(repo.delete_many(&[a.id]).unwrap(), 0);
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.insert(new_txn(1, 100)).unwrap();
        repo.insert(new_txn(2, 200)).unwrap();

        assert_eq!(repo.clear().unwrap(), 2);
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.insert(new_txn(3, 300)).unwrap().id, TransactionId::new(3));
    }
}
