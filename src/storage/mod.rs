//! Storage layer
//!
//! JSON file storage with atomic writes and automatic directory creation.
//! Repositories keep their data in memory behind a lock and write the whole
//! file back on save.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod query;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use query::LedgerQuery;
pub use transactions::{NewTransaction, TransactionRepository};

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
        })
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.categories.load()?;
        self.transactions.load()?;
        Ok(())
    }
}
