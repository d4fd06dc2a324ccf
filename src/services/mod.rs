//! Service layer
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and cross-entity lookups.

pub mod analytics;
pub mod category;
pub mod transaction;

pub use analytics::AnalyticsService;
pub use category::CategoryService;
pub use transaction::{CreateTransactionInput, TransactionService, TransactionWithCategory};
