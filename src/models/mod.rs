//! Core data models for the budget tracker
//!
//! This module contains the stored entities of the ledger: categories,
//! transactions, and the value types they are built from.

pub mod category;
pub mod ids;
pub mod kind;
pub mod money;
pub mod transaction;

pub use category::{Category, DefaultCategories};
pub use ids::{CategoryId, TransactionId};
pub use kind::Kind;
pub use money::Money;
pub use transaction::Transaction;
