//! Display formatting for terminal output
//!
//! Provides utilities for formatting categories, transactions and report
//! figures for terminal display.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::format_category_tree;
pub use transaction::{format_transaction_register, format_transaction_row};
