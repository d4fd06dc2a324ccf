//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_forecast_command, handle_report_command, ForecastArgs, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
