//! budget-tracker - personal income and expense tracking with forecasts
//!
//! This library provides the core of the `budget` command-line tool. It
//! records income and expense transactions under categories, aggregates them
//! into per-category and per-day totals, and projects those daily totals
//! forward with an ordinary least squares line.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, transactions, money)
//! - `storage`: JSON file storage layer and aggregate ledger queries
//! - `reports`: Aggregation, trend series, regression and forecasting
//! - `services`: Business logic layer
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::config::paths::TrackerPaths;
//! use budget_tracker::services::AnalyticsService;
//! use budget_tracker::storage::Storage;
//!
//! let mut storage = Storage::new(TrackerPaths::new()?)?;
//! storage.load_all()?;
//! let forecast = AnalyticsService::new(&storage).generate_forecast(3)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
