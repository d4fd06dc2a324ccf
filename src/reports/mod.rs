//! Reports module
//!
//! Aggregate views over the ledger: expense distribution by category, daily
//! income/expense trends, and linear forecasts of both.

pub mod aggregator;
pub mod distribution;
pub mod forecast;
pub mod forecast_report;
pub mod regression;
pub mod trend;

pub use aggregator::{Aggregator, CategoryTotal, TrendPoint};
pub use distribution::{DistributionReport, DistributionRow};
pub use forecast::{ForecastSeries, Forecaster, Horizon, PredictedPoint};
pub use forecast_report::ForecastReport;
pub use regression::LinearFit;
pub use trend::{split_by_kind, SeriesPoint, TrendReport};
