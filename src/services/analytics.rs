//! Analytics service
//!
//! Entry point for the read-only views: category distribution, trend series
//! and forecasts.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::TrackerResult;
use crate::models::Kind;
use crate::reports::{
    split_by_kind, Aggregator, CategoryTotal, ForecastSeries, Forecaster, Horizon, SeriesPoint,
    TrendPoint,
};
use crate::storage::LedgerQuery;

/// Service for aggregate views and forecasts
pub struct AnalyticsService<'a, Q: LedgerQuery + ?Sized> {
    ledger: &'a Q,
}

impl<'a, Q: LedgerQuery + ?Sized> AnalyticsService<'a, Q> {
    /// Create a new analytics service
    pub fn new(ledger: &'a Q) -> Self {
        Self { ledger }
    }

    /// Expense totals per category, sorted by name
    pub fn get_category_distribution(&self) -> TrackerResult<Vec<CategoryTotal>> {
        let totals = Aggregator::new(self.ledger).category_distribution()?;
        debug!(categories = totals.len(), "computed category distribution");
        Ok(totals)
    }

    /// Daily totals per kind, ascending by date
    pub fn get_trend_series(&self) -> TrackerResult<Vec<TrendPoint>> {
        let points = Aggregator::new(self.ledger).trend_series()?;
        debug!(points = points.len(), "computed trend series");
        Ok(points)
    }

    /// Trend series split into one series per kind
    pub fn get_trend_by_kind(&self) -> TrackerResult<BTreeMap<Kind, Vec<SeriesPoint>>> {
        Ok(split_by_kind(&self.get_trend_series()?))
    }

    /// Forecast `horizon_months` ahead
    pub fn generate_forecast(&self, horizon_months: i64) -> TrackerResult<Vec<ForecastSeries>> {
        Forecaster::new(self.ledger).forecast(horizon_months)
    }

    /// Forecast with a horizon typed by a user
    pub fn generate_forecast_from_input(&self, raw: &str) -> TrackerResult<Vec<ForecastSeries>> {
        let horizon = Horizon::parse(raw)?;
        Forecaster::new(self.ledger).forecast_horizon(horizon)
    }
}
