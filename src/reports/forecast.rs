//! Linear income/expense forecast
//!
//! Each kind gets its own least-squares line over its daily totals. The
//! independent variable is the day offset from the earliest date in the
//! whole ledger, shared by both kinds so their lines sit on one axis.
//! Projection covers `months * 30` days starting at the last date in the
//! ledger. A month is always 30 days here; calendar months are not used.
//!
//! Predictions are not clamped and can go negative when a trend is falling.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Kind;
use crate::storage::LedgerQuery;

use super::aggregator::{Aggregator, TrendPoint};
use super::regression::LinearFit;

/// Days in one forecast month
pub const DAYS_PER_MONTH: u32 = 30;

/// Largest accepted horizon (100 years)
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// A validated forecast horizon in months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon(u32);

impl Horizon {
    /// Validate a horizon given as a number of months
    pub fn new(months: i64) -> TrackerResult<Self> {
        match u32::try_from(months) {
            Ok(m) if (1..=MAX_HORIZON_MONTHS).contains(&m) => Ok(Self(m)),
            _ => Err(TrackerError::invalid_horizon(months)),
        }
    }

    /// Parse a horizon typed by a user
    pub fn parse(raw: &str) -> TrackerResult<Self> {
        let months: i64 = raw
            .trim()
            .parse()
            .map_err(|_| TrackerError::invalid_horizon(raw))?;
        Self::new(months)
    }

    pub fn months(&self) -> u32 {
        self.0
    }

    /// Number of projected daily points
    pub fn days(&self) -> u32 {
        self.0 * DAYS_PER_MONTH
    }
}

/// A projected amount for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictedPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// History and projection for one kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    pub kind: Kind,
    pub historical: Vec<TrendPoint>,
    /// Empty when the history was too thin to fit a line
    pub predicted: Vec<PredictedPoint>,
    /// The fitted line, in amount per day offset
    pub fit: Option<LinearFit>,
}

/// Produces forecasts from a ledger
pub struct Forecaster<'a, Q: LedgerQuery + ?Sized> {
    ledger: &'a Q,
}

impl<'a, Q: LedgerQuery + ?Sized> Forecaster<'a, Q> {
    pub fn new(ledger: &'a Q) -> Self {
        Self { ledger }
    }

    /// Forecast every kind present in the ledger `horizon_months` ahead
    ///
    /// Fails with `InvalidArgument` for a horizon outside `1..=1200`; the
    /// ledger is not read in that case.
    pub fn forecast(&self, horizon_months: i64) -> TrackerResult<Vec<ForecastSeries>> {
        let horizon = Horizon::new(horizon_months)?;
        self.forecast_horizon(horizon)
    }

    /// Forecast with an already validated horizon
    pub fn forecast_horizon(&self, horizon: Horizon) -> TrackerResult<Vec<ForecastSeries>> {
        let history = Aggregator::new(self.ledger).trend_series()?;
        Ok(project(&history, horizon))
    }
}

/// Fit and project each kind found in `history`
///
/// `history` must hold at most one point per (date, kind). Kinds without
/// points are omitted, so an empty history gives an empty result.
pub fn project(history: &[TrendPoint], horizon: Horizon) -> Vec<ForecastSeries> {
    let (Some(epoch), Some(last)) = (
        history.iter().map(|p| p.date).min(),
        history.iter().map(|p| p.date).max(),
    ) else {
        return Vec::new();
    };

    let offset = |date: NaiveDate| (date - epoch).num_days() as f64;
    let horizon_dates: Vec<NaiveDate> = last.iter_days().take(horizon.days() as usize).collect();

    let mut result = Vec::new();
    for &kind in Kind::all() {
        let mut historical: Vec<TrendPoint> =
            history.iter().filter(|p| p.kind == kind).cloned().collect();
        if historical.is_empty() {
            continue;
        }
        historical.sort_by_key(|p| p.date);

        let samples: Vec<(f64, f64)> = historical
            .iter()
            .map(|p| (offset(p.date), p.total_amount.as_f64()))
            .collect();

        let fit = fit_distinct_days(&historical, &samples);
        let predicted = match fit {
            Some(line) => {
                debug!(
                    %kind,
                    slope = line.slope(),
                    intercept = line.intercept(),
                    points = samples.len(),
                    "fitted linear trend"
                );
                horizon_dates
                    .iter()
                    .map(|&date| PredictedPoint {
                        date,
                        amount: line.predict(offset(date)),
                    })
                    .collect()
            }
            None => {
                debug!(%kind, points = samples.len(), "not enough distinct days to fit; history only");
                Vec::new()
            }
        };

        result.push(ForecastSeries {
            kind,
            historical,
            predicted,
            fit,
        });
    }

    result
}

/// Fit only when the history spans at least two distinct dates
fn fit_distinct_days(historical: &[TrendPoint], samples: &[(f64, f64)]) -> Option<LinearFit> {
    let first = historical.first()?.date;
    if historical.iter().all(|p| p.date == first) {
        return None;
    }
    LinearFit::fit(samples)
}
