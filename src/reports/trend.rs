//! Per-kind trend series for plotting

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::report::separator;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money};
use crate::storage::LedgerQuery;

use super::aggregator::{Aggregator, TrendPoint};

/// One (date, amount) point of a single-kind series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Partition trend points by kind
///
/// Every kind is present as a key; a kind without points maps to an empty
/// vec. Input order is preserved within each partition, so an ascending
/// input gives ascending series. No interpolation or smoothing.
pub fn split_by_kind(points: &[TrendPoint]) -> BTreeMap<Kind, Vec<SeriesPoint>> {
    let mut series: BTreeMap<Kind, Vec<SeriesPoint>> =
        Kind::all().iter().map(|kind| (*kind, Vec::new())).collect();

    for point in points {
        series.entry(point.kind).or_default().push(SeriesPoint {
            date: point.date,
            amount: point.total_amount,
        });
    }

    series
}

/// Daily income and expense series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub series: BTreeMap<Kind, Vec<SeriesPoint>>,
}

impl TrendReport {
    /// Generate the report from a ledger
    pub fn generate<Q: LedgerQuery + ?Sized>(ledger: &Q) -> TrackerResult<Self> {
        let points = Aggregator::new(ledger).trend_series()?;
        Ok(Self {
            series: split_by_kind(&points),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str, date_format: &str) -> String {
        if self.is_empty() {
            return "No transactions to display.\n".to_string();
        }

        let mut output = String::new();
        output.push_str("Income and Expense Trend\n");

        for (kind, points) in &self.series {
            output.push_str(&separator(40));
            output.push('\n');
            output.push_str(&format!("{} ({} days)\n", kind.label(), points.len()));

            for point in points {
                output.push_str(&format!(
                    "  {:<12} {:>14}\n",
                    point.date.format(date_format),
                    point.amount.format_with_symbol(currency_symbol)
                ));
            }
        }

        output
    }

    /// Export the report to CSV format, one row per (date, kind)
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Kind", "Amount"])?;

        for (kind, points) in &self.series {
            for point in points {
                csv.write_record([
                    point.date.to_string(),
                    kind.as_str().to_string(),
                    point.amount.to_string(),
                ])?;
            }
        }

        csv.flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }
}
