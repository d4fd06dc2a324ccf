//! Forecast report

use std::io::Write;

use serde::Serialize;

use crate::display::report::{double_separator, format_projection};
use crate::error::{TrackerError, TrackerResult};
use crate::storage::LedgerQuery;

use super::forecast::{ForecastSeries, Forecaster, Horizon, DAYS_PER_MONTH};

/// Historical and projected series for every kind in the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub months: u32,
    pub series: Vec<ForecastSeries>,
}

impl ForecastReport {
    /// Generate the report from a ledger
    pub fn generate<Q: LedgerQuery + ?Sized>(ledger: &Q, horizon: Horizon) -> TrackerResult<Self> {
        let series = Forecaster::new(ledger).forecast_horizon(horizon)?;
        Ok(Self {
            months: horizon.months(),
            series,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Format the report for terminal display
    ///
    /// The projection is summarised at its first day and at the end of each
    /// 30-day month.
    pub fn format_terminal(&self, currency_symbol: &str, date_format: &str) -> String {
        if self.is_empty() {
            return "Not enough data for a forecast.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!("Forecast: next {} month(s)\n", self.months));

        for series in &self.series {
            output.push_str(&double_separator(48));
            output.push('\n');
            output.push_str(&format!(
                "{}: {} historical day(s)\n",
                series.kind.label(),
                series.historical.len()
            ));

            let Some(fit) = series.fit else {
                output.push_str("  Not enough distinct days to project a trend.\n");
                continue;
            };

            output.push_str(&format!(
                "  Trend: {} per day\n",
                format_projection(fit.slope(), currency_symbol)
            ));

            let month_ends = (DAYS_PER_MONTH as usize - 1..series.predicted.len())
                .step_by(DAYS_PER_MONTH as usize);
            for index in std::iter::once(0).chain(month_ends) {
                if let Some(point) = series.predicted.get(index) {
                    output.push_str(&format!(
                        "  {:<12} {:>14}\n",
                        point.date.format(date_format),
                        format_projection(point.amount, currency_symbol)
                    ));
                }
            }
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// Historical rows come first for each kind, then the projected rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Date", "Kind", "Source", "Amount"])?;

        for series in &self.series {
            let kind = series.kind.as_str();
            for point in &series.historical {
                csv.write_record([
                    point.date.to_string(),
                    kind.to_string(),
                    "historical".to_string(),
                    point.total_amount.to_string(),
                ])?;
            }
            for point in &series.predicted {
                csv.write_record([
                    point.date.to_string(),
                    kind.to_string(),
                    "predicted".to_string(),
                    format!("{:.2}", point.amount),
                ])?;
            }
        }

        csv.flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;
    use crate::reports::aggregator::tests::MemoryLedger;

    fn ledger() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.add((2024, 1, 1), 1000, 1, Kind::Expense);
        ledger.add((2024, 1, 11), 2000, 1, Kind::Expense);
        ledger.add((2024, 1, 5), 300000, 3, Kind::Income);
        ledger
    }

    #[test]
    fn test_generate_forecast_report() {
        let report = ForecastReport::generate(&ledger(), Horizon::new(2).unwrap()).unwrap();
        assert_eq!(report.months, 2);
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series[0].predicted.len(), 60);
        assert!(report.series[1].predicted.is_empty());
    }

    #[test]
    fn test_format_terminal() {
        let report = ForecastReport::generate(&ledger(), Horizon::new(1).unwrap()).unwrap();
        let output = report.format_terminal("$", "%Y-%m-%d");

        assert!(output.contains("next 1 month(s)"));
        assert!(output.contains("Trend: $1.00 per day"));
        // First projected day and the end of the month
        assert!(output.contains("2024-01-11"));
        assert!(output.contains("2024-02-09"));
        assert!(output.contains("$49.00"));
        assert!(output.contains("Not enough distinct days"));
    }

    #[test]
    fn test_empty_ledger() {
        let report = ForecastReport::generate(&MemoryLedger::new(), Horizon::new(1).unwrap()).unwrap();
        assert!(report.is_empty());
        assert!(report.format_terminal("$", "%Y-%m-%d").contains("Not enough data"));
    }

    #[test]
    fn test_export_csv() {
        let report = ForecastReport::generate(&ledger(), Horizon::new(1).unwrap()).unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Kind,Source,Amount");
        assert_eq!(lines[1], "2024-01-01,expense,historical,10.00");
        assert_eq!(lines[3], "2024-01-11,expense,predicted,20.00");
        // header + 2 expense history + 30 predicted + 1 income history
        assert_eq!(lines.len(), 34);
        assert_eq!(lines[33], "2024-01-05,income,historical,3000.00");
    }
}
