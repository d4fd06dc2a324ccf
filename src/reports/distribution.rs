//! Expense distribution report
//!
//! Share of total expenses per category.

use std::io::Write;

use serde::Serialize;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::storage::LedgerQuery;

use super::aggregator::{Aggregator, CategoryTotal};

/// One category's slice of the expense total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    pub category_name: String,
    pub total_amount: Money,
    /// Share of all expenses, in percent
    pub percentage: f64,
}

/// Expense distribution across categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    /// Rows sorted by category name
    pub rows: Vec<DistributionRow>,
    pub total: Money,
}

impl DistributionReport {
    /// Generate the report from a ledger
    pub fn generate<Q: LedgerQuery + ?Sized>(ledger: &Q) -> TrackerResult<Self> {
        let totals = Aggregator::new(ledger).category_distribution()?;
        Ok(Self::from_totals(totals))
    }

    /// Build the report from per-category totals
    pub fn from_totals(totals: Vec<CategoryTotal>) -> Self {
        let total: Money = totals.iter().map(|t| t.total_amount).sum();
        let rows = totals
            .into_iter()
            .map(|t| DistributionRow {
                percentage: t.percentage_of(total),
                category_name: t.category_name,
                total_amount: t.total_amount,
            })
            .collect();

        Self { rows, total }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        if self.is_empty() {
            return "No expense data to display.\n".to_string();
        }

        let mut output = String::new();
        output.push_str("Expense Distribution\n");
        output.push_str(&separator(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} {:>7}  {}\n",
            "Category", "Amount", "%", ""
        ));

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>14} {:>7}  {}\n",
                row.category_name,
                row.total_amount.format_with_symbol(currency_symbol),
                format_percentage(row.percentage),
                format_bar(row.percentage, 100.0, 20)
            ));
        }

        output.push_str(&separator(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(currency_symbol)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Category", "Amount", "Percentage"])?;

        for row in &self.rows {
            csv.write_record([
                row.category_name.clone(),
                row.total_amount.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv.write_record([
            "TOTAL".to_string(),
            self.total.to_string(),
            if self.is_empty() { "0.00" } else { "100.00" }.to_string(),
        ])?;

        csv.flush()
            .map_err(|e| TrackerError::Export(e.to_string()))
    }
}
