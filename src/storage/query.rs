//! Aggregate queries answered by the store

use crate::error::TrackerResult;
use crate::reports::aggregator::{group_date_kind_totals, group_expense_totals};
use crate::reports::{CategoryTotal, TrendPoint};

use super::Storage;

/// Grouped read access to the ledger
///
/// Implementations may return rows in any order and may repeat a key; the
/// aggregator normalizes both.
pub trait LedgerQuery {
    /// One row per expense category with its summed amount
    fn list_expense_category_totals(&self) -> TrackerResult<Vec<CategoryTotal>>;

    /// One row per (calendar date, kind) with its summed amount
    fn list_date_kind_totals(&self) -> TrackerResult<Vec<TrendPoint>>;
}

impl LedgerQuery for Storage {
    fn list_expense_category_totals(&self) -> TrackerResult<Vec<CategoryTotal>> {
        let categories = self.categories.get_all()?;
        let transactions = self.transactions.get_all()?;
        Ok(group_expense_totals(&transactions, &categories))
    }

    fn list_date_kind_totals(&self) -> TrackerResult<Vec<TrendPoint>> {
        let transactions = self.transactions.get_all()?;
        Ok(group_date_kind_totals(&transactions))
    }
}
