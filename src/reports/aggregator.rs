//! Aggregation of the ledger into category and daily totals
//!
//! The grouping helpers here are pure functions over transaction slices; the
//! store uses them to answer its ledger queries. [`Aggregator`] sits on top of
//! a [`LedgerQuery`] and normalizes whatever the store returns so callers can
//! rely on the ordering and uniqueness guarantees below.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::{Category, CategoryId, Kind, Money, Transaction};
use crate::storage::LedgerQuery;

/// Total expense amount filed under one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category_name: String,
    pub total_amount: Money,
}

impl CategoryTotal {
    pub fn new(category_name: impl Into<String>, total_amount: Money) -> Self {
        Self {
            category_name: category_name.into(),
            total_amount,
        }
    }

    /// Share of `grand_total` in percent; 0 when the grand total is zero
    pub fn percentage_of(&self, grand_total: Money) -> f64 {
        if grand_total.is_zero() {
            0.0
        } else {
            self.total_amount.cents() as f64 / grand_total.cents() as f64 * 100.0
        }
    }
}

/// Sum of all transactions of one kind on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub kind: Kind,
    pub total_amount: Money,
}

impl TrendPoint {
    pub fn new(date: NaiveDate, kind: Kind, total_amount: Money) -> Self {
        Self {
            date,
            kind,
            total_amount,
        }
    }
}

/// Sum expense amounts per category name
///
/// Transactions whose category is unknown are dropped, as an inner join
/// would. Income transactions never contribute. Result is sorted by name.
pub fn group_expense_totals(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategoryTotal> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(&name) = names.get(&txn.category_id) {
            *totals.entry(name).or_default() += txn.amount;
        }
    }

    totals
        .into_iter()
        .map(|(name, total)| CategoryTotal::new(name, total))
        .collect()
}

/// Sum amounts per (calendar date, kind)
///
/// Sparse: only dates that have transactions of a kind appear. Ascending by
/// date, expense before income on the same date.
pub fn group_date_kind_totals(transactions: &[Transaction]) -> Vec<TrendPoint> {
    merge_trend_points(
        transactions
            .iter()
            .map(|t| TrendPoint::new(t.date(), t.kind, t.amount)),
    )
}

/// Collapse points sharing a (date, kind) key and sort them
fn merge_trend_points(points: impl IntoIterator<Item = TrendPoint>) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<(NaiveDate, Kind), Money> = BTreeMap::new();
    for point in points {
        *totals.entry((point.date, point.kind)).or_default() += point.total_amount;
    }

    totals
        .into_iter()
        .map(|((date, kind), total)| TrendPoint::new(date, kind, total))
        .collect()
}

/// Read-only aggregate views over a ledger
pub struct Aggregator<'a, Q: LedgerQuery + ?Sized> {
    ledger: &'a Q,
}

impl<'a, Q: LedgerQuery + ?Sized> Aggregator<'a, Q> {
    pub fn new(ledger: &'a Q) -> Self {
        Self { ledger }
    }

    /// Expense totals per category, sorted by category name
    ///
    /// Categories without expense transactions are absent. An empty ledger
    /// yields an empty vec.
    pub fn category_distribution(&self) -> TrackerResult<Vec<CategoryTotal>> {
        let rows = self.ledger.list_expense_category_totals()?;

        let mut totals: BTreeMap<String, Money> = BTreeMap::new();
        for row in rows {
            *totals.entry(row.category_name).or_default() += row.total_amount;
        }

        Ok(totals
            .into_iter()
            .map(|(name, total)| CategoryTotal::new(name, total))
            .collect())
    }

    /// Daily totals per kind, ascending by date, unique per (date, kind)
    pub fn trend_series(&self) -> TrackerResult<Vec<TrendPoint>> {
        let rows = self.ledger.list_date_kind_totals()?;
        Ok(merge_trend_points(rows))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::models::TransactionId;

    /// In-memory ledger answering queries with the grouping helpers
    pub(crate) struct MemoryLedger {
        pub categories: Vec<Category>,
        pub transactions: Vec<Transaction>,
    }

    impl MemoryLedger {
        pub fn new() -> Self {
            Self {
                categories: vec![
                    Category::new(CategoryId::new(1), "Food", Kind::Expense),
                    Category::new(CategoryId::new(2), "Housing", Kind::Expense),
                    Category::new(CategoryId::new(3), "Salary", Kind::Income),
                ],
                transactions: Vec::new(),
            }
        }

        pub fn add(&mut self, ymd: (i32, u32, u32), cents: i64, category: i64, kind: Kind) {
            let id = TransactionId::new(self.transactions.len() as i64 + 1);
            let timestamp = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap();
            self.transactions.push(Transaction::new(
                id,
                Money::from_cents(cents),
                CategoryId::new(category),
                timestamp,
                kind,
            ));
        }
    }

    impl LedgerQuery for MemoryLedger {
        fn list_expense_category_totals(&self) -> TrackerResult<Vec<CategoryTotal>> {
            Ok(group_expense_totals(&self.transactions, &self.categories))
        }

        fn list_date_kind_totals(&self) -> TrackerResult<Vec<TrendPoint>> {
            Ok(group_date_kind_totals(&self.transactions))
        }
    }

    /// Ledger returning rows in whatever shape the test dictates
    struct RawLedger {
        totals: Vec<CategoryTotal>,
        points: Vec<TrendPoint>,
    }

    impl LedgerQuery for RawLedger {
        fn list_expense_category_totals(&self) -> TrackerResult<Vec<CategoryTotal>> {
            Ok(self.totals.clone())
        }

        fn list_date_kind_totals(&self) -> TrackerResult<Vec<TrendPoint>> {
            Ok(self.points.clone())
        }
    }

    struct FailingLedger;

    impl LedgerQuery for FailingLedger {
        fn list_expense_category_totals(&self) -> TrackerResult<Vec<CategoryTotal>> {
            Err(TrackerError::Storage("disk unplugged".into()))
        }

        fn list_date_kind_totals(&self) -> TrackerResult<Vec<TrendPoint>> {
            Err(TrackerError::Storage("disk unplugged".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_expense_distribution() {
        let mut ledger = MemoryLedger::new();
        ledger.add((2024, 1, 1), 5000, 1, Kind::Expense);

        let distribution = Aggregator::new(&ledger).category_distribution().unwrap();
        assert_eq!(distribution, vec![CategoryTotal::new("Food", Money::from_cents(5000))]);
    }

    #[test]
    fn test_empty_ledger_yields_empty_views() {
        let ledger = MemoryLedger::new();
        let aggregator = Aggregator::new(&ledger);

        assert!(aggregator.category_distribution().unwrap().is_empty());
        assert!(aggregator.trend_series().unwrap().is_empty());
    }

    #[test]
    fn test_distribution_ignores_income_and_omits_unused_categories() {
        let mut ledger = MemoryLedger::new();
        ledger.add((2024, 1, 1), 1000, 1, Kind::Expense);
        ledger.add((2024, 1, 2), 2500, 1, Kind::Expense);
        ledger.add((2024, 1, 3), 900000, 3, Kind::Income);

        let distribution = Aggregator::new(&ledger).category_distribution().unwrap();
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[0].category_name, "Food");
        assert_eq!(distribution[0].total_amount.cents(), 3500);
    }

    #[test]
    fn test_distribution_sum_matches_expense_sum() {
        let mut ledger = MemoryLedger::new();
        for (i, cents) in [125, 9999, 1, 40000, 333].into_iter().enumerate() {
            let category = if i % 2 == 0 { 1 } else { 2 };
            ledger.add((2024, 2, i as u32 + 1), cents, category, Kind::Expense);
        }
        ledger.add((2024, 2, 9), 77777, 3, Kind::Income);

        let distribution = Aggregator::new(&ledger).category_distribution().unwrap();
        let distributed: Money = distribution.iter().map(|c| c.total_amount).sum();
        let expenses: Money = ledger
            .transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();
        assert_eq!(distributed, expenses);
    }

    #[test]
    fn test_distribution_merges_duplicate_names_from_store() {
        let ledger = RawLedger {
            totals: vec![
                CategoryTotal::new("Food", Money::from_cents(100)),
                CategoryTotal::new("Bills", Money::from_cents(50)),
                CategoryTotal::new("Food", Money::from_cents(200)),
            ],
            points: vec![],
        };

        let distribution = Aggregator::new(&ledger).category_distribution().unwrap();
        assert_eq!(
            distribution,
            vec![
                CategoryTotal::new("Bills", Money::from_cents(50)),
                CategoryTotal::new("Food", Money::from_cents(300)),
            ]
        );
    }

    #[test]
    fn test_trend_groups_by_calendar_date_and_kind() {
        let mut ledger = MemoryLedger::new();
        ledger.add((2024, 3, 2), 100, 1, Kind::Expense);
        ledger.add((2024, 3, 1), 200, 2, Kind::Expense);
        ledger.add((2024, 3, 2), 300, 2, Kind::Expense);
        ledger.add((2024, 3, 2), 5000, 3, Kind::Income);

        let trend = Aggregator::new(&ledger).trend_series().unwrap();
        assert_eq!(
            trend,
            vec![
                TrendPoint::new(date(2024, 3, 1), Kind::Expense, Money::from_cents(200)),
                TrendPoint::new(date(2024, 3, 2), Kind::Expense, Money::from_cents(400)),
                TrendPoint::new(date(2024, 3, 2), Kind::Income, Money::from_cents(5000)),
            ]
        );
    }

    #[test]
    fn test_trend_is_sparse() {
        let mut ledger = MemoryLedger::new();
        ledger.add((2024, 1, 1), 100, 1, Kind::Expense);
        ledger.add((2024, 1, 31), 100, 1, Kind::Expense);

        let trend = Aggregator::new(&ledger).trend_series().unwrap();
        assert_eq!(trend.len(), 2);
        assert!(trend.iter().all(|p| !p.total_amount.is_zero()));
    }

    #[test]
    fn test_trend_sorted_and_unique_even_if_store_is_not() {
        let ledger = RawLedger {
            totals: vec![],
            points: vec![
                TrendPoint::new(date(2024, 5, 3), Kind::Income, Money::from_cents(1)),
                TrendPoint::new(date(2024, 5, 1), Kind::Expense, Money::from_cents(2)),
                TrendPoint::new(date(2024, 5, 3), Kind::Income, Money::from_cents(4)),
                TrendPoint::new(date(2024, 5, 3), Kind::Expense, Money::from_cents(8)),
            ],
        };

        let trend = Aggregator::new(&ledger).trend_series().unwrap();
        assert!(trend.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(trend
            .windows(2)
            .all(|w| (w[0].date, w[0].kind) != (w[1].date, w[1].kind)));
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[2].total_amount.cents(), 5);
    }

    #[test]
    fn test_store_failure_propagates() {
        let aggregator = Aggregator::new(&FailingLedger);
        assert!(matches!(
            aggregator.category_distribution(),
            Err(TrackerError::Storage(_))
        ));
        assert!(matches!(aggregator.trend_series(), Err(TrackerError::Storage(_))));
    }

    #[test]
    fn test_unknown_category_dropped_from_distribution() {
        let mut ledger = MemoryLedger::new();
        ledger.add((2024, 1, 1), 100, 42, Kind::Expense);
        ledger.add((2024, 1, 1), 250, 2, Kind::Expense);

        let distribution = Aggregator::new(&ledger).category_distribution().unwrap();
        assert_eq!(distribution, vec![CategoryTotal::new("Housing", Money::from_cents(250))]);
    }

    #[test]
    fn test_percentage_of() {
        let total = CategoryTotal::new("Food", Money::from_cents(250));
        assert!((total.percentage_of(Money::from_cents(1000)) - 25.0).abs() < 1e-9);
        assert_eq!(total.percentage_of(Money::zero()), 0.0);
    }
}
