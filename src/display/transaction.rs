//! Transaction display formatting
//!
//! Register view of the ledger, newest entry first.

use crate::services::TransactionWithCategory;

/// Format a single transaction as a register row
pub fn format_transaction_row(
    entry: &TransactionWithCategory,
    currency_symbol: &str,
    datetime_format: &str,
) -> String {
    let txn = &entry.transaction;
    let category = entry
        .category
        .as_ref()
        .map_or("(unknown)", |c| c.name.as_str());

    format!(
        "{:<8} {:<19} {:<7} {:>12} {} {}",
        txn.id.to_string(),
        txn.timestamp.format(datetime_format).to_string(),
        txn.kind.as_str(),
        txn.amount.format_with_symbol(currency_symbol),
        truncate(category, 16),
        txn.description
    )
    .trim_end()
    .to_string()
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    entries: &[TransactionWithCategory],
    currency_symbol: &str,
    datetime_format: &str,
) -> String {
    if entries.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<19} {:<7} {:>12} {:16} {}\n",
        "ID", "Date", "Kind", "Amount", "Category", "Description"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for entry in entries {
        output.push_str(&format_transaction_row(entry, currency_symbol, datetime_format));
        output.push('\n');
    }

    output
}

/// Truncate a string to a maximum length, padding shorter strings
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId, Kind, Money, Transaction, TransactionId};
    use chrono::NaiveDate;

    fn entry(category: Option<&str>) -> TransactionWithCategory {
        let timestamp = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(18, 4, 9)
            .unwrap();
        TransactionWithCategory {
            transaction: Transaction::new(
                TransactionId::new(3),
                Money::from_cents(1999),
                CategoryId::new(1),
                timestamp,
                Kind::Expense,
            )
            .with_description("Pizza"),
            category: category.map(|name| Category::new(CategoryId::new(1), name, Kind::Expense)),
        }
    }

    #[test]
    fn test_format_row() {
        let row = format_transaction_row(&entry(Some("Food")), "$", "%Y-%m-%d %H:%M:%S");
        assert!(row.starts_with("txn-3"));
        assert!(row.contains("2024-05-17 18:04:09"));
        assert!(row.contains("expense"));
        assert!(row.contains("$19.99"));
        assert!(row.contains("Food"));
        assert!(row.ends_with("Pizza"));
    }

    #[test]
    fn test_missing_category() {
        let row = format_transaction_row(&entry(None), "$", "%Y-%m-%d");
        assert!(row.contains("(unknown)"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[], "$", "%Y"), "No transactions found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Entertainment and leisure", 16), "Entertainment...");
        assert_eq!(truncate("Food", 6), "Food  ");
    }
}
