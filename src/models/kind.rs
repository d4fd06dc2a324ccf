//! Transaction/category classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether money leaves (`Expense`) or enters (`Income`) the ledger
///
/// Ordered `Expense < Income`; reports rely on this for a stable order
/// within a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Expense,
    Income,
}

impl Kind {
    /// Both kinds, in report order
    pub fn all() -> &'static [Self] {
        &[Self::Expense, Self::Income]
    }

    /// Lowercase name as stored on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Capitalized name for display headers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "e" => Ok(Self::Expense),
            "income" | "i" => Ok(Self::Income),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Error returned when a string is neither "expense" nor "income"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid kind '{}': expected 'expense' or 'income'", self.0)
    }
}

impl std::error::Error for ParseKindError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("expense".parse::<Kind>().unwrap(), Kind::Expense);
        assert_eq!("Income".parse::<Kind>().unwrap(), Kind::Income);
        assert_eq!("i".parse::<Kind>().unwrap(), Kind::Income);
        assert!("transfer".parse::<Kind>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Kind::Expense < Kind::Income);
        assert_eq!(Kind::all(), &[Kind::Expense, Kind::Income]);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Kind::Expense).unwrap(), "\"expense\"");
        let kind: Kind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(kind, Kind::Income);
    }
}
