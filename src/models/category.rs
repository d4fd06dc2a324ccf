//! Category model
//!
//! Every transaction is filed under a category. A category is either an
//! expense or an income category, and transactions may only reference a
//! category of their own kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::kind::Kind;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A named bucket for transactions of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique across all categories
    pub name: String,

    /// Whether this is an expense or income category
    pub kind: Kind,
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        Self::validate_name(&self.name)
    }

    /// Check a proposed category name
    pub fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
        if name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if name.len() > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Categories seeded into a fresh ledger
pub struct DefaultCategories;

impl DefaultCategories {
    pub const EXPENSE: &'static [&'static str] =
        &["Food", "Transportation", "Housing", "Utilities", "Entertainment"];

    pub const INCOME: &'static [&'static str] =
        &["Salary", "Freelance", "Investments", "Other Income"];

    /// All default (name, kind) pairs, expenses first
    pub fn all() -> impl Iterator<Item = (&'static str, Kind)> {
        Self::EXPENSE
            .iter()
            .map(|name| (*name, Kind::Expense))
            .chain(Self::INCOME.iter().map(|name| (*name, Kind::Income)))
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
