//! Transaction model
//!
//! A transaction is a single timestamped income or expense entry filed under
//! one category.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::kind::Kind;
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount, never negative; direction comes from `kind`
    pub amount: Money,

    /// The category this transaction is filed under
    pub category_id: CategoryId,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// When the transaction happened (local time)
    pub timestamp: NaiveDateTime,

    /// Expense or income
    pub kind: Kind,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: TransactionId,
        amount: Money,
        category_id: CategoryId,
        timestamp: NaiveDateTime,
        kind: Kind,
    ) -> Self {
        Self {
            id,
            amount,
            category_id,
            description: String::new(),
            timestamp,
            kind,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Calendar date of the timestamp, used for daily bucketing
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        Self::validate_amount(self.amount)
    }

    /// Check that an amount is between zero and [`Money::MAX`]
    pub fn validate_amount(amount: Money) -> Result<(), TransactionValidationError> {
        if amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(amount));
        }
        if amount > Money::MAX {
            return Err(TransactionValidationError::AmountTooLarge(amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d"),
            self.kind,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must not exceed {}, got {}", Money::MAX, amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
