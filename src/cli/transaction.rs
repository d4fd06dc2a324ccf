//! Transaction CLI commands

use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::format_transaction_register;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money, TransactionId};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Kind of transaction (expense or income)
        kind: Kind,
        /// Amount (e.g., "12.50"); must not be negative
        amount: String,
        /// Category name or ID
        category: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Date and time ("YYYY-MM-DD" or "YYYY-MM-DD HH:MM:SS"); defaults to now
        #[arg(long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete one or more transactions by ID
    Delete {
        /// Transaction IDs (e.g., "txn-3" or "3")
        #[arg(required = true)]
        ids: Vec<TransactionId>,
    },

    /// Delete every transaction
    Clear {
        /// Confirm deleting all transactions
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let amount = Money::parse(&amount).map_err(|e| {
                TrackerError::Validation(format!(
                    "Invalid amount '{}': {}. Use a format like 12.50",
                    amount, e
                ))
            })?;
            let timestamp = date.as_deref().map(parse_timestamp).transpose()?;

            let txn = service.create(CreateTransactionInput {
                amount,
                category,
                kind,
                description,
                timestamp,
            })?;

            println!(
                "Added {} {} on {} ({})",
                txn.kind,
                txn.amount.format_with_symbol(&settings.currency_symbol),
                txn.timestamp.format(&settings.datetime_format),
                txn.id
            );
        }

        TransactionCommands::List { limit } => {
            let entries = service.list(limit)?;
            print!(
                "{}",
                format_transaction_register(
                    &entries,
                    &settings.currency_symbol,
                    &settings.datetime_format
                )
            );

            let total = service.count()?;
            if entries.len() < total {
                println!("Showing {} of {} transactions", entries.len(), total);
            }
        }

        TransactionCommands::Delete { ids } => {
            let removed = service.delete_many(&ids)?;
            println!("Deleted {} transaction(s)", removed);
        }

        TransactionCommands::Clear { yes } => {
            if !yes {
                return Err(TrackerError::Validation(
                    "Refusing to delete all transactions without --yes".into(),
                ));
            }
            let removed = service.delete_all()?;
            println!("Deleted all {} transaction(s)", removed);
        }
    }

    Ok(())
}

/// Parse a date or date-time; a bare date means midnight
fn parse_timestamp(raw: &str) -> TrackerResult<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(timestamp);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            TrackerError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
                raw
            ))
        })
}
