//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_tree;
use crate::error::TrackerResult;
use crate::models::Kind;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories (organized by kind)
    List {
        /// Only show categories of this kind (expense or income)
        #[arg(short, long)]
        kind: Option<Kind>,
    },

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Kind of the category (expense or income)
        #[arg(short, long)]
        kind: Kind,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TrackerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let categories = match kind {
                Some(kind) => service.list_by_kind(kind)?,
                None => service.list()?,
            };
            print!("{}", format_category_tree(&categories));
        }

        CategoryCommands::Add { name, kind } => {
            let category = service.create(&name, kind)?;
            println!(
                "Created {} category: {} ({})",
                category.kind, category.name, category.id
            );
        }
    }

    Ok(())
}
