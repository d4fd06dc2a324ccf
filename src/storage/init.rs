//! Storage initialization
//!
//! Handles first-run setup and default category seeding

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::DefaultCategories;

use super::categories::CategoryRepository;

/// Initialize storage for a fresh installation
///
/// Seeds the default expense and income categories. Defaults whose name
/// already exists are skipped, so running this twice is harmless. Returns
/// the number of categories created.
pub fn initialize_storage(paths: &TrackerPaths) -> Result<usize, TrackerError> {
    paths.ensure_directories()?;

    let categories = CategoryRepository::new(paths.categories_file());
    categories.load()?;

    let mut created = 0;
    for (name, kind) in DefaultCategories::all() {
        if categories.get_by_name(name)?.is_none() {
            categories.insert(name, kind)?;
            created += 1;
        }
    }

    if created > 0 {
        categories.save()?;
        info!(created, "seeded default categories");
    }

    Ok(created)
}
