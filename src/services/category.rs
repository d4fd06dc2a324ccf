//! Category service
//!
//! Provides business logic for category management: listing by kind,
//! lookup by name or ID, and creation with uniqueness checks.

use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, Kind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str, kind: Kind) -> TrackerResult<Category> {
        let name = name.trim();

        Category::validate_name(name).map_err(|e| TrackerError::Validation(e.to_string()))?;

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = self.storage.categories.insert(name, kind)?;
        self.storage.categories.save()?;

        info!(id = %category.id, name = %category.name, kind = %kind, "created category");
        Ok(category)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.trim().parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// List all categories, expense categories first
    pub fn list(&self) -> TrackerResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// List the categories of one kind, sorted by name
    pub fn list_by_kind(&self, kind: Kind) -> TrackerResult<Vec<Category>> {
        self.storage.categories.get_by_kind(kind)
    }
}
