//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Category, CategoryId, Kind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    /// ID handed to the next inserted category
    #[serde(default)]
    pub next_id: Option<CategoryId>,
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<CategoryId, Category>>,
    next_id: RwLock<CategoryId>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(CategoryId::new(1)),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: CategoryData = read_json(&self.path)?;
        for category in &file_data.categories {
            category.validate().map_err(|e| {
                TrackerError::Storage(format!(
                    "Category {} in {} is invalid: {}",
                    category.id,
                    self.path.display(),
                    e
                ))
            })?;
        }

        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next_id = self.next_id.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        // Never hand out an ID at or below one already on disk
        let after_max = data
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or(CategoryId::new(1));
        *next_id = file_data.next_id.map_or(after_max, |stored| stored.max(after_max));

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let next_id = self.next_id.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = CategoryData {
            next_id: Some(*next_id),
            categories: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Get all categories, sorted by kind then name
    pub fn get_all(&self) -> Result<Vec<Category>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }

    /// Get all categories of one kind, sorted by name
    pub fn get_by_kind(&self, kind: Kind) -> Result<Vec<Category>, TrackerError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect())
    }

    /// Insert a new category, assigning it the next free ID
    pub fn insert(&self, name: &str, kind: Kind) -> Result<Category, TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut next_id = self.next_id.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let category = Category::new(*next_id, name, kind);
        *next_id = next_id.next();
        data.insert(category.id, category.clone());
        Ok(category)
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
