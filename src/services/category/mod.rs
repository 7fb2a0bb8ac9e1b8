//! Category service for CRUD operations on activity categories.
//!
//! Works against the owning [`ActivityStore`]. The collection is never
//! allowed to shrink to zero: the last remaining category cannot be deleted,
//! and a store that loads empty is reset to the defaults. Deleting a
//! category does not touch activities that reference it; those render as
//! "Uncategorized" downstream.

use anyhow::{anyhow, Result};

use crate::models::category::Category;
use crate::services::store::ActivityStore;

/// Service for managing activity categories.
pub struct CategoryService<'a> {
    store: &'a mut ActivityStore,
}

impl<'a> CategoryService<'a> {
    pub fn new(store: &'a mut ActivityStore) -> Self {
        Self { store }
    }

    /// Create a new category with a generated id.
    pub fn add(&mut self, name: &str, color: &str) -> Result<Category> {
        let category = Category::new(name.trim(), color);
        category.validate().map_err(|e| anyhow!("{}", e))?;

        log::info!("Adding category '{}'", category.name);
        self.store.insert_category(category.clone());
        Ok(category)
    }

    /// Update name and color of an existing category.
    pub fn update(&mut self, id: &str, name: &str, color: &str) -> Result<()> {
        let category = Category::with_id(id, name.trim(), color);
        category.validate().map_err(|e| anyhow!("{}", e))?;

        if !self.store.replace_category(category) {
            return Err(anyhow!("No category with id '{}'", id));
        }
        Ok(())
    }

    /// Delete a category. Refused when it is the last one; activities that
    /// referenced it keep their dangling id.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.store.categories().len() <= 1 {
            return Err(anyhow!("At least one category must remain"));
        }
        if !self.store.remove_category(id) {
            return Err(anyhow!("No category with id '{}'", id));
        }

        log::info!("Deleted category '{}'", id);
        Ok(())
    }
}
