//! The activity store: single owner of the activity and category
//! collections.
//!
//! All mutation funnels through this type (the commit engine and the
//! category service call into it); everything else reads snapshots. Writes
//! replace a whole collection and persist it as one unit, matching the
//! snapshot-per-key storage layout. Persistence is fire-and-forget: a failed
//! save is logged and the store keeps operating in memory.

use chrono::NaiveDate;

use crate::models::activity::Activity;
use crate::models::category::{default_categories, Category};
use crate::services::storage::Storage;

/// Owner of the activity and category collections.
#[derive(Debug)]
pub struct ActivityStore {
    storage: Option<Storage>,
    activities: Vec<Activity>,
    categories: Vec<Category>,
}

impl ActivityStore {
    /// Load both collections from storage. An empty category collection is
    /// reset to the built-in defaults; there must always be at least one.
    pub fn open(storage: Storage) -> Self {
        let activities = storage.load_activities();
        let mut categories = storage.load_categories();
        if categories.is_empty() {
            log::warn!("Stored category collection is empty, restoring defaults");
            categories = default_categories();
        }

        log::info!(
            "Loaded store: {} activities, {} categories",
            activities.len(),
            categories.len()
        );

        Self {
            storage: Some(storage),
            activities,
            categories,
        }
    }

    /// A store with no backing file, seeded with the default categories.
    /// Used by tests and as the degraded mode when storage is unavailable.
    pub fn in_memory() -> Self {
        Self {
            storage: None,
            activities: Vec::new(),
            categories: default_categories(),
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities on the given date, in insertion order.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.date == date).collect()
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Categories in display order (stored order is display order).
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Replace the whole activity collection and persist it.
    pub fn replace_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
        self.persist_activities();
    }

    pub(crate) fn insert_category(&mut self, category: Category) {
        self.categories.push(category);
        self.persist_categories();
    }

    pub(crate) fn replace_category(&mut self, category: Category) -> bool {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => {
                *slot = category;
                self.persist_categories();
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_category(&mut self, id: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() != before;
        if removed {
            self.persist_categories();
        }
        removed
    }

    fn persist_activities(&self) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save_activities(&self.activities) {
                log::warn!("Failed to persist activities, keeping in-memory state: {:#}", err);
            }
        }
    }

    fn persist_categories(&self) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save_categories(&self.categories) {
                log::warn!("Failed to persist categories, keeping in-memory state: {:#}", err);
            }
        }
    }
}
