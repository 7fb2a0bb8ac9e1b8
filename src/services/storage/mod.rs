//! JSON snapshot persistence for the two logical keys the app stores:
//! the activity collection and the category collection.
//!
//! Each key round-trips as one pretty-printed JSON file. Loading is
//! forgiving: a missing, unreadable or unparsable file yields the built-in
//! default so the app keeps running in-memory instead of crashing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::activity::Activity;
use crate::models::category::{default_categories, Category};

const ACTIVITIES_FILE: &str = "activities.json";
const CATEGORIES_FILE: &str = "categories.json";

/// File-backed storage for the activity and category collections.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Storage rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the platform data directory.
    pub fn in_default_dir() -> Result<Self> {
        Ok(Self::new(default_data_dir()?))
    }

    pub fn activities_path(&self) -> PathBuf {
        self.dir.join(ACTIVITIES_FILE)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(CATEGORIES_FILE)
    }

    /// Load the stored activities, or an empty collection when the file is
    /// absent or broken.
    pub fn load_activities(&self) -> Vec<Activity> {
        load_or_default(&self.activities_path(), Vec::new)
    }

    pub fn save_activities(&self, activities: &[Activity]) -> Result<()> {
        save_snapshot(&self.activities_path(), &activities)
    }

    /// Load the stored categories, or the built-in defaults when the file is
    /// absent or broken.
    pub fn load_categories(&self) -> Vec<Category> {
        load_or_default(&self.categories_path(), default_categories)
    }

    pub fn save_categories(&self, categories: &[Category]) -> Result<()> {
        save_snapshot(&self.categories_path(), &categories)
    }
}

/// Platform data directory for the app.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "quarterlog")
        .context("could not determine a platform data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

fn load_or_default<T: DeserializeOwned>(path: &Path, default: impl FnOnce() -> T) -> T {
    match load_snapshot(path) {
        Ok(Some(value)) => value,
        Ok(None) => default(),
        Err(err) => {
            log::warn!(
                "Falling back to defaults, could not load {}: {:#}",
                path.display(),
                err
            );
            default()
        }
    }
}

fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&data)
        .with_context(|| format!("failed to deserialize {}", path.display()))?;
    Ok(Some(value))
}

fn save_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
