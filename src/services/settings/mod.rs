//! App settings: the schedulable window and slot step, stored as TOML.
//!
//! Loading is forgiving like the data storage: a missing or broken file
//! yields the defaults with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::slot::{SlotCalendar, SlotCalendarError};

/// User-tunable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First schedulable hour of the day
    pub day_start_hour: u32,
    /// Hour the schedulable window ends (exclusive)
    pub day_end_hour: u32,
    /// Slot length in minutes
    pub slot_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 23,
            slot_minutes: 15,
        }
    }
}

impl Settings {
    /// The slot calendar these settings describe.
    pub fn slot_calendar(&self) -> Result<SlotCalendar, SlotCalendarError> {
        SlotCalendar::new(self.day_start_hour, self.day_end_hour, self.slot_minutes)
    }

    /// Load settings, falling back to defaults when the file is missing,
    /// unreadable, unparsable, or describes an invalid window.
    pub fn load(path: &Path) -> Self {
        let settings = match read_settings(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => return Self::default(),
            Err(err) => {
                log::warn!(
                    "Using default settings, could not load {}: {:#}",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };

        if let Err(err) = settings.slot_calendar() {
            log::warn!("Settings in {} are invalid ({}), using defaults", path.display(), err);
            return Self::default();
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let data = toml::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Platform config path for the settings file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "quarterlog")
            .context("could not determine a platform config directory")?;
        Ok(dirs.config_dir().join("settings.toml"))
    }
}

fn read_settings(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings =
        toml::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(settings))
}
