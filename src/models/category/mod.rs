//! Category model for classifying logged activities.
//!
//! Categories carry a display name and a hex color. Activities reference
//! categories by id; a reference is allowed to dangle after the category is
//! deleted, in which case display layers show "Uncategorized".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback color for activities whose category no longer exists.
pub const UNCATEGORIZED_COLOR: &str = "#64748b";

/// A category for classifying activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier. Built-in categories use stable slugs, user-created
    /// ones get a fresh UUID.
    pub id: String,
    /// Display name of the category
    pub name: String,
    /// Hex color code (e.g., "#2563eb")
    pub color: String,
}

impl Category {
    /// Create a new user category with a generated id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Create a category with a fixed id (built-in defaults, tests).
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Validate the category data.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong);
        }

        if !is_valid_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor);
        }

        Ok(())
    }
}

/// Validation errors for Category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong,
    InvalidColor,
}

impl std::fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong => write!(f, "Category name must be 50 characters or less"),
            Self::InvalidColor => write!(f, "Invalid color format (use hex like #FF0000)"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Check if a string is a valid hex color code.
fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    if !color.starts_with('#') {
        return false;
    }
    let hex = &color[1..];
    // Accept 3, 6, or 8 character hex codes
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// The categories the app ships with. Restored whenever the stored
/// collection turns up empty.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::with_id("work", "Work", "#2563eb"),
        Category::with_id("meeting", "Meeting", "#7c3aed"),
        Category::with_id("break", "Break", "#059669"),
        Category::with_id("exercise", "Exercise", "#ea580c"),
        Category::with_id("meals", "Meals", "#d97706"),
        Category::with_id("personal", "Personal", "#db2777"),
        Category::with_id("commute", "Commute", "#64748b"),
        Category::with_id("learning", "Learning", "#0891b2"),
        Category::with_id("social", "Social", "#dc2626"),
        Category::with_id("entertainment", "Entertainment", "#c026d3"),
        Category::with_id("household", "Household", "#65a30d"),
        Category::with_id("sleep", "Sleep", "#0d9488"),
    ]
}
