//! Activity model: a categorized block of time on one date.
//!
//! An activity occupies a contiguous run of slots, expressed as a half-open
//! `[start_time, end_time)` interval aligned to the slot grid. The stored
//! JSON uses camelCase keys with `"YYYY-MM-DD"` dates and `"HH:mm"` times.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::slot::SlotCalendar;

/// A user-logged, time-bounded, categorized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique across the whole store (UUID v4)
    pub id: String,
    /// The day the activity belongs to
    pub date: NaiveDate,
    /// First occupied slot (inclusive)
    #[serde(with = "slot_time")]
    pub start_time: NaiveTime,
    /// End of the interval (exclusive)
    #[serde(with = "slot_time")]
    pub end_time: NaiveTime,
    /// Free-text description
    pub description: String,
    /// Reference to `Category::id`; may dangle after the category is deleted
    pub category_id: String,
    /// Subjective energy during the activity, 1 (drained) to 10 (peak)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<u8>,
}

impl Activity {
    /// Create an activity with a fresh id. Fields are taken as given;
    /// grid alignment is checked by [`Activity::validate`].
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        description: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            start_time,
            end_time,
            description: description.into(),
            category_id: category_id.into(),
            energy_level: None,
        }
    }

    /// Validate interval and grid alignment against a calendar.
    pub fn validate(&self, calendar: &SlotCalendar) -> Result<(), ActivityValidationError> {
        if self.end_time <= self.start_time {
            return Err(ActivityValidationError::EndNotAfterStart);
        }
        if !calendar.contains(self.start_time) || !calendar.is_boundary(self.end_time) {
            return Err(ActivityValidationError::OffGrid);
        }
        if let Some(level) = self.energy_level {
            if !(1..=10).contains(&level) {
                return Err(ActivityValidationError::EnergyOutOfRange(level));
            }
        }
        Ok(())
    }

    /// Half-open interval overlap test. Activities on different dates never
    /// overlap; back-to-back intervals (one ending where the other starts)
    /// do not conflict.
    pub fn overlaps(&self, other: &Activity) -> bool {
        self.date == other.date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }

    /// Length of the activity in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Validation errors for Activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityValidationError {
    EndNotAfterStart,
    OffGrid,
    EnergyOutOfRange(u8),
}

impl std::fmt::Display for ActivityValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndNotAfterStart => write!(f, "Activity must end after it starts"),
            Self::OffGrid => write!(f, "Activity times must lie on the slot grid"),
            Self::EnergyOutOfRange(level) => {
                write!(f, "Energy level {} is outside 1-10", level)
            }
        }
    }
}

impl std::error::Error for ActivityValidationError {}

/// Serde adapter rendering times as zero-padded "HH:mm".
pub mod slot_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}
