//! The fixed slot axis for a day.
//!
//! A day is divided into discrete 15-minute slots between a configurable
//! start and end hour (06:00 through 23:00 by default, 68 slots). Every
//! activity starts and ends on this grid, and all slot ordering is defined
//! by position in the sequence rather than by comparing time labels.

use chrono::{Duration, NaiveTime};

/// The ordered, finite sequence of valid slots for one day.
///
/// Static configuration, never derived from activity data. Slots are
/// identified by their start time; a slot's interval is half-open
/// (`[slot, slot + step)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCalendar {
    day_start: NaiveTime,
    day_end: NaiveTime,
    step_minutes: u32,
}

impl Default for SlotCalendar {
    fn default() -> Self {
        Self {
            day_start: NaiveTime::MIN + Duration::hours(6),
            day_end: NaiveTime::MIN + Duration::hours(23),
            step_minutes: 15,
        }
    }
}

impl SlotCalendar {
    /// Create a calendar spanning `start_hour:00` to `end_hour:00` in
    /// `step_minutes` increments.
    pub fn new(start_hour: u32, end_hour: u32, step_minutes: u32) -> Result<Self, SlotCalendarError> {
        if start_hour >= end_hour || end_hour > 23 {
            return Err(SlotCalendarError::InvalidWindow);
        }
        if step_minutes == 0 || 60 % step_minutes != 0 {
            return Err(SlotCalendarError::InvalidStep);
        }

        let day_start = NaiveTime::from_hms_opt(start_hour, 0, 0)
            .ok_or(SlotCalendarError::InvalidWindow)?;
        let day_end = NaiveTime::from_hms_opt(end_hour, 0, 0)
            .ok_or(SlotCalendarError::InvalidWindow)?;

        Ok(Self {
            day_start,
            day_end,
            step_minutes,
        })
    }

    /// First schedulable instant of the day.
    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    /// End of the schedulable window (exclusive; a valid activity end time).
    pub fn day_end(&self) -> NaiveTime {
        self.day_end
    }

    /// Grid increment in minutes.
    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Number of slots in the day.
    pub fn slot_count(&self) -> usize {
        let window = (self.day_end - self.day_start).num_minutes();
        (window / self.step_minutes as i64) as usize
    }

    /// All slots in calendar order.
    pub fn slots(&self) -> Vec<NaiveTime> {
        (0..self.slot_count())
            .map(|i| self.day_start + Duration::minutes(i as i64 * self.step_minutes as i64))
            .collect()
    }

    /// Position of a slot in the sequence, or `None` when the time is off
    /// the grid or outside the window.
    pub fn index_of(&self, slot: NaiveTime) -> Option<usize> {
        if slot < self.day_start || slot >= self.day_end {
            return None;
        }
        let offset = (slot - self.day_start).num_seconds();
        let step = self.step_minutes as i64 * 60;
        if offset % step != 0 {
            return None;
        }
        Some((offset / step) as usize)
    }

    /// Slot at the given position.
    pub fn slot_at(&self, index: usize) -> Option<NaiveTime> {
        if index >= self.slot_count() {
            return None;
        }
        Some(self.day_start + Duration::minutes(index as i64 * self.step_minutes as i64))
    }

    /// Whether the time names a slot on this calendar.
    pub fn contains(&self, slot: NaiveTime) -> bool {
        self.index_of(slot).is_some()
    }

    /// Whether the time is a valid interval boundary: a slot start, or the
    /// end of the window.
    pub fn is_boundary(&self, time: NaiveTime) -> bool {
        time == self.day_end || self.contains(time)
    }

    /// The instant one grid step after the slot, i.e. the exclusive end of
    /// the slot's interval. Callers pass slots from this calendar.
    pub fn slot_end(&self, slot: NaiveTime) -> NaiveTime {
        slot + Duration::minutes(self.step_minutes as i64)
    }

    /// Slot labels covered by the half-open interval `[start, end)`,
    /// stepping at grid granularity.
    pub fn slots_between(&self, start: NaiveTime, end: NaiveTime) -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let mut current = start;
        while current < end {
            slots.push(current);
            current += Duration::minutes(self.step_minutes as i64);
        }
        slots
    }
}

/// Validation errors for calendar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCalendarError {
    /// Start hour must come before end hour, and the window must fit in a day.
    InvalidWindow,
    /// Step must be a positive divisor of 60.
    InvalidStep,
}

impl std::fmt::Display for SlotCalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWindow => write!(f, "Day window must start before it ends, within 00-23"),
            Self::InvalidStep => write!(f, "Slot step must be a positive divisor of 60 minutes"),
        }
    }
}

impl std::error::Error for SlotCalendarError {}
