//! Turns a finalized slot selection into a persisted activity.
//!
//! Saving is an unconditional overwrite: the edited activity's previous
//! version and every activity overlapping the candidate's interval are
//! dropped before the candidate is inserted, so the per-date non-overlap
//! invariant holds after every commit. The whole collection is persisted as
//! one unit.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::models::activity::Activity;
use crate::models::slot::SlotCalendar;
use crate::services::store::ActivityStore;

/// Errors surfaced by the commit engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// Category unselected; the caller blocks submission and re-prompts.
    #[error("an activity needs a category")]
    MissingCategory,
    /// Zero slots selected; callers treat this as a silent no-op.
    #[error("no slots selected")]
    EmptySelection,
    /// A selected slot is not on the calendar grid.
    #[error("slot {0} is outside the schedulable window")]
    UnknownSlot(NaiveTime),
    /// Energy level outside 1-10.
    #[error("energy level {0} is outside 1-10")]
    InvalidEnergyLevel(u8),
    /// Delete asked for an id the store does not hold.
    #[error("no activity with id '{0}'")]
    UnknownActivity(String),
}

/// User input for a create or update, as collected by the activity modal.
#[derive(Debug, Clone, Default)]
pub struct CommitRequest {
    /// The finalized slot set, in any order
    pub slots: Vec<NaiveTime>,
    pub description: String,
    pub category_id: String,
    pub energy_level: Option<u8>,
    /// Set when the modal was opened on an existing activity
    pub editing_activity_id: Option<String>,
}

/// Commit a new or edited activity for `date`.
///
/// The interval spans from the earliest selected slot to one grid step past
/// the latest. A selection with internal gaps (from dragging across an
/// occupied slot) spans the full outer range; the slots freed in between are
/// absorbed, and whatever sat there is evicted like any other overlap.
pub fn commit(
    store: &mut ActivityStore,
    calendar: &SlotCalendar,
    date: NaiveDate,
    request: CommitRequest,
) -> Result<Activity, CommitError> {
    if request.slots.is_empty() {
        return Err(CommitError::EmptySelection);
    }
    if request.category_id.trim().is_empty() {
        return Err(CommitError::MissingCategory);
    }
    if let Some(level) = request.energy_level {
        if !(1..=10).contains(&level) {
            return Err(CommitError::InvalidEnergyLevel(level));
        }
    }

    // Order the selection by calendar position, never by label comparison.
    let mut ordered = Vec::with_capacity(request.slots.len());
    for slot in &request.slots {
        let index = calendar
            .index_of(*slot)
            .ok_or(CommitError::UnknownSlot(*slot))?;
        ordered.push((index, *slot));
    }
    ordered.sort_unstable_by_key(|(index, _)| *index);

    let start_time = ordered[0].1;
    let end_time = calendar.slot_end(ordered[ordered.len() - 1].1);

    let candidate = Activity {
        id: request
            .editing_activity_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        date,
        start_time,
        end_time,
        description: request.description,
        category_id: request.category_id,
        energy_level: request.energy_level,
    };

    // Drop the edited activity's previous version and everything the new
    // interval overlaps, then insert.
    let mut kept: Vec<Activity> = store
        .activities()
        .iter()
        .filter(|a| {
            if Some(a.id.as_str()) == request.editing_activity_id.as_deref() {
                return false;
            }
            !a.overlaps(&candidate)
        })
        .cloned()
        .collect();

    let evicted = store.activities().len() - kept.len();
    if evicted > 0 {
        log::info!(
            "Committing '{}' {}..{} on {}: evicting {} conflicting activities",
            candidate.id,
            start_time.format("%H:%M"),
            end_time.format("%H:%M"),
            date,
            evicted
        );
    }

    kept.push(candidate.clone());
    store.replace_activities(kept);

    Ok(candidate)
}

/// Delete an activity by id. The caller guarantees the id exists; a miss is
/// reported as an error rather than silently ignored.
pub fn delete(store: &mut ActivityStore, activity_id: &str) -> Result<(), CommitError> {
    if store.activity(activity_id).is_none() {
        return Err(CommitError::UnknownActivity(activity_id.to_string()));
    }

    let kept: Vec<Activity> = store
        .activities()
        .iter()
        .filter(|a| a.id != activity_id)
        .cloned()
        .collect();

    log::info!("Deleted activity '{}'", activity_id);
    store.replace_activities(kept);
    Ok(())
}
