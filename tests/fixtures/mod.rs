// Test fixtures - reusable test data
// Shared constructors so every test file builds the same shapes of data.

use chrono::{NaiveDate, NaiveTime};
use quarterlog::models::activity::Activity;
use quarterlog::models::slot::SlotCalendar;
use quarterlog::services::commit::{commit, CommitRequest};
use quarterlog::services::store::ActivityStore;

pub fn slot(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A Monday used as the default test day.
pub fn monday() -> NaiveDate {
    date(2025, 3, 10)
}

/// Commit an activity through the real engine, so fixtures obey the same
/// invariants production data does.
pub fn log_activity(
    store: &mut ActivityStore,
    calendar: &SlotCalendar,
    day: NaiveDate,
    slots: Vec<NaiveTime>,
    description: &str,
    category_id: &str,
) -> Activity {
    commit(
        store,
        calendar,
        day,
        CommitRequest {
            slots,
            description: description.to_string(),
            category_id: category_id.to_string(),
            energy_level: None,
            editing_activity_id: None,
        },
    )
    .expect("fixture commit should succeed")
}

/// Consecutive slots starting at `start`, `count` long.
pub fn slot_run(calendar: &SlotCalendar, start: NaiveTime, count: usize) -> Vec<NaiveTime> {
    let first = calendar.index_of(start).expect("fixture slot on grid");
    (first..first + count)
        .map(|i| calendar.slot_at(i).expect("fixture run stays on grid"))
        .collect()
}
