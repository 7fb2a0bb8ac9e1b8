//! Derived slot-to-activity lookup for one day.
//!
//! Rebuilt on demand from the current store snapshot; never persisted.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::activity::Activity;
use crate::models::category::Category;
use crate::models::slot::SlotCalendar;
use crate::services::store::ActivityStore;

/// An activity occupying a slot, with its category resolved (or not, when
/// the reference dangles).
#[derive(Debug, Clone, PartialEq)]
pub struct OccupiedSlot {
    pub activity: Activity,
    pub category: Option<Category>,
}

/// Read-only mapping from slot to the activity occupying it.
#[derive(Debug, Default)]
pub struct OccupancyIndex {
    slots: HashMap<NaiveTime, OccupiedSlot>,
}

impl OccupancyIndex {
    /// Build the index by walking each activity's slot span at grid
    /// granularity. Activities are invariantly non-overlapping, so no slot
    /// is written twice; should one ever be, the later activity wins.
    pub fn build<'a>(
        activities: impl IntoIterator<Item = &'a Activity>,
        categories: &[Category],
        calendar: &SlotCalendar,
    ) -> Self {
        let mut slots = HashMap::new();

        for activity in activities {
            let category = categories
                .iter()
                .find(|c| c.id == activity.category_id)
                .cloned();

            for slot in calendar.slots_between(activity.start_time, activity.end_time) {
                let previous = slots.insert(
                    slot,
                    OccupiedSlot {
                        activity: activity.clone(),
                        category: category.clone(),
                    },
                );
                if let Some(previous) = previous {
                    log::warn!(
                        "Slot {} claimed by both '{}' and '{}'",
                        slot.format("%H:%M"),
                        previous.activity.id,
                        activity.id
                    );
                }
            }
        }

        Self { slots }
    }

    /// Convenience: index for one date of a store.
    pub fn for_date(store: &ActivityStore, calendar: &SlotCalendar, date: NaiveDate) -> Self {
        Self::build(
            store.for_date(date).into_iter(),
            store.categories(),
            calendar,
        )
    }

    pub fn is_occupied(&self, slot: NaiveTime) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn get(&self, slot: NaiveTime) -> Option<&OccupiedSlot> {
        self.slots.get(&slot)
    }

    /// The activity owning a slot, if any.
    pub fn activity_at(&self, slot: NaiveTime) -> Option<&Activity> {
        self.slots.get(&slot).map(|o| &o.activity)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::default_categories;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn activity(start: NaiveTime, end: NaiveTime, category_id: &str) -> Activity {
        Activity::new(d(2025, 3, 10), start, end, "Block", category_id)
    }

    #[test]
    fn indexes_every_slot_of_an_activity() {
        let cal = SlotCalendar::default();
        let a = activity(t(13, 0), t(14, 30), "work");
        let index = OccupancyIndex::build([&a], &default_categories(), &cal);

        assert_eq!(index.occupied_count(), 6);
        for slot in [t(13, 0), t(13, 15), t(13, 30), t(13, 45), t(14, 0), t(14, 15)] {
            assert!(index.is_occupied(slot));
            assert_eq!(index.activity_at(slot).map(|a| a.id.as_str()), Some(a.id.as_str()));
        }
        // End is exclusive
        assert!(!index.is_occupied(t(14, 30)));
    }

    #[test]
    fn resolves_category() {
        let cal = SlotCalendar::default();
        let a = activity(t(9, 0), t(9, 15), "work");
        let index = OccupancyIndex::build([&a], &default_categories(), &cal);

        let occupied = index.get(t(9, 0)).unwrap();
        assert_eq!(occupied.category.as_ref().map(|c| c.name.as_str()), Some("Work"));
    }

    #[test]
    fn dangling_category_resolves_to_none() {
        let cal = SlotCalendar::default();
        let a = activity(t(9, 0), t(9, 15), "deleted-category");
        let index = OccupancyIndex::build([&a], &default_categories(), &cal);

        assert!(index.get(t(9, 0)).unwrap().category.is_none());
    }

    #[test]
    fn empty_day_has_no_occupancy() {
        let cal = SlotCalendar::default();
        let none: &[Activity] = &[];
        let index = OccupancyIndex::build(none, &default_categories(), &cal);
        assert_eq!(index.occupied_count(), 0);
        assert!(!index.is_occupied(t(9, 0)));
    }

    #[test]
    fn for_date_only_sees_that_day() {
        let cal = SlotCalendar::default();
        let mut store = ActivityStore::in_memory();
        let mut other_day = activity(t(9, 0), t(10, 0), "work");
        other_day.date = d(2025, 3, 11);
        store.replace_activities(vec![activity(t(9, 0), t(10, 0), "work"), other_day]);

        let index = OccupancyIndex::for_date(&store, &cal, d(2025, 3, 10));
        assert_eq!(index.occupied_count(), 4);
    }
}
