//! Derived daily views: time by category and the energy trend.
//!
//! Pure functions over a store snapshot, recomputed on demand.

use chrono::{NaiveDate, NaiveTime};

use crate::models::category::UNCATEGORIZED_COLOR;
use crate::services::store::ActivityStore;

/// Minutes logged against one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlice {
    /// `None` for the "Uncategorized" bucket of dangling references
    pub category_id: Option<String>,
    pub name: String,
    pub color: String,
    pub minutes: i64,
}

/// One day's totals, in category display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub total_minutes: i64,
    pub slices: Vec<CategorySlice>,
}

impl DaySummary {
    /// Compute totals for the date. Categories with no logged time are
    /// omitted; activities whose category was deleted fall into a trailing
    /// "Uncategorized" slice.
    pub fn compute(store: &ActivityStore, date: NaiveDate) -> Self {
        let activities = store.for_date(date);

        let mut total_minutes = 0;
        let mut uncategorized = 0;
        let mut per_category: Vec<(usize, i64)> = Vec::new();

        for activity in &activities {
            let minutes = activity.duration_minutes();
            total_minutes += minutes;

            match store
                .categories()
                .iter()
                .position(|c| c.id == activity.category_id)
            {
                Some(pos) => match per_category.iter_mut().find(|(p, _)| *p == pos) {
                    Some((_, sum)) => *sum += minutes,
                    None => per_category.push((pos, minutes)),
                },
                None => uncategorized += minutes,
            }
        }

        per_category.sort_by_key(|(pos, _)| *pos);

        let mut slices: Vec<CategorySlice> = per_category
            .into_iter()
            .map(|(pos, minutes)| {
                let category = &store.categories()[pos];
                CategorySlice {
                    category_id: Some(category.id.clone()),
                    name: category.name.clone(),
                    color: category.color.clone(),
                    minutes,
                }
            })
            .collect();

        if uncategorized > 0 {
            slices.push(CategorySlice {
                category_id: None,
                name: "Uncategorized".to_string(),
                color: UNCATEGORIZED_COLOR.to_string(),
                minutes: uncategorized,
            });
        }

        Self {
            total_minutes,
            slices,
        }
    }
}

/// Recorded energy levels over the day, ordered by start time.
pub fn energy_trend(store: &ActivityStore, date: NaiveDate) -> Vec<(NaiveTime, u8)> {
    let mut points: Vec<(NaiveTime, u8)> = store
        .for_date(date)
        .into_iter()
        .filter_map(|a| a.energy_level.map(|level| (a.start_time, level)))
        .collect();
    points.sort_by_key(|(start, _)| *start);
    points
}
