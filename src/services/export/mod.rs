//! CSV export of logged activities over a day, week or month.
//!
//! Consumes store data, never mutates it. Rows are sorted by (date, start
//! time); free-text fields are quoted with RFC 4180 quote doubling. An empty
//! window is a distinct signal the UI shows as a notice, not a fault.

use chrono::{Datelike, Duration, Months, NaiveDate};
use thiserror::Error;

use crate::models::activity::Activity;
use crate::services::store::ActivityStore;

/// The date window to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRange {
    /// A single day
    Day(NaiveDate),
    /// The Monday-starting week containing the date
    Week(NaiveDate),
    /// The calendar month containing the date
    Month(NaiveDate),
}

impl ExportRange {
    /// The half-open `[start, end)` date window.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Self::Day(date) => (date, date + Duration::days(1)),
            Self::Week(date) => {
                let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(7))
            }
            Self::Month(date) => {
                let first = date.with_day(1).unwrap_or(date);
                let next = first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                (first, next)
            }
        }
    }

    fn file_label(&self) -> String {
        let (start, _) = self.bounds();
        match self {
            Self::Day(_) => start.format("%Y-%m-%d").to_string(),
            Self::Week(_) => format!("week_{}", start.format("%Y-%m-%d")),
            Self::Month(_) => start.format("%Y-%m").to_string(),
        }
    }
}

/// Errors surfaced by the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Nothing logged in the requested window; shown as a notice.
    #[error("no activities in the selected range")]
    EmptyRange,
}

/// A ready-to-save CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

const HEADERS: [&str; 7] = [
    "Date",
    "Start Time",
    "End Time",
    "Duration (min)",
    "Description",
    "Category",
    "Energy",
];

/// Build the CSV for every activity inside the range.
pub fn export_csv(store: &ActivityStore, range: ExportRange) -> Result<CsvExport, ExportError> {
    let (start, end) = range.bounds();

    let mut activities: Vec<&Activity> = store
        .activities()
        .iter()
        .filter(|a| a.date >= start && a.date < end)
        .collect();

    if activities.is_empty() {
        return Err(ExportError::EmptyRange);
    }

    activities.sort_by_key(|a| (a.date, a.start_time));

    let mut lines = vec![HEADERS.join(",")];
    for activity in activities {
        let category = store
            .category(&activity.category_id)
            .map(|c| quote(&c.name))
            .unwrap_or_else(|| "Uncategorized".to_string());
        let energy = activity
            .energy_level
            .map(|l| l.to_string())
            .unwrap_or_default();

        lines.push(
            [
                activity.date.format("%Y-%m-%d").to_string(),
                activity.start_time.format("%H:%M").to_string(),
                activity.end_time.format("%H:%M").to_string(),
                activity.duration_minutes().to_string(),
                quote(&activity.description),
                category,
                energy,
            ]
            .join(","),
        );
    }

    log::info!("Exported {} rows for {:?}", lines.len() - 1, range);

    Ok(CsvExport {
        filename: format!("time_log_{}.csv", range.file_label()),
        content: lines.join("\n"),
    })
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
