// Integration tests: full flow from pointer gestures through commit to
// persisted JSON and back, across simulated app restarts.

mod fixtures;

use fixtures::{date, log_activity, monday, slot, slot_run};
use quarterlog::models::slot::SlotCalendar;
use quarterlog::services::category::CategoryService;
use quarterlog::services::commit::{commit, delete, CommitRequest};
use quarterlog::services::export::{export_csv, ExportError, ExportRange};
use quarterlog::services::occupancy::OccupancyIndex;
use quarterlog::services::selection::{SelectionEngine, SelectionOutcome};
use quarterlog::services::storage::Storage;
use quarterlog::services::store::ActivityStore;
use tempfile::tempdir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn drag_select_commit_reload_lifecycle() {
    init_logging();
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path());
    let calendar = SlotCalendar::default();

    // First launch: drag 09:00 -> 09:45 and save the result.
    {
        let mut store = ActivityStore::open(storage.clone());
        let occupancy = OccupancyIndex::for_date(&store, &calendar, monday());

        let mut engine = SelectionEngine::new();
        engine.pointer_down(slot(9, 0), &occupancy, &calendar);
        engine.pointer_enter(slot(9, 45), &occupancy, &calendar);
        let SelectionOutcome::OpenCreate { slots } = engine.pointer_up() else {
            panic!("drag should finalize into a create request");
        };

        commit(
            &mut store,
            &calendar,
            monday(),
            CommitRequest {
                slots,
                description: "Morning review".to_string(),
                category_id: "work".to_string(),
                energy_level: Some(7),
                editing_activity_id: None,
            },
        )
        .unwrap();
    }

    // Second launch: the activity is back and occupies its slots.
    {
        let store = ActivityStore::open(storage);
        assert_eq!(store.activities().len(), 1);

        let activity = &store.activities()[0];
        assert_eq!(activity.start_time, slot(9, 0));
        assert_eq!(activity.end_time, slot(10, 0));
        assert_eq!(activity.energy_level, Some(7));

        let occupancy = OccupancyIndex::for_date(&store, &calendar, monday());
        assert!(occupancy.is_occupied(slot(9, 45)));
        assert!(!occupancy.is_occupied(slot(10, 0)));
    }
}

#[test]
fn click_existing_activity_edits_in_place() {
    init_logging();
    let calendar = SlotCalendar::default();
    let mut store = ActivityStore::in_memory();
    let original = log_activity(
        &mut store,
        &calendar,
        monday(),
        slot_run(&calendar, slot(13, 0), 6), // [13:00, 14:30)
        "Workshop",
        "meeting",
    );

    let occupancy = OccupancyIndex::for_date(&store, &calendar, monday());
    let mut engine = SelectionEngine::new();

    let SelectionOutcome::OpenEdit { activity, slots } =
        engine.pointer_down(slot(14, 0), &occupancy, &calendar)
    else {
        panic!("press on an occupied slot should enter edit mode");
    };
    assert_eq!(activity.id, original.id);
    assert_eq!(slots, slot_run(&calendar, slot(13, 0), 6));

    // Re-save without changing the selection: same single activity, same id.
    commit(
        &mut store,
        &calendar,
        monday(),
        CommitRequest {
            slots,
            description: "Workshop (renamed)".to_string(),
            category_id: "meeting".to_string(),
            energy_level: None,
            editing_activity_id: Some(activity.id.clone()),
        },
    )
    .unwrap();

    assert_eq!(store.activities().len(), 1);
    assert_eq!(store.activities()[0].id, original.id);
    assert_eq!(store.activities()[0].description, "Workshop (renamed)");
}

#[test]
fn overwrite_is_persisted_across_restart() {
    init_logging();
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path());
    let calendar = SlotCalendar::default();

    {
        let mut store = ActivityStore::open(storage.clone());
        log_activity(&mut store, &calendar, monday(), slot_run(&calendar, slot(9, 0), 4), "A", "work");
        log_activity(&mut store, &calendar, monday(), slot_run(&calendar, slot(10, 0), 4), "B", "work");
        // C = [09:30, 10:30) clips both A and B
        log_activity(&mut store, &calendar, monday(), slot_run(&calendar, slot(9, 30), 4), "C", "work");
    }

    let store = ActivityStore::open(storage);
    assert_eq!(store.activities().len(), 1);
    assert_eq!(store.activities()[0].description, "C");
}

#[test]
fn deleting_a_category_leaves_activities_dangling() {
    init_logging();
    let calendar = SlotCalendar::default();
    let mut store = ActivityStore::in_memory();
    log_activity(&mut store, &calendar, monday(), vec![slot(12, 0)], "Lunch", "meals");

    CategoryService::new(&mut store).delete("meals").unwrap();

    // The activity survives with its dangling reference...
    assert_eq!(store.activities().len(), 1);
    assert_eq!(store.activities()[0].category_id, "meals");

    // ...and renders as uncategorized from here on.
    let occupancy = OccupancyIndex::for_date(&store, &calendar, monday());
    assert!(occupancy.get(slot(12, 0)).unwrap().category.is_none());

    let export = export_csv(&store, ExportRange::Day(monday())).unwrap();
    assert!(export.content.contains("Uncategorized"));
}

#[test]
fn export_week_with_no_activities_signals_empty() {
    init_logging();
    let calendar = SlotCalendar::default();
    let mut store = ActivityStore::in_memory();
    log_activity(&mut store, &calendar, monday(), vec![slot(9, 0)], "Only March", "work");

    let result = export_csv(&store, ExportRange::Week(date(2025, 6, 2)));
    assert_eq!(result, Err(ExportError::EmptyRange));
}

#[test]
fn delete_activity_frees_its_slots() {
    init_logging();
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path());
    let calendar = SlotCalendar::default();

    let id = {
        let mut store = ActivityStore::open(storage.clone());
        let activity = log_activity(
            &mut store,
            &calendar,
            monday(),
            slot_run(&calendar, slot(9, 0), 2),
            "Doomed",
            "work",
        );
        delete(&mut store, &activity.id).unwrap();
        activity.id
    };

    let store = ActivityStore::open(storage);
    assert!(store.activities().is_empty());
    assert!(store.activity(&id).is_none());
}

#[test]
fn corrupt_data_files_degrade_to_defaults() {
    init_logging();
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path());
    std::fs::write(storage.activities_path(), "{{{{").unwrap();
    std::fs::write(storage.categories_path(), "[]").unwrap();

    let store = ActivityStore::open(storage);
    assert!(store.activities().is_empty());
    // Empty stored categories reset to the built-in defaults
    assert!(!store.categories().is_empty());
    assert!(store.category("work").is_some());
}
