mod common;

use common::{noon, seed_journal, seed_mood, seed_note, seed_task, store, DAY_MS, MONDAY_MS};
use lifelog_core::db::open_db_in_memory;
use lifelog_core::{
    JournalEntry, MoodEntry, RecordFilter, RecordKind, RecordRepository, RecordStore,
    RecordValidationError, RepoError, SqliteRecordStore, Task, TaskFilter, TaskPriority, TimeRange,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn counts_use_half_open_ranges() {
    let store = store();
    seed_note(&store, "at start", MONDAY_MS);
    seed_note(&store, "inside", MONDAY_MS + 1);
    seed_note(&store, "at end", MONDAY_MS + DAY_MS);

    let day = TimeRange::days_from(MONDAY_MS, 1);
    assert_eq!(store.count(&RecordFilter::Notes(day)).unwrap(), 2);

    let empty = TimeRange::new(MONDAY_MS, MONDAY_MS).unwrap();
    assert_eq!(store.count(&RecordFilter::Notes(empty)).unwrap(), 0);
}

#[test]
fn completed_filter_matches_completion_date_not_creation() {
    let store = store();
    let week = TimeRange::days_from(MONDAY_MS, 7);
    // Created last year, finished this week.
    seed_task(&store, MONDAY_MS - 400 * DAY_MS, Some(noon(2)), TaskPriority::High);
    // Created this week, still open.
    seed_task(&store, noon(1), None, TaskPriority::Low);
    // Created and finished this week.
    seed_task(&store, noon(0), Some(noon(3)), TaskPriority::Medium);

    let completed = RecordFilter::Tasks(TaskFilter::CompletedIn(week));
    let created = RecordFilter::Tasks(TaskFilter::CreatedIn(week));
    assert_eq!(store.count(&completed).unwrap(), 2);
    assert_eq!(store.count(&created).unwrap(), 2);

    let fetched = store.fetch_tasks(&TaskFilter::CompletedIn(week)).unwrap();
    let order: Vec<Option<i64>> = fetched.iter().map(|task| task.completion_date_ms).collect();
    assert_eq!(order, vec![Some(noon(2)), Some(noon(3))]);
}

#[test]
fn task_update_roundtrip() {
    let store = store();
    let mut task = seed_task(&store, noon(0), None, TaskPriority::Medium);

    task.complete(noon(1));
    task.priority = TaskPriority::High;
    store.update_task(&task).unwrap();

    let loaded = store.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[test]
fn update_missing_task_returns_not_found() {
    let store = store();
    let task = Task::new("ghost", TaskPriority::Low, 0);
    let err = store.update_task(&task).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Task,
            ..
        }
    ));
}

#[test]
fn invalid_task_is_rejected_before_sql() {
    let store = store();
    let mut task = Task::new("done?", TaskPriority::Low, 0);
    task.is_completed = true;
    let err = store.create_task(&task).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::MissingCompletionDate)
    ));
    assert_eq!(
        store
            .count(&RecordFilter::Tasks(TaskFilter::CreatedIn(TimeRange::days_from(0, 1))))
            .unwrap(),
        0
    );
}

#[test]
fn journal_entries_keep_gratitude_order_and_prompt() {
    let store = store();
    let mut entry = JournalEntry::new("thankful day", noon(0));
    entry.gratitude_entries = vec![
        "sunlight".to_string(),
        "friends".to_string(),
        "a quiet morning".to_string(),
    ];
    entry.prompt = Some("What made you smile?".to_string());
    store.create_journal_entry(&entry).unwrap();
    seed_journal(&store, noon(1));

    let fetched = store
        .fetch_journal_entries(&TimeRange::days_from(MONDAY_MS, 7))
        .unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0], entry);
    assert!(fetched[1].gratitude_entries.is_empty());
    assert_eq!(fetched[1].prompt, None);
}

#[test]
fn mood_ratings_outside_storage_scale_are_rejected() {
    let store = store();
    let err = store.create_mood_entry(&MoodEntry::new(11, 0)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::MoodRatingOutOfRange { rating: 11, max: 10 })
    ));

    seed_mood(&store, 10, noon(0));
    let fetched = store
        .fetch_mood_entries(&TimeRange::days_from(MONDAY_MS, 1))
        .unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].rating, 10);
}

#[test]
fn delete_record_removes_rows_and_reports_missing() {
    let store = store();
    let entry = seed_journal(&store, noon(0));
    let mut with_gratitude = JournalEntry::new("list", noon(0));
    with_gratitude.gratitude_entries = vec!["tea".to_string()];
    store.create_journal_entry(&with_gratitude).unwrap();

    store
        .delete_record(RecordKind::JournalEntry, with_gratitude.id)
        .unwrap();
    store.delete_record(RecordKind::JournalEntry, entry.id).unwrap();

    let remaining: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM journal_gratitude;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);

    let err = store
        .delete_record(RecordKind::Note, Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Note,
            ..
        }
    ));
}

#[test]
fn malformed_rows_are_reported_not_masked() {
    let store = store();
    store
        .connection()
        .execute(
            "INSERT INTO notes (uuid, content, created_at) VALUES ('not-a-uuid', 'x', ?1);",
            [noon(0)],
        )
        .unwrap();

    let err = store
        .fetch_notes(&TimeRange::days_from(MONDAY_MS, 1))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn try_new_requires_migrated_connection() {
    let raw = Connection::open_in_memory().unwrap();
    let err = SqliteRecordStore::try_new(raw).err().unwrap();
    assert!(err.to_string().contains("missing required table"));

    assert!(SqliteRecordStore::try_new(open_db_in_memory().unwrap()).is_ok());
}
