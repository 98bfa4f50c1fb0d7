#![allow(dead_code)]

use lifelog_core::{
    AnalyticsAggregator, Calendar, FixedClock, JournalEntry, MoodEntry, Note, RecordRepository,
    RecordStore, SqliteRecordStore, Task, TaskPriority,
};
use std::sync::Arc;

/// 2024-01-01T00:00:00Z, a Monday.
pub const MONDAY_MS: i64 = 1_704_067_200_000;
pub const HOUR_MS: i64 = 60 * 60 * 1000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Noon UTC on `MONDAY + day_offset` days.
pub fn noon(day_offset: i64) -> i64 {
    MONDAY_MS + day_offset * DAY_MS + 12 * HOUR_MS
}

pub fn store() -> SqliteRecordStore {
    SqliteRecordStore::open_in_memory().unwrap()
}

pub fn aggregator<S: RecordStore>(store: S, now_ms: i64) -> AnalyticsAggregator<S> {
    AnalyticsAggregator::new(store, Calendar::utc(), Arc::new(FixedClock::new(now_ms)))
}

pub fn seed_task(
    store: &SqliteRecordStore,
    created_at_ms: i64,
    completed_at_ms: Option<i64>,
    priority: TaskPriority,
) -> Task {
    let mut task = Task::new("seeded task", priority, created_at_ms);
    if let Some(at) = completed_at_ms {
        task.complete(at);
    }
    store.create_task(&task).unwrap();
    task
}

pub fn seed_note(store: &SqliteRecordStore, content: &str, created_at_ms: i64) -> Note {
    let note = Note::new(content, created_at_ms);
    store.create_note(&note).unwrap();
    note
}

pub fn seed_journal(store: &SqliteRecordStore, created_at_ms: i64) -> JournalEntry {
    let entry = JournalEntry::new("entry", created_at_ms);
    store.create_journal_entry(&entry).unwrap();
    entry
}

pub fn seed_mood(store: &SqliteRecordStore, rating: u8, created_at_ms: i64) -> MoodEntry {
    let entry = MoodEntry::new(rating, created_at_ms);
    store.create_mood_entry(&entry).unwrap();
    entry
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
