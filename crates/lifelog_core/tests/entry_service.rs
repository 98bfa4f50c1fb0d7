mod common;

use common::{noon, store};
use lifelog_core::{
    EntryService, JournalDraft, JournalEntryType, MoodScale, RecordKind, RecordRepository,
    RecordValidationError, RepoError, TaskPriority,
};
use uuid::Uuid;

#[test]
fn create_task_trims_title_and_rejects_blank() {
    let store = store();
    let service = EntryService::new(&store, MoodScale::TEN_POINT);

    let task = service
        .create_task("  water plants  ", TaskPriority::Low, noon(0))
        .unwrap();
    assert_eq!(task.title, "water plants");
    assert!(!task.is_completed);
    assert_eq!(store.get_task(task.id).unwrap(), Some(task));

    let err = service
        .create_task("   ", TaskPriority::Low, noon(0))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::EmptyTitle)
    ));
}

#[test]
fn complete_task_is_idempotent_and_reopen_clears_date() {
    let store = store();
    let service = EntryService::new(&store, MoodScale::TEN_POINT);
    let task = service
        .create_task("file taxes", TaskPriority::High, noon(0))
        .unwrap();

    let first = service.complete_task(task.id, noon(1)).unwrap();
    assert_eq!(first.completion_date_ms, Some(noon(1)));

    let second = service.complete_task(task.id, noon(2)).unwrap();
    assert_eq!(second.completion_date_ms, Some(noon(1)));

    let reopened = service.reopen_task(task.id).unwrap();
    assert!(!reopened.is_completed);
    assert_eq!(
        store.get_task(task.id).unwrap().unwrap().completion_date_ms,
        None
    );
}

#[test]
fn complete_unknown_task_returns_not_found() {
    let store = store();
    let service = EntryService::new(&store, MoodScale::TEN_POINT);
    let err = service.complete_task(Uuid::new_v4(), noon(0)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Task,
            ..
        }
    ));
}

#[test]
fn log_mood_uses_configured_scale() {
    let store = store();
    let five_point = EntryService::new(&store, MoodScale::FIVE_POINT);

    let err = five_point.log_mood(6, None, noon(0)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::MoodRatingOutOfRange { rating: 6, max: 5 })
    ));

    let entry = five_point
        .log_mood(4, Some("  ".to_string()), noon(0))
        .unwrap();
    assert_eq!(entry.note, None);

    let ten_point = EntryService::new(&store, MoodScale::TEN_POINT);
    assert!(ten_point.log_mood(6, None, noon(0)).is_ok());
}

#[test]
fn journal_draft_drops_blank_gratitude_and_prompt() {
    let store = store();
    let service = EntryService::new(&store, MoodScale::TEN_POINT);

    let entry = service
        .create_journal_entry(
            JournalDraft {
                content: "ordinary day".to_string(),
                is_dream: false,
                gratitude_entries: vec!["  ".to_string(), String::new()],
                prompt: Some("   ".to_string()),
            },
            noon(0),
        )
        .unwrap();
    assert!(entry.gratitude_entries.is_empty());
    assert_eq!(entry.prompt, None);
    assert_eq!(entry.entry_type(), JournalEntryType::Daily);

    let gratitude = service
        .create_journal_entry(
            JournalDraft {
                content: "good day".to_string(),
                gratitude_entries: vec![" rain ".to_string()],
                ..JournalDraft::default()
            },
            noon(0),
        )
        .unwrap();
    assert_eq!(gratitude.gratitude_entries, vec!["rain".to_string()]);
    assert_eq!(gratitude.entry_type(), JournalEntryType::Gratitude);
}

#[test]
fn delete_removes_note() {
    let store = store();
    let service = EntryService::new(&store, MoodScale::TEN_POINT);
    let note = service.create_note("scratch", noon(0)).unwrap();

    service.delete(RecordKind::Note, note.id).unwrap();
    let err = service.delete(RecordKind::Note, note.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}
