//! Repository contracts shared by analytics and entry flows.

use crate::db::DbError;
use crate::model::journal::JournalEntry;
use crate::model::mood::MoodEntry;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::model::{RecordId, RecordKind, RecordValidationError};
use crate::time::TimeRange;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    NotFound { kind: RecordKind, id: RecordId },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Task-specific predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// `created_at` within range.
    CreatedIn(TimeRange),
    /// Completed tasks whose `completion_date` is within range.
    CompletedIn(TimeRange),
}

impl TaskFilter {
    pub fn range(&self) -> TimeRange {
        match self {
            Self::CreatedIn(range) | Self::CompletedIn(range) => *range,
        }
    }
}

/// Kind plus predicate for `RecordStore::count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    Tasks(TaskFilter),
    /// Notes created within range.
    Notes(TimeRange),
    /// Journal entries created within range.
    JournalEntries(TimeRange),
    /// Mood entries created within range.
    MoodEntries(TimeRange),
}

impl RecordFilter {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Tasks(_) => RecordKind::Task,
            Self::Notes(_) => RecordKind::Note,
            Self::JournalEntries(_) => RecordKind::JournalEntry,
            Self::MoodEntries(_) => RecordKind::MoodEntry,
        }
    }

    pub fn range(&self) -> TimeRange {
        match self {
            Self::Tasks(filter) => filter.range(),
            Self::Notes(range) | Self::JournalEntries(range) | Self::MoodEntries(range) => *range,
        }
    }
}

/// Read-only view used by analytics.
pub trait RecordStore {
    /// Counts records matching `filter`.
    fn count(&self, filter: &RecordFilter) -> RepoResult<u64>;
    /// Fetches tasks matching `filter`, oldest first.
    fn fetch_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>>;
    /// Fetches notes created within `range`, oldest first.
    fn fetch_notes(&self, range: &TimeRange) -> RepoResult<Vec<Note>>;
    /// Fetches journal entries created within `range`, oldest first.
    fn fetch_journal_entries(&self, range: &TimeRange) -> RepoResult<Vec<JournalEntry>>;
    /// Fetches mood entries created within `range`, oldest first.
    fn fetch_mood_entries(&self, range: &TimeRange) -> RepoResult<Vec<MoodEntry>>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn count(&self, filter: &RecordFilter) -> RepoResult<u64> {
        (**self).count(filter)
    }

    fn fetch_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>> {
        (**self).fetch_tasks(filter)
    }

    fn fetch_notes(&self, range: &TimeRange) -> RepoResult<Vec<Note>> {
        (**self).fetch_notes(range)
    }

    fn fetch_journal_entries(&self, range: &TimeRange) -> RepoResult<Vec<JournalEntry>> {
        (**self).fetch_journal_entries(range)
    }

    fn fetch_mood_entries(&self, range: &TimeRange) -> RepoResult<Vec<MoodEntry>> {
        (**self).fetch_mood_entries(range)
    }
}

/// Write contract used by entry flows.
pub trait RecordRepository {
    fn create_task(&self, task: &Task) -> RepoResult<RecordId>;
    /// Replaces every mutable task column.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>>;
    fn create_note(&self, note: &Note) -> RepoResult<RecordId>;
    /// Inserts the entry and its gratitude lines atomically.
    fn create_journal_entry(&self, entry: &JournalEntry) -> RepoResult<RecordId>;
    fn create_mood_entry(&self, entry: &MoodEntry) -> RepoResult<RecordId>;
    /// Hard-deletes one record; `NotFound` when absent.
    fn delete_record(&self, kind: RecordKind, id: RecordId) -> RepoResult<()>;
}

impl<T: RecordRepository + ?Sized> RecordRepository for &T {
    fn create_task(&self, task: &Task) -> RepoResult<RecordId> {
        (**self).create_task(task)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        (**self).update_task(task)
    }

    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        (**self).get_task(id)
    }

    fn create_note(&self, note: &Note) -> RepoResult<RecordId> {
        (**self).create_note(note)
    }

    fn create_journal_entry(&self, entry: &JournalEntry) -> RepoResult<RecordId> {
        (**self).create_journal_entry(entry)
    }

    fn create_mood_entry(&self, entry: &MoodEntry) -> RepoResult<RecordId> {
        (**self).create_mood_entry(entry)
    }

    fn delete_record(&self, kind: RecordKind, id: RecordId) -> RepoResult<()> {
        (**self).delete_record(kind, id)
    }
}
