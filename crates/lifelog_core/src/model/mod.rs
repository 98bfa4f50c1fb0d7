//! Record models for tasks, notes, journal entries and mood check-ins.
//!
//! # Responsibility
//! - Define the entities persisted by the record store and read by analytics.
//! - Own per-record validation applied before every write.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Timestamps are Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod journal;
pub mod mood;
pub mod note;
pub mod task;

/// Stable identifier shared by every record kind.
pub type RecordId = Uuid;

/// Discriminates the four persisted record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Task,
    Note,
    JournalEntry,
    MoodEntry,
}

impl RecordKind {
    /// Returns the stable snake_case name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Note => "note",
            Self::JournalEntry => "journal_entry",
            Self::MoodEntry => "mood_entry",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure raised before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Task title is empty after trimming.
    EmptyTitle,
    /// `is_completed == true` but no completion timestamp is set.
    MissingCompletionDate,
    /// Completion timestamp is set on an open task.
    UnexpectedCompletionDate,
    /// Mood rating outside `1..=max`.
    MoodRatingOutOfRange { rating: u8, max: u8 },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::MissingCompletionDate => {
                write!(f, "completed task must carry a completion date")
            }
            Self::UnexpectedCompletionDate => {
                write!(f, "open task cannot carry a completion date")
            }
            Self::MoodRatingOutOfRange { rating, max } => {
                write!(f, "mood rating {rating} is outside 1..={max}")
            }
        }
    }
}

impl Error for RecordValidationError {}
