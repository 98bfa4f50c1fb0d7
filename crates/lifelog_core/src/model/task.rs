//! Task record.
//!
//! # Invariants
//! - `completion_date_ms` is `Some` exactly when `is_completed` is true.
//! - `title` is never blank.

use super::{RecordId, RecordValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the storage representation, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub is_completed: bool,
    /// Epoch milliseconds of completion. Only set for completed tasks.
    pub completion_date_ms: Option<i64>,
    pub created_at_ms: i64,
    pub priority: TaskPriority,
}

impl Task {
    /// Creates an open task with a generated id.
    pub fn new(title: impl Into<String>, priority: TaskPriority, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
            completion_date_ms: None,
            created_at_ms,
            priority,
        }
    }

    /// Marks the task completed at `at_ms`.
    pub fn complete(&mut self, at_ms: i64) {
        self.is_completed = true;
        self.completion_date_ms = Some(at_ms);
    }

    /// Returns the task to the open state and clears its completion date.
    pub fn reopen(&mut self) {
        self.is_completed = false;
        self.completion_date_ms = None;
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecordValidationError::EmptyTitle);
        }
        match (self.is_completed, self.completion_date_ms) {
            (true, None) => Err(RecordValidationError::MissingCompletionDate),
            (false, Some(_)) => Err(RecordValidationError::UnexpectedCompletionDate),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPriority};
    use crate::model::RecordValidationError;

    #[test]
    fn complete_and_reopen_keep_completion_invariant() {
        let mut task = Task::new("write report", TaskPriority::High, 1_000);
        assert!(task.validate().is_ok());

        task.complete(2_000);
        assert_eq!(task.completion_date_ms, Some(2_000));
        assert!(task.validate().is_ok());

        task.reopen();
        assert!(!task.is_completed);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_title_and_dangling_completion() {
        let blank = Task::new("   ", TaskPriority::Low, 0);
        assert_eq!(blank.validate(), Err(RecordValidationError::EmptyTitle));

        let mut dangling = Task::new("x", TaskPriority::Low, 0);
        dangling.completion_date_ms = Some(5);
        assert_eq!(
            dangling.validate(),
            Err(RecordValidationError::UnexpectedCompletionDate)
        );
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(TaskPriority::parse(" HIGH "), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse("urgent"), None);
    }
}
