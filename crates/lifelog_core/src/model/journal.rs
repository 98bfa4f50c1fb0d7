//! Journal entry record and its derived entry type.
//!
//! # Invariants
//! - Entry type is never stored; it is derived on read by `entry_type()`.
//! - Classification priority: dream > gratitude > reflection > daily.

use super::RecordId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived journal entry category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEntryType {
    Daily,
    Dream,
    Gratitude,
    Reflection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: RecordId,
    pub content: String,
    pub created_at_ms: i64,
    pub is_dream: bool,
    /// Ordered gratitude lines; empty when the entry has none.
    pub gratitude_entries: Vec<String>,
    /// Reflection prompt the entry answers, if any.
    pub prompt: Option<String>,
}

impl JournalEntry {
    /// Creates a plain daily entry with a generated id.
    pub fn new(content: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at_ms,
            is_dream: false,
            gratitude_entries: Vec::new(),
            prompt: None,
        }
    }

    /// Classifies the entry. A dream that also lists gratitude is a dream.
    pub fn entry_type(&self) -> JournalEntryType {
        if self.is_dream {
            JournalEntryType::Dream
        } else if !self.gratitude_entries.is_empty() {
            JournalEntryType::Gratitude
        } else if self.prompt.as_deref().is_some_and(|prompt| !prompt.trim().is_empty()) {
            JournalEntryType::Reflection
        } else {
            JournalEntryType::Daily
        }
    }
}
