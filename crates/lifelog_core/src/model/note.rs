//! Note record.

use super::RecordId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub content: String,
    pub created_at_ms: i64,
}

impl Note {
    pub fn new(content: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at_ms,
        }
    }

    /// Character count of `content` (Unicode scalar values, not bytes).
    pub fn length(&self) -> usize {
        self.content.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(Note::new("héllo", 0).length(), 5);
    }
}
