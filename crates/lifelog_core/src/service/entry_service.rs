//! Entry use-case service.
//!
//! # Responsibility
//! - Create tasks, notes, journal entries and mood check-ins.
//! - Apply the configured mood scale, which may be narrower than storage allows.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Every successful write emits one metadata-only log event.

use crate::model::journal::JournalEntry;
use crate::model::mood::{MoodEntry, MoodScale};
use crate::model::note::Note;
use crate::model::task::{Task, TaskPriority};
use crate::model::{RecordId, RecordKind};
use crate::repo::record_store::{RecordRepository, RepoError, RepoResult};
use log::info;

/// Input for a new journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalDraft {
    pub content: String,
    pub is_dream: bool,
    pub gratitude_entries: Vec<String>,
    pub prompt: Option<String>,
}

/// Use-case wrapper over a record repository.
pub struct EntryService<R: RecordRepository> {
    repo: R,
    mood_scale: MoodScale,
}

impl<R: RecordRepository> EntryService<R> {
    pub fn new(repo: R, mood_scale: MoodScale) -> Self {
        Self { repo, mood_scale }
    }

    pub fn mood_scale(&self) -> MoodScale {
        self.mood_scale
    }

    /// Creates an open task.
    pub fn create_task(
        &self,
        title: impl Into<String>,
        priority: TaskPriority,
        now_ms: i64,
    ) -> RepoResult<Task> {
        let title = title.into();
        let task = Task::new(title.trim(), priority, now_ms);
        self.repo.create_task(&task)?;
        info!(
            "event=entry_create module=service status=ok kind=task priority={}",
            priority.as_str()
        );
        Ok(task)
    }

    /// Marks a task completed at `now_ms`. Completing twice keeps the first date.
    pub fn complete_task(&self, id: RecordId, now_ms: i64) -> RepoResult<Task> {
        let mut task = self.load_task(id)?;
        if !task.is_completed {
            task.complete(now_ms);
            self.repo.update_task(&task)?;
            info!("event=task_complete module=service status=ok");
        }
        Ok(task)
    }

    /// Reopens a completed task and clears its completion date.
    pub fn reopen_task(&self, id: RecordId) -> RepoResult<Task> {
        let mut task = self.load_task(id)?;
        if task.is_completed {
            task.reopen();
            self.repo.update_task(&task)?;
            info!("event=task_reopen module=service status=ok");
        }
        Ok(task)
    }

    pub fn create_note(&self, content: impl Into<String>, now_ms: i64) -> RepoResult<Note> {
        let note = Note::new(content, now_ms);
        self.repo.create_note(&note)?;
        info!("event=entry_create module=service status=ok kind=note");
        Ok(note)
    }

    /// Creates a journal entry; blank gratitude lines and blank prompts are dropped.
    pub fn create_journal_entry(&self, draft: JournalDraft, now_ms: i64) -> RepoResult<JournalEntry> {
        let mut entry = JournalEntry::new(draft.content, now_ms);
        entry.is_dream = draft.is_dream;
        entry.gratitude_entries = draft
            .gratitude_entries
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        entry.prompt = draft
            .prompt
            .map(|prompt| prompt.trim().to_string())
            .filter(|prompt| !prompt.is_empty());

        self.repo.create_journal_entry(&entry)?;
        info!(
            "event=entry_create module=service status=ok kind=journal_entry gratitude_lines={}",
            entry.gratitude_entries.len()
        );
        Ok(entry)
    }

    /// Logs a mood rating, validated against the configured scale.
    pub fn log_mood(&self, rating: u8, note: Option<String>, now_ms: i64) -> RepoResult<MoodEntry> {
        let mut entry = MoodEntry::new(rating, now_ms);
        entry.note = note.filter(|value| !value.trim().is_empty());
        entry.validate(self.mood_scale)?;
        self.repo.create_mood_entry(&entry)?;
        info!(
            "event=entry_create module=service status=ok kind=mood_entry scale_max={}",
            self.mood_scale.max()
        );
        Ok(entry)
    }

    pub fn delete(&self, kind: RecordKind, id: RecordId) -> RepoResult<()> {
        self.repo.delete_record(kind, id)?;
        info!("event=entry_delete module=service status=ok kind={kind}");
        Ok(())
    }

    fn load_task(&self, id: RecordId) -> RepoResult<Task> {
        self.repo.get_task(id)?.ok_or(RepoError::NotFound {
            kind: RecordKind::Task,
            id,
        })
    }
}
