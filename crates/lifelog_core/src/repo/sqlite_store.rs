//! SQLite-backed record store.
//!
//! # Invariants
//! - Every query binds range bounds as `column >= start AND column < end`.
//! - Journal gratitude lines are returned in insertion order.
//! - Journal writes commit the entry and its gratitude lines together.

use crate::db::{open_db, open_db_in_memory};
use crate::model::journal::JournalEntry;
use crate::model::mood::{MoodEntry, MoodScale};
use crate::model::note::Note;
use crate::model::task::{Task, TaskPriority};
use crate::model::{RecordId, RecordKind};
use crate::repo::record_store::{
    RecordFilter, RecordRepository, RecordStore, RepoError, RepoResult, TaskFilter,
};
use crate::time::TimeRange;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    is_completed,
    completion_date,
    priority,
    created_at
FROM tasks";

/// Record store over one migrated SQLite connection.
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Wraps a migrated connection after checking the record tables exist.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        for table in [
            "tasks",
            "notes",
            "journal_entries",
            "journal_gratitude",
            "mood_entries",
        ] {
            if !table_exists(&conn, table)? {
                return Err(RepoError::InvalidData(format!(
                    "missing required table `{table}`"
                )));
            }
        }
        Ok(Self { conn })
    }

    /// Opens and migrates the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn count_where(&self, table: &str, clause: &str, range: &TimeRange) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE {clause};"),
            params![range.start_ms, range.end_ms],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative count {count} from {table}")))
    }

    fn load_gratitude(&self, entry_uuid: &str) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT text
             FROM journal_gratitude
             WHERE entry_uuid = ?1
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([entry_uuid])?;
        let mut lines = Vec::new();
        while let Some(row) = rows.next()? {
            lines.push(row.get(0)?);
        }
        Ok(lines)
    }
}

impl RecordStore for SqliteRecordStore {
    fn count(&self, filter: &RecordFilter) -> RepoResult<u64> {
        let (table, clause) = filter_clause(filter);
        self.count_where(table, clause, &filter.range())
    }

    fn fetch_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>> {
        let (_, clause) = filter_clause(&RecordFilter::Tasks(*filter));
        let order_column = match filter {
            TaskFilter::CreatedIn(_) => "created_at",
            TaskFilter::CompletedIn(_) => "completion_date",
        };
        let range = filter.range();
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} WHERE {clause} ORDER BY {order_column} ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![range.start_ms, range.end_ms])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn fetch_notes(&self, range: &TimeRange) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, content, created_at
             FROM notes
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query(params![range.start_ms, range.end_ms])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(Note {
                id: parse_uuid(row, "notes")?,
                content: row.get("content")?,
                created_at_ms: row.get("created_at")?,
            });
        }
        Ok(notes)
    }

    fn fetch_journal_entries(&self, range: &TimeRange) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, content, is_dream, prompt, created_at
             FROM journal_entries
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query(params![range.start_ms, range.end_ms])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            entries.push(JournalEntry {
                id: parse_uuid(row, "journal_entries")?,
                content: row.get("content")?,
                created_at_ms: row.get("created_at")?,
                is_dream: parse_flag(row, "is_dream")?,
                gratitude_entries: self.load_gratitude(&uuid_text)?,
                prompt: row.get("prompt")?,
            });
        }
        Ok(entries)
    }

    fn fetch_mood_entries(&self, range: &TimeRange) -> RepoResult<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, rating, note, created_at
             FROM mood_entries
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query(params![range.start_ms, range.end_ms])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let raw_rating: i64 = row.get("rating")?;
            let rating = u8::try_from(raw_rating)
                .ok()
                .filter(|value| MoodScale::TEN_POINT.check(*value).is_ok())
                .ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "invalid rating `{raw_rating}` in mood_entries.rating"
                    ))
                })?;
            entries.push(MoodEntry {
                id: parse_uuid(row, "mood_entries")?,
                created_at_ms: row.get("created_at")?,
                rating,
                note: row.get("note")?,
            });
        }
        Ok(entries)
    }
}

impl RecordRepository for SqliteRecordStore {
    fn create_task(&self, task: &Task) -> RepoResult<RecordId> {
        task.validate()?;
        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                is_completed,
                completion_date,
                priority,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                bool_to_int(task.is_completed),
                task.completion_date_ms,
                task.priority.as_str(),
                task.created_at_ms,
            ],
        )?;
        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                is_completed = ?2,
                completion_date = ?3,
                priority = ?4
             WHERE uuid = ?5;",
            params![
                task.title.as_str(),
                bool_to_int(task.is_completed),
                task.completion_date_ms,
                task.priority.as_str(),
                task.id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Task,
                id: task.id,
            });
        }
        Ok(())
    }

    fn get_task(&self, id: RecordId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_task_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_note(&self, note: &Note) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO notes (uuid, content, created_at) VALUES (?1, ?2, ?3);",
            params![note.id.to_string(), note.content.as_str(), note.created_at_ms],
        )?;
        Ok(note.id)
    }

    fn create_journal_entry(&self, entry: &JournalEntry) -> RepoResult<RecordId> {
        let uuid = entry.id.to_string();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO journal_entries (uuid, content, is_dream, prompt, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                uuid.as_str(),
                entry.content.as_str(),
                bool_to_int(entry.is_dream),
                entry.prompt.as_deref(),
                entry.created_at_ms,
            ],
        )?;
        for (position, line) in entry.gratitude_entries.iter().enumerate() {
            tx.execute(
                "INSERT INTO journal_gratitude (entry_uuid, position, text) VALUES (?1, ?2, ?3);",
                params![uuid.as_str(), position as i64, line.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(entry.id)
    }

    fn create_mood_entry(&self, entry: &MoodEntry) -> RepoResult<RecordId> {
        entry.validate(MoodScale::TEN_POINT)?;
        self.conn.execute(
            "INSERT INTO mood_entries (uuid, rating, note, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.id.to_string(),
                i64::from(entry.rating),
                entry.note.as_deref(),
                entry.created_at_ms,
            ],
        )?;
        Ok(entry.id)
    }

    fn delete_record(&self, kind: RecordKind, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE uuid = ?1;", table_for(kind)),
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { kind, id });
        }
        Ok(())
    }
}

fn table_for(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Task => "tasks",
        RecordKind::Note => "notes",
        RecordKind::JournalEntry => "journal_entries",
        RecordKind::MoodEntry => "mood_entries",
    }
}

/// Table and `WHERE` clause for a filter. Bounds bind as `?1` and `?2`.
fn filter_clause(filter: &RecordFilter) -> (&'static str, &'static str) {
    const CREATED_IN: &str = "created_at >= ?1 AND created_at < ?2";
    match filter {
        RecordFilter::Tasks(TaskFilter::CreatedIn(_)) => ("tasks", CREATED_IN),
        RecordFilter::Tasks(TaskFilter::CompletedIn(_)) => (
            "tasks",
            "is_completed = 1 AND completion_date >= ?1 AND completion_date < ?2",
        ),
        RecordFilter::Notes(_) => ("notes", CREATED_IN),
        RecordFilter::JournalEntries(_) => ("journal_entries", CREATED_IN),
        RecordFilter::MoodEntries(_) => ("mood_entries", CREATED_IN),
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let priority_text: String = row.get("priority")?;
    let priority = TaskPriority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;

    Ok(Task {
        id: parse_uuid(row, "tasks")?,
        title: row.get("title")?,
        is_completed: parse_flag(row, "is_completed")?,
        completion_date_ms: row.get("completion_date")?,
        created_at_ms: row.get("created_at")?,
        priority,
    })
}

fn parse_uuid(row: &Row<'_>, table: &str) -> RepoResult<RecordId> {
    let value: String = row.get("uuid")?;
    Uuid::parse_str(&value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {table}.uuid")))
}

fn parse_flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in column {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
