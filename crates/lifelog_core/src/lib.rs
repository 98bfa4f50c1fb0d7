//! Core domain logic for lifelog: tasks, notes, journal, mood and the
//! analytics dashboard computed over them.

pub mod analytics;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod time;

pub use analytics::{AnalyticsAggregator, AnalyticsSnapshot, AnalyticsWorker};
pub use config::{ConfigError, CoreConfig, LogConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::journal::{JournalEntry, JournalEntryType};
pub use model::mood::{MoodEntry, MoodScale};
pub use model::note::Note;
pub use model::task::{Task, TaskPriority};
pub use model::{RecordId, RecordKind, RecordValidationError};
pub use repo::record_store::{
    RecordFilter, RecordRepository, RecordStore, RepoError, RepoResult, TaskFilter,
};
pub use repo::sqlite_store::SqliteRecordStore;
pub use service::entry_service::{EntryService, JournalDraft};
pub use time::{Calendar, Clock, FixedClock, RangePreset, SystemClock, TimeRange};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
