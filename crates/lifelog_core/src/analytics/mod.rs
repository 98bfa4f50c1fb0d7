//! Dashboard analytics over the record store.
//!
//! # Responsibility
//! - Reduce record store reads into a flat `AnalyticsSnapshot` for a window.
//! - Run aggregations off the caller's thread and drop stale results.
//!
//! # Invariants
//! - Aggregation never writes and never caches between calls.
//! - A failed sub-query degrades that statistic to zero/empty; nothing is surfaced.
//! - The journal streak is anchored on the clock's today, not on the range.

mod aggregator;
mod snapshot;
pub mod stats;
mod worker;

pub use aggregator::{AnalyticsAggregator, MAX_STREAK_DAYS};
pub use snapshot::{
    AnalyticsSnapshot, DailyAverage, DailyCount, JournalStats, JournalTypeBreakdown, MoodStats,
    NoteStats, PriorityBreakdown, TaskStats,
};
pub use worker::{AnalyticsWorker, Delivery};
