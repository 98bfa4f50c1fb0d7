use crate::model::journal::JournalEntryType;
use crate::model::task::TaskPriority;
use crate::time::TimeRange;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the dashboard shows for one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub range: TimeRange,
    pub tasks: TaskStats,
    pub notes: NoteStats,
    pub journal: JournalStats,
    pub mood: MoodStats,
}

impl AnalyticsSnapshot {
    /// All-zero snapshot for `range`, used when nothing could be read.
    pub fn empty(range: TimeRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskStats {
    /// Tasks whose completion date falls in range.
    pub completed: u64,
    /// `completed / created_in_range`; 0 when nothing was created. Not clamped.
    pub completion_rate: f64,
    /// `completed / max(whole_days, 1)`.
    pub average_per_day: f64,
    pub change_percent: f64,
    /// Completed-in-range tasks by priority.
    pub by_priority: PriorityBreakdown,
    /// One entry per calendar day, zeros included.
    pub daily_completions: Vec<DailyCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl PriorityBreakdown {
    pub fn record(&mut self, priority: TaskPriority) {
        match priority {
            TaskPriority::High => self.high += 1,
            TaskPriority::Medium => self.medium += 1,
            TaskPriority::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteStats {
    pub created: u64,
    pub change_percent: f64,
    /// Truncating integer mean of note character counts.
    pub average_length: u64,
    /// One entry per calendar day, zeros included.
    pub daily_created: Vec<DailyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JournalStats {
    pub created: u64,
    pub change_percent: f64,
    /// Consecutive days with an entry, counting back from today.
    pub streak_days: u32,
    pub by_type: JournalTypeBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JournalTypeBreakdown {
    pub daily: u64,
    pub dream: u64,
    pub gratitude: u64,
    pub reflection: u64,
}

impl JournalTypeBreakdown {
    pub fn record(&mut self, entry_type: JournalEntryType) {
        match entry_type {
            JournalEntryType::Daily => self.daily += 1,
            JournalEntryType::Dream => self.dream += 1,
            JournalEntryType::Gratitude => self.gratitude += 1,
            JournalEntryType::Reflection => self.reflection += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoodStats {
    /// Mean rating in range; 0 when there are no entries.
    pub average_rating: f64,
    /// Change between this window's and the previous window's averages.
    pub change_percent: f64,
    /// Only days with at least one entry appear.
    pub daily_average: Vec<DailyAverage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average: f64,
}
