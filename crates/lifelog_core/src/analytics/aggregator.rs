use super::snapshot::{
    AnalyticsSnapshot, DailyAverage, DailyCount, JournalStats, JournalTypeBreakdown, MoodStats,
    NoteStats, PriorityBreakdown, TaskStats,
};
use super::stats::{mean, percentage_change, ratio, truncated_mean};
use crate::model::RecordKind;
use crate::repo::record_store::{RecordFilter, RecordStore, RepoResult, TaskFilter};
use crate::time::{Calendar, Clock, TimeRange};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Upper bound on the backward journal streak walk (ten years of days).
pub const MAX_STREAK_DAYS: u32 = 3_660;

/// Computes analytics snapshots from a record store.
///
/// Holds no state between calls apart from its injected collaborators.
pub struct AnalyticsAggregator<S: RecordStore> {
    store: S,
    calendar: Calendar,
    clock: Arc<dyn Clock>,
}

impl<S: RecordStore> AnalyticsAggregator<S> {
    pub fn new(store: S, calendar: Calendar, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            calendar,
            clock,
        }
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Builds the full snapshot for `range`.
    ///
    /// Never fails: a statistic whose query errors is reported as zero/empty.
    pub fn compute(&self, range: TimeRange) -> AnalyticsSnapshot {
        let started_at = Instant::now();
        let snapshot = AnalyticsSnapshot {
            range,
            tasks: self.task_stats(&range),
            notes: self.note_stats(&range),
            journal: self.journal_stats(&range),
            mood: self.mood_stats(&range),
        };
        info!(
            "event=analytics_compute module=analytics status=ok start_ms={} end_ms={} duration_ms={}",
            range.start_ms,
            range.end_ms,
            started_at.elapsed().as_millis()
        );
        snapshot
    }

    pub fn task_stats(&self, range: &TimeRange) -> TaskStats {
        let completed = self.completed_tasks(range);
        let previous = self.completed_tasks(&range.preceding());
        let created = self.count_or_zero(
            &RecordFilter::Tasks(TaskFilter::CreatedIn(*range)),
            "tasks_created",
        );

        let mut by_priority = PriorityBreakdown::default();
        for task in self.fetch_or_empty(
            "tasks_by_priority",
            RecordKind::Task,
            self.store.fetch_tasks(&TaskFilter::CompletedIn(*range)),
        ) {
            by_priority.record(task.priority);
        }

        let daily_completions = self.daily_counts(range, |day| {
            RecordFilter::Tasks(TaskFilter::CompletedIn(day))
        });

        TaskStats {
            completed,
            completion_rate: ratio(completed, created),
            average_per_day: completed as f64 / range.whole_days().max(1) as f64,
            change_percent: percentage_change(completed as f64, previous as f64),
            by_priority,
            daily_completions,
        }
    }

    pub fn note_stats(&self, range: &TimeRange) -> NoteStats {
        let created = self.count_or_zero(&RecordFilter::Notes(*range), "notes_created");
        let previous =
            self.count_or_zero(&RecordFilter::Notes(range.preceding()), "notes_created_previous");
        let notes = self.fetch_or_empty(
            "notes_length",
            RecordKind::Note,
            self.store.fetch_notes(range),
        );

        NoteStats {
            created,
            change_percent: percentage_change(created as f64, previous as f64),
            average_length: truncated_mean(notes.iter().map(|note| note.length())),
            daily_created: self.daily_counts(range, RecordFilter::Notes),
        }
    }

    pub fn journal_stats(&self, range: &TimeRange) -> JournalStats {
        let created =
            self.count_or_zero(&RecordFilter::JournalEntries(*range), "journal_created");
        let previous = self.count_or_zero(
            &RecordFilter::JournalEntries(range.preceding()),
            "journal_created_previous",
        );

        let mut by_type = JournalTypeBreakdown::default();
        for entry in self.fetch_or_empty(
            "journal_by_type",
            RecordKind::JournalEntry,
            self.store.fetch_journal_entries(range),
        ) {
            by_type.record(entry.entry_type());
        }

        JournalStats {
            created,
            change_percent: percentage_change(created as f64, previous as f64),
            streak_days: self.journal_streak(),
            by_type,
        }
    }

    pub fn mood_stats(&self, range: &TimeRange) -> MoodStats {
        let current = self.average_mood(range, "mood_average").unwrap_or(0.0);
        let previous = self
            .average_mood(&range.preceding(), "mood_average_previous")
            .unwrap_or(0.0);

        let daily_average = self
            .days_in(range, "mood_daily")
            .into_iter()
            .filter_map(|date| {
                self.average_mood(&self.calendar.day_range(date), "mood_daily")
                    .map(|average| DailyAverage { date, average })
            })
            .collect();

        MoodStats {
            average_rating: current,
            change_percent: percentage_change(current, previous),
            daily_average,
        }
    }

    /// Consecutive days with at least one journal entry, walking back from
    /// today. Stops at the first empty day; independent of any range.
    pub fn journal_streak(&self) -> u32 {
        let now_ms = self.clock.now_ms();
        let Some(mut day) = self.calendar.date_of(now_ms) else {
            warn!(
                "event=analytics_query module=analytics status=degraded stat=journal_streak error_code=clock_out_of_range now_ms={now_ms}"
            );
            return 0;
        };
        let mut streak = 0;
        while streak < MAX_STREAK_DAYS {
            let filter = RecordFilter::JournalEntries(self.calendar.day_range(day));
            if self.count_or_zero(&filter, "journal_streak") == 0 {
                break;
            }
            streak += 1;
            match day.pred_opt() {
                Some(previous) => day = previous,
                None => break,
            }
        }
        streak
    }

    fn completed_tasks(&self, range: &TimeRange) -> u64 {
        self.count_or_zero(
            &RecordFilter::Tasks(TaskFilter::CompletedIn(*range)),
            "tasks_completed",
        )
    }

    fn average_mood(&self, range: &TimeRange, stat: &'static str) -> Option<f64> {
        let entries = self.fetch_or_empty(
            stat,
            RecordKind::MoodEntry,
            self.store.fetch_mood_entries(range),
        );
        mean(entries.iter().map(|entry| f64::from(entry.rating)))
    }

    fn daily_counts(
        &self,
        range: &TimeRange,
        filter_for_day: impl Fn(TimeRange) -> RecordFilter,
    ) -> Vec<DailyCount> {
        self.days_in(range, "daily_count")
            .into_iter()
            .map(|date| DailyCount {
                date,
                count: self.count_or_zero(
                    &filter_for_day(self.calendar.day_range(date)),
                    "daily_count",
                ),
            })
            .collect()
    }

    /// Local dates of `range`; empty, with a warning, when a bound has no date.
    fn days_in(&self, range: &TimeRange, stat: &'static str) -> Vec<NaiveDate> {
        if !range.is_empty() && !self.calendar.is_representable(range) {
            warn!(
                "event=analytics_query module=analytics status=degraded stat={stat} error_code=range_out_of_calendar start_ms={} end_ms={}",
                range.start_ms, range.end_ms
            );
            return Vec::new();
        }
        self.calendar.days_in(range)
    }

    fn count_or_zero(&self, filter: &RecordFilter, stat: &'static str) -> u64 {
        match self.store.count(filter) {
            Ok(count) => count,
            Err(err) => {
                warn!(
                    "event=analytics_query module=analytics status=degraded stat={stat} kind={} error={err}",
                    filter.kind()
                );
                0
            }
        }
    }

    fn fetch_or_empty<T>(
        &self,
        stat: &'static str,
        kind: RecordKind,
        result: RepoResult<Vec<T>>,
    ) -> Vec<T> {
        match result {
            Ok(records) => {
                debug!(
                    "event=analytics_fetch module=analytics status=ok stat={stat} kind={kind} rows={}",
                    records.len()
                );
                records
            }
            Err(err) => {
                warn!(
                    "event=analytics_query module=analytics status=degraded stat={stat} kind={kind} error={err}"
                );
                Vec::new()
            }
        }
    }
}
