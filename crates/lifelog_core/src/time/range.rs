use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Half-open interval `[start_ms, end_ms)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    Inverted { start_ms: i64, end_ms: i64 },
}

impl Display for TimeRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inverted { start_ms, end_ms } => {
                write!(f, "range start {start_ms} is after end {end_ms}")
            }
        }
    }
}

impl Error for TimeRangeError {}

impl TimeRange {
    /// Builds a range, rejecting `start_ms > end_ms`.
    pub fn new(start_ms: i64, end_ms: i64) -> Result<Self, TimeRangeError> {
        if start_ms > end_ms {
            return Err(TimeRangeError::Inverted { start_ms, end_ms });
        }
        Ok(Self { start_ms, end_ms })
    }

    /// Range of `days` whole days starting at `start_ms`.
    pub fn days_from(start_ms: i64, days: i64) -> Self {
        Self {
            start_ms,
            end_ms: start_ms.saturating_add(days.max(0).saturating_mul(MILLIS_PER_DAY)),
        }
    }

    /// Wall-clock length; inverted ranges count as zero.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.end_ms <= self.start_ms
    }

    pub fn contains(&self, ts_ms: i64) -> bool {
        self.start_ms <= ts_ms && ts_ms < self.end_ms
    }

    /// The window of equal length immediately before this one.
    ///
    /// Fixed-length shift: a 31-day range maps to the previous 31 days,
    /// whatever the calendar months involved.
    pub fn preceding(&self) -> Self {
        let duration = self.duration_ms();
        Self {
            start_ms: self.start_ms.saturating_sub(duration),
            end_ms: self.start_ms,
        }
    }

    /// Number of complete 24h days covered, rounded down.
    pub fn whole_days(&self) -> i64 {
        self.duration_ms() / MILLIS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeRange, TimeRangeError, MILLIS_PER_DAY};

    #[test]
    fn new_rejects_inverted_bounds() {
        assert_eq!(
            TimeRange::new(10, 5),
            Err(TimeRangeError::Inverted {
                start_ms: 10,
                end_ms: 5
            })
        );
        assert!(TimeRange::new(5, 5).expect("equal bounds").is_empty());
    }

    #[test]
    fn contains_is_half_open() {
        let range = TimeRange::new(100, 200).expect("valid range");
        assert!(range.contains(100));
        assert!(range.contains(199));
        assert!(!range.contains(200));
        assert!(!TimeRange::new(100, 100).expect("valid").contains(100));
    }

    #[test]
    fn preceding_shifts_by_wall_clock_duration() {
        let range = TimeRange::days_from(31 * MILLIS_PER_DAY, 31);
        let previous = range.preceding();
        assert_eq!(previous.start_ms, 0);
        assert_eq!(previous.end_ms, range.start_ms);
        assert_eq!(previous.duration_ms(), range.duration_ms());
    }

    #[test]
    fn whole_days_rounds_down() {
        let range = TimeRange::new(0, 7 * MILLIS_PER_DAY + 5).expect("valid");
        assert_eq!(range.whole_days(), 7);
    }
}
