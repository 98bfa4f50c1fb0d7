use super::range::{TimeRange, MILLIS_PER_DAY};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday};

/// Calendar used to bucket timestamps into local days.
///
/// A fixed offset keeps bucketing deterministic; callers pick the host
/// offset at startup or take it from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
    week_start: Weekday,
}

impl Calendar {
    pub fn new(offset: FixedOffset, week_start: Weekday) -> Self {
        Self { offset, week_start }
    }

    /// UTC calendar with Monday as first weekday.
    pub fn utc() -> Self {
        Self::new(Utc.fix(), Weekday::Mon)
    }

    /// Builds a calendar east of UTC by `minutes`; `None` when out of range.
    pub fn from_offset_minutes(minutes: i32, week_start: Weekday) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(|offset| Self::new(offset, week_start))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Local calendar date containing `ts_ms`; `None` outside chrono's date range.
    pub fn date_of(&self, ts_ms: i64) -> Option<NaiveDate> {
        let local_ms = ts_ms.checked_add(i64::from(self.offset.local_minus_utc()) * 1000)?;
        DateTime::<Utc>::from_timestamp_millis(local_ms).map(|local| local.date_naive())
    }

    /// Epoch milliseconds of local midnight starting `date`.
    pub fn start_of_date(&self, date: NaiveDate) -> i64 {
        let local_midnight_as_utc = date.and_time(NaiveTime::MIN).and_utc();
        local_midnight_as_utc.timestamp_millis()
            - i64::from(self.offset.local_minus_utc()) * 1000
    }

    pub fn start_of_day(&self, ts_ms: i64) -> Option<i64> {
        self.date_of(ts_ms).map(|date| self.start_of_date(date))
    }

    /// `[start_of_date(date), start_of_date(date) + 1 day)`.
    pub fn day_range(&self, date: NaiveDate) -> TimeRange {
        TimeRange::days_from(self.start_of_date(date), 1)
    }

    /// Calendar dates touched by `range`, in order.
    ///
    /// Starts at the date containing `range.start_ms` and includes every date
    /// whose midnight precedes `range.end_ms`. Empty ranges, and ranges with
    /// a bound outside chrono's date range, yield no dates.
    pub fn days_in(&self, range: &TimeRange) -> Vec<NaiveDate> {
        if !self.is_representable(range) {
            return Vec::new();
        }

        let mut days = Vec::new();
        let Some(mut current) = self.date_of(range.start_ms) else {
            return days;
        };
        let mut day_start = self.start_of_date(current);
        while day_start < range.end_ms {
            days.push(current);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
            day_start += MILLIS_PER_DAY;
        }
        days
    }

    /// Whether `range` is non-empty and both its bounds map to local dates.
    pub fn is_representable(&self, range: &TimeRange) -> bool {
        !range.is_empty()
            && self.date_of(range.start_ms).is_some()
            && self.date_of(range.end_ms - 1).is_some()
    }

    /// First day of the week containing `date`, honoring `week_start`.
    pub fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let weekday = date.weekday().num_days_from_monday();
        let start = self.week_start.num_days_from_monday();
        let back = (7 + weekday - start) % 7;
        date - Days::new(u64::from(back))
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}
