use super::calendar::Calendar;
use super::range::TimeRange;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Dashboard range presets, each running from the start of the current
/// period up to `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePreset {
    #[default]
    Week,
    Month,
    Quarter,
    Year,
}

impl RangePreset {
    pub const ALL: [Self; 4] = [Self::Week, Self::Month, Self::Quarter, Self::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// First local date of the period containing `today`.
    pub fn period_start(self, today: NaiveDate, calendar: &Calendar) -> NaiveDate {
        let first_of = |month: u32| NaiveDate::from_ymd_opt(today.year(), month, 1).unwrap_or(today);
        match self {
            Self::Week => calendar.start_of_week(today),
            Self::Month => first_of(today.month()),
            Self::Quarter => first_of(quarter_start_month(today.month())),
            Self::Year => first_of(1),
        }
    }

    /// `[start_of(period_start), now_ms)` under `calendar`.
    ///
    /// Collapses to the empty range at `now_ms` when `now_ms` has no local date.
    pub fn range_ending_at(self, now_ms: i64, calendar: &Calendar) -> TimeRange {
        let start_ms = match calendar.date_of(now_ms) {
            Some(today) => calendar.start_of_date(self.period_start(today, calendar)),
            None => now_ms,
        };
        TimeRange {
            start_ms: start_ms.min(now_ms),
            end_ms: now_ms,
        }
    }
}

impl Display for RangePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangePreset {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!(
                "unsupported range preset `{other}`; expected week|month|quarter|year"
            )),
        }
    }
}

/// First month (1-based) of the quarter containing `month` (1-based).
///
/// Jan-Mar -> 1, Apr-Jun -> 4, Jul-Sep -> 7, Oct-Dec -> 10.
pub fn quarter_start_month(month: u32) -> u32 {
    let month = month.clamp(1, 12);
    ((month - 1) / 3) * 3 + 1
}

#[cfg(test)]
mod tests {
    use super::{quarter_start_month, RangePreset};
    use crate::time::Calendar;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn quarter_start_month_for_every_month() {
        let expected = [1, 1, 1, 4, 4, 4, 7, 7, 7, 10, 10, 10];
        for (index, want) in expected.iter().enumerate() {
            let month = index as u32 + 1;
            assert_eq!(quarter_start_month(month), *want, "month {month}");
        }
    }

    #[test]
    fn quarter_period_starts_on_first_day_of_quarter_for_boundary_days() {
        let calendar = Calendar::utc();
        for month in 1..=12u32 {
            let first = date(2024, month, 1);
            let start = RangePreset::Quarter.period_start(first, &calendar);
            assert_eq!(start, date(2024, quarter_start_month(month), 1));
        }
        let last_of_march = date(2024, 3, 31);
        assert_eq!(
            RangePreset::Quarter.period_start(last_of_march, &calendar),
            date(2024, 1, 1)
        );
    }

    #[test]
    fn presets_end_at_now() {
        let calendar = Calendar::utc();
        // 2024-05-15T12:00:00Z, a Wednesday.
        let now_ms = 1_715_774_400_000;
        let week = RangePreset::Week.range_ending_at(now_ms, &calendar);
        assert_eq!(week.end_ms, now_ms);
        assert_eq!(calendar.date_of(week.start_ms), Some(date(2024, 5, 13)));

        let month = RangePreset::Month.range_ending_at(now_ms, &calendar);
        assert_eq!(calendar.date_of(month.start_ms), Some(date(2024, 5, 1)));

        let quarter = RangePreset::Quarter.range_ending_at(now_ms, &calendar);
        assert_eq!(calendar.date_of(quarter.start_ms), Some(date(2024, 4, 1)));

        let year = RangePreset::Year.range_ending_at(now_ms, &calendar);
        assert_eq!(calendar.date_of(year.start_ms), Some(date(2024, 1, 1)));
    }

    #[test]
    fn unrepresentable_now_gives_empty_range() {
        let range = RangePreset::Month.range_ending_at(i64::MAX, &Calendar::utc());
        assert!(range.is_empty());
        assert_eq!(range.end_ms, i64::MAX);
    }

    #[test]
    fn parse_accepts_known_names() {
        assert_eq!("Quarter".parse::<RangePreset>(), Ok(RangePreset::Quarter));
        assert!("decade".parse::<RangePreset>().is_err());
    }
}
