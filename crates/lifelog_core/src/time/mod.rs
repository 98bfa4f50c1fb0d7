//! Time ranges, calendar bucketing and range presets.
//!
//! # Responsibility
//! - Represent the half-open windows analytics queries run against.
//! - Convert epoch milliseconds to calendar days under a fixed UTC offset.
//! - Provide the injectable wall clock.
//!
//! # Invariants
//! - A range matches `start_ms <= ts < end_ms`; zero-length ranges match nothing.
//! - Day buckets are whole local days touching the range, never clamped to it.

mod calendar;
mod clock;
mod preset;
mod range;

pub use calendar::Calendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use preset::{quarter_start_month, RangePreset};
pub use range::{TimeRange, TimeRangeError, MILLIS_PER_DAY};
