//! TOML configuration for core.
//!
//! # Responsibility
//! - Describe database, logging, calendar and mood settings with defaults.
//! - Turn raw settings into validated domain values (`Calendar`, `MoodScale`).
//!
//! # Invariants
//! - A missing section or key falls back to its default.
//! - Unknown keys are rejected so typos do not silently fall back.

use crate::logging::default_log_level;
use crate::model::mood::MoodScale;
use crate::time::Calendar;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Database file; callers choose a platform default when absent.
    pub db_path: Option<PathBuf>,
    pub log: LogConfig,
    pub calendar: CalendarConfig,
    pub mood: MoodConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files. Logs go to stderr when absent.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Minutes east of UTC used for day bucketing; host offset when absent.
    pub utc_offset_minutes: Option<i32>,
    pub week_start: WeekStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoodConfig {
    /// 5 or 10.
    pub scale_max: u8,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            scale_max: MoodScale::default().max(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mood_scale()?;
        if let Some(minutes) = self.calendar.utc_offset_minutes {
            self.calendar(minutes)?;
        }
        if let Some(dir) = self.log.dir.as_ref() {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    pub fn mood_scale(&self) -> Result<MoodScale, ConfigError> {
        MoodScale::from_max(self.mood.scale_max).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "mood.scale_max must be 5 or 10, got {}",
                self.mood.scale_max
            ))
        })
    }

    /// Calendar from the configured offset, or `host_offset_minutes` when unset.
    pub fn calendar(&self, host_offset_minutes: i32) -> Result<Calendar, ConfigError> {
        let minutes = self
            .calendar
            .utc_offset_minutes
            .unwrap_or(host_offset_minutes);
        Calendar::from_offset_minutes(minutes, self.calendar.week_start.weekday()).ok_or_else(
            || ConfigError::Invalid(format!("calendar.utc_offset_minutes {minutes} is out of range")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, WeekStart};
    use crate::model::mood::MoodScale;
    use chrono::Weekday;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.mood_scale().expect("default scale"), MoodScale::TEN_POINT);
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
    }

    #[test]
    fn full_document_parses() {
        let config = CoreConfig::from_toml_str(
            r#"
            db_path = "/tmp/lifelog.sqlite3"

            [log]
            level = "warn"

            [calendar]
            utc_offset_minutes = -300
            week_start = "sunday"

            [mood]
            scale_max = 5
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.log.level, "warn");
        assert_eq!(config.mood_scale().expect("scale"), MoodScale::FIVE_POINT);
        let calendar = config.calendar(0).expect("calendar");
        assert_eq!(calendar.offset().local_minus_utc(), -300 * 60);
        assert_eq!(calendar.week_start(), Weekday::Sun);
    }

    #[test]
    fn host_offset_applies_only_when_unset() {
        let config = CoreConfig::default();
        let calendar = config.calendar(90).expect("calendar");
        assert_eq!(calendar.offset().local_minus_utc(), 90 * 60);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CoreConfig::from_toml_str("[mood]\nscale_max = 7").expect_err("bad scale");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CoreConfig::from_toml_str("[log]\ndir = \"relative/logs\"")
            .expect_err("relative log dir");
        assert!(err.to_string().contains("absolute"));

        let err = CoreConfig::from_toml_str("[calendar]\nutc_offset_minutes = 100000")
            .expect_err("offset out of range");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CoreConfig::from_toml_str("colour = \"blue\"").expect_err("unknown key");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
