//! Mood check-in record and rating scale.

use super::{RecordId, RecordValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound of the mood rating scale. Ratings start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodScale {
    max: u8,
}

impl MoodScale {
    pub const FIVE_POINT: Self = Self { max: 5 };
    pub const TEN_POINT: Self = Self { max: 10 };

    /// Returns the scale for `max`, which must be 5 or 10.
    pub fn from_max(max: u8) -> Option<Self> {
        match max {
            5 => Some(Self::FIVE_POINT),
            10 => Some(Self::TEN_POINT),
            _ => None,
        }
    }

    pub fn max(self) -> u8 {
        self.max
    }

    pub fn check(self, rating: u8) -> Result<(), RecordValidationError> {
        if (1..=self.max).contains(&rating) {
            Ok(())
        } else {
            Err(RecordValidationError::MoodRatingOutOfRange {
                rating,
                max: self.max,
            })
        }
    }
}

impl Default for MoodScale {
    fn default() -> Self {
        Self::TEN_POINT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: RecordId,
    pub created_at_ms: i64,
    pub rating: u8,
    pub note: Option<String>,
}

impl MoodEntry {
    pub fn new(rating: u8, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at_ms,
            rating,
            note: None,
        }
    }

    /// Validates the rating against `scale`.
    pub fn validate(&self, scale: MoodScale) -> Result<(), RecordValidationError> {
        scale.check(self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::{MoodEntry, MoodScale};

    #[test]
    fn scale_bounds_are_inclusive() {
        let scale = MoodScale::FIVE_POINT;
        assert!(MoodEntry::new(1, 0).validate(scale).is_ok());
        assert!(MoodEntry::new(5, 0).validate(scale).is_ok());
        assert!(MoodEntry::new(0, 0).validate(scale).is_err());
        assert!(MoodEntry::new(6, 0).validate(scale).is_err());
        assert!(MoodEntry::new(6, 0).validate(MoodScale::TEN_POINT).is_ok());
    }

    #[test]
    fn only_five_and_ten_point_scales_exist() {
        assert_eq!(MoodScale::from_max(5), Some(MoodScale::FIVE_POINT));
        assert_eq!(MoodScale::from_max(7), None);
    }
}
