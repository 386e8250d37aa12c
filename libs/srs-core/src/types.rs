//! Core types shared across the scheduling engine.

use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};

/// Lowest ease factor an item may carry.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Highest ease factor an item may carry; also the ease of a new item.
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Ratings at or above this value count as a successful recall.
pub const SUCCESS_THRESHOLD: u8 = 3;

/// Reviewer's performance signal for one presentation, 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidenceRating(u8);

impl ConfidenceRating {
    pub const BLACKOUT: Self = Self(0);
    pub const PERFECT: Self = Self(5);

    /// Create a rating, rejecting values above 5.
    pub fn new(value: u8) -> Result<Self, ScheduleError> {
        if value > Self::PERFECT.0 {
            return Err(ScheduleError::RatingOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this rating takes the success branch of the schedule.
    pub fn is_success(self) -> bool {
        self.0 >= SUCCESS_THRESHOLD
    }

    /// Map a correctness verdict to a rating.
    /// Correct -> 5, wrong -> 0
    pub fn from_correct(correct: bool) -> Self {
        if correct { Self::PERFECT } else { Self::BLACKOUT }
    }
}

impl TryFrom<u8> for ConfidenceRating {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceRating> for u8 {
    fn from(rating: ConfidenceRating) -> Self {
        rating.0
    }
}

/// Matching mode for free-text answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    #[default]
    Fuzzy,
}

/// Global study settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySettings {
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::default(),
            fuzzy_threshold: 0.8,
        }
    }
}

/// Per-collection overrides; unset fields fall back to the global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_mode: Option<MatchingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_threshold: Option<f64>,
}

/// Effective settings (global merged with collection overrides).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub matching_mode: MatchingMode,
    pub fuzzy_threshold: f64,
}

impl EffectiveSettings {
    /// Merge global settings with optional collection settings.
    pub fn merge(global: &StudySettings, collection: Option<&CollectionSettings>) -> Self {
        match collection {
            Some(c) => Self {
                matching_mode: c.matching_mode.unwrap_or(global.matching_mode),
                fuzzy_threshold: c.fuzzy_threshold.unwrap_or(global.fuzzy_threshold),
            },
            None => Self {
                matching_mode: global.matching_mode,
                fuzzy_threshold: global.fuzzy_threshold,
            },
        }
    }
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self::merge(&StudySettings::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rejects_values_above_five() {
        assert!(ConfidenceRating::new(5).is_ok());
        assert_eq!(
            ConfidenceRating::new(6),
            Err(ScheduleError::RatingOutOfRange(6))
        );
    }

    #[test]
    fn rating_success_boundary() {
        assert!(!ConfidenceRating::new(2).unwrap().is_success());
        assert!(ConfidenceRating::new(3).unwrap().is_success());
    }

    #[test]
    fn rating_from_correct() {
        assert_eq!(ConfidenceRating::from_correct(true).value(), 5);
        assert_eq!(ConfidenceRating::from_correct(false).value(), 0);
    }

    #[test]
    fn rating_deserialize_validates() {
        let ok: ConfidenceRating = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<ConfidenceRating>("9").is_err());
    }

    #[test]
    fn merge_prefers_collection_overrides() {
        let global = StudySettings::default();
        let collection = CollectionSettings {
            matching_mode: Some(MatchingMode::Exact),
            fuzzy_threshold: None,
        };
        let merged = EffectiveSettings::merge(&global, Some(&collection));
        assert_eq!(merged.matching_mode, MatchingMode::Exact);
        assert_eq!(merged.fuzzy_threshold, 0.8);
    }

    #[test]
    fn matching_mode_serializes_snake_case() {
        let json = serde_json::to_string(&MatchingMode::CaseInsensitive).unwrap();
        assert_eq!(json, "\"case_insensitive\"");
    }
}
