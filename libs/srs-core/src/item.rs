//! The learnable item and its boundary checks.

use crate::algorithm::SchedulingResult;
use crate::types::{ConfidenceRating, MAX_EASE_FACTOR, MIN_EASE_FACTOR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of an item within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One flashcard: content plus scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub front: String,
    pub back: String,
    /// Days until next review, as of the last computation.
    pub interval: u32,
    pub ease_factor: f64,
    /// `None` means due immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    /// Informational only; the engine takes the new rating as an argument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_confidence_rating: Option<ConfidenceRating>,
}

impl Item {
    /// Create an item that is due immediately with maximal ease.
    pub fn new(front: impl Into<String>, back: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            front: front.into(),
            back: back.into(),
            interval: 0,
            ease_factor: MAX_EASE_FACTOR,
            next_review_date: Some(now),
            last_confidence_rating: None,
        }
    }

    /// Check the item invariants: non-empty content and an ease factor
    /// inside its clamp range. The interval is unsigned by construction.
    ///
    /// Invalid items must never be scheduled or persisted.
    pub fn is_valid(&self) -> bool {
        !self.front.trim().is_empty()
            && !self.back.trim().is_empty()
            && self.ease_factor.is_finite()
            && (MIN_EASE_FACTOR..=MAX_EASE_FACTOR).contains(&self.ease_factor)
    }

    /// Whether the item should be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date.map_or(true, |date| date <= now)
    }

    /// Produce a new snapshot with `update` merged over this item.
    ///
    /// No validation happens here so that several updates can be chained;
    /// callers check `is_valid` before scheduling and before persisting.
    pub fn apply_update(&self, update: &ItemUpdate) -> Item {
        Item {
            id: self.id,
            front: self.front.clone(),
            back: self.back.clone(),
            interval: update.interval.unwrap_or(self.interval),
            ease_factor: update.ease_factor.unwrap_or(self.ease_factor),
            next_review_date: update.next_review_date.or(self.next_review_date),
            last_confidence_rating: update
                .last_confidence_rating
                .or(self.last_confidence_rating),
        }
    }
}

/// Partial set of scheduling fields; unset fields keep the original value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_confidence_rating: Option<ConfidenceRating>,
}

impl ItemUpdate {
    /// Update carrying a schedule result and the rating that produced it.
    pub fn scheduled(result: &SchedulingResult, rating: ConfidenceRating) -> Self {
        Self {
            interval: Some(result.interval),
            ease_factor: Some(result.ease_factor),
            next_review_date: Some(result.next_review_date),
            last_confidence_rating: Some(rating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_item_is_due_immediately_with_max_ease() {
        let item = Item::new("What is Rust?", "A systems language", now());
        assert_eq!(item.interval, 0);
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.next_review_date, Some(now()));
        assert_eq!(item.last_confidence_rating, None);
        assert!(item.is_valid());
        assert!(item.is_due(now()));
    }

    #[test]
    fn empty_content_is_invalid() {
        let mut item = Item::new("front", "back", now());
        item.front = String::new();
        assert!(!item.is_valid());

        let mut item = Item::new("front", "back", now());
        item.back = "   ".to_string();
        assert!(!item.is_valid());
    }

    #[test]
    fn ease_factor_outside_clamp_is_invalid() {
        let mut item = Item::new("front", "back", now());
        item.ease_factor = 1.29;
        assert!(!item.is_valid());
        item.ease_factor = 2.51;
        assert!(!item.is_valid());
        item.ease_factor = f64::NAN;
        assert!(!item.is_valid());
        item.ease_factor = 1.3;
        assert!(item.is_valid());
    }

    #[test]
    fn absent_date_is_due() {
        let mut item = Item::new("front", "back", now());
        item.next_review_date = None;
        assert!(item.is_due(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn future_date_is_not_due() {
        let mut item = Item::new("front", "back", now());
        item.next_review_date = Some(now() + chrono::Duration::days(1));
        assert!(!item.is_due(now()));
    }

    #[test]
    fn apply_update_falls_back_to_original() {
        let item = Item::new("front", "back", now());
        let update = ItemUpdate {
            interval: Some(6),
            ..Default::default()
        };
        let updated = item.apply_update(&update);
        assert_eq!(updated.interval, 6);
        assert_eq!(updated.ease_factor, item.ease_factor);
        assert_eq!(updated.next_review_date, item.next_review_date);
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.front, "front");
    }

    #[test]
    fn apply_update_is_idempotent() {
        let item = Item::new("front", "back", now());
        let update = ItemUpdate {
            interval: Some(15),
            ease_factor: Some(2.36),
            next_review_date: Some(now() + chrono::Duration::days(15)),
            last_confidence_rating: Some(ConfidenceRating::new(4).unwrap()),
        };
        let once = item.apply_update(&update);
        let twice = once.apply_update(&update);
        assert_eq!(twice, once);
    }

    #[test]
    fn apply_update_does_not_validate() {
        let item = Item::new("front", "back", now());
        let update = ItemUpdate {
            ease_factor: Some(9.0),
            ..Default::default()
        };
        let updated = item.apply_update(&update);
        assert_eq!(updated.ease_factor, 9.0);
        assert!(!updated.is_valid());
    }
}
