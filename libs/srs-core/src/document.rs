//! JSON documents in the stored collection schema.
//!
//! # Format
//! ```json
//! [
//!   {
//!     "front": "What is Rust?",
//!     "back": "A systems programming language.",
//!     "interval": 6,
//!     "easeFactor": 2.36,
//!     "nextReviewDate": "2024-03-16T09:30:00Z",
//!     "confidenceRating": 4
//!   }
//! ]
//! ```
//!
//! Documents may come from older writers: `id` is optional, the rating may be
//! spelled `confidenceRating` or `lastConfidenceRating` (a rating of 0 on an
//! item with interval 0 is the old "not rated yet" marker), and missing
//! scheduling fields fall back to a fresh item's values (interval 0, ease 2.5,
//! no date, i.e. due now).

use crate::error::ImportError;
use crate::item::{Item, ItemId};
use crate::types::{ConfidenceRating, MAX_EASE_FACTOR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Loosely typed document as found in storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    front: Option<String>,
    #[serde(default)]
    back: Option<String>,
    #[serde(default)]
    interval: Option<f64>,
    #[serde(default)]
    ease_factor: Option<f64>,
    #[serde(default)]
    next_review_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "confidenceRating")]
    last_confidence_rating: Option<i64>,
}

impl RawItem {
    /// Convert to a typed item, or `None` if the document breaks an invariant.
    fn into_item(self) -> Option<Item> {
        let interval = match self.interval {
            None => 0,
            Some(days) if days.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&days) => {
                days as u32
            }
            Some(_) => return None,
        };
        let last_confidence_rating = match self.last_confidence_rating {
            None => None,
            // Older writers stored 0 on creation to mean "not rated yet"; a
            // real failing rating always leaves interval 1
            Some(0) if interval == 0 => None,
            Some(value) => {
                let value = u8::try_from(value).ok()?;
                Some(ConfidenceRating::new(value).ok()?)
            }
        };

        let item = Item {
            id: self.id.map(ItemId::from_uuid).unwrap_or_default(),
            front: self.front?,
            back: self.back?,
            interval,
            ease_factor: self.ease_factor.unwrap_or(MAX_EASE_FACTOR),
            next_review_date: self.next_review_date,
            last_confidence_rating,
        };
        item.is_valid().then_some(item)
    }
}

/// Document written by `export_items`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemDocument<'a> {
    id: &'a ItemId,
    front: &'a str,
    back: &'a str,
    interval: u32,
    ease_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_review_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_confidence_rating: Option<u8>,
}

impl<'a> From<&'a Item> for ItemDocument<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: &item.id,
            front: &item.front,
            back: &item.back,
            interval: item.interval,
            ease_factor: item.ease_factor,
            next_review_date: item.next_review_date,
            last_confidence_rating: item.last_confidence_rating.map(ConfidenceRating::value),
        }
    }
}

/// Parse a JSON array of item documents.
///
/// Every document must pass validation; the first one that does not fails
/// the whole import.
pub fn import_items(json: &str) -> Result<Vec<Item>, ImportError> {
    let raw: Vec<RawItem> = serde_json::from_str(json)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, doc)| {
            doc.into_item().ok_or_else(|| {
                tracing::warn!(index, "invalid item document");
                ImportError::InvalidItem { index }
            })
        })
        .collect()
}

/// Serialize items as a pretty-printed JSON array of documents.
pub fn export_items(items: &[Item]) -> Result<String, ImportError> {
    let docs: Vec<ItemDocument<'_>> = items.iter().map(ItemDocument::from).collect();
    Ok(serde_json::to_string_pretty(&docs)?)
}
