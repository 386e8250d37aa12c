//! Collection statistics.

use crate::item::Item;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of a collection's scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total_items: usize,
    pub due_items: usize,
    /// Items never rated.
    pub unreviewed_items: usize,
    pub average_ease: f64,
    pub average_interval: f64,
}

impl CollectionStats {
    pub fn from_items(items: &[Item], now: DateTime<Utc>) -> Self {
        let total_items = items.len();
        if total_items == 0 {
            return Self {
                total_items: 0,
                due_items: 0,
                unreviewed_items: 0,
                average_ease: 0.0,
                average_interval: 0.0,
            };
        }

        let due_items = items.iter().filter(|item| item.is_due(now)).count();
        let unreviewed_items = items
            .iter()
            .filter(|item| item.last_confidence_rating.is_none())
            .count();
        let ease_sum: f64 = items.iter().map(|item| item.ease_factor).sum();
        let interval_sum: f64 = items.iter().map(|item| f64::from(item.interval)).sum();

        Self {
            total_items,
            due_items,
            unreviewed_items,
            average_ease: ease_sum / total_items as f64,
            average_interval: interval_sum / total_items as f64,
        }
    }
}
