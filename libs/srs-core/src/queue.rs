//! Due-ordered review queue.

use crate::item::Item;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Items ordered by next review date, earliest first.
///
/// Derived on demand and never persisted; rebuild after any review since a
/// single review can move an item anywhere in the order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewQueue {
    items: Vec<Item>,
}

impl ReviewQueue {
    /// Build a queue from a collection snapshot.
    pub fn build(items: Vec<Item>) -> Self {
        Self {
            items: build_queue(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Number of items due at `now`. Due items form a prefix of the queue.
    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.items.partition_point(|item| item.is_due(now))
    }
}

impl<'a> IntoIterator for &'a ReviewQueue {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Stable-sort items ascending by next review date.
///
/// An absent date sorts before every present date; ties keep their input order.
pub fn build_queue(mut items: Vec<Item>) -> Vec<Item> {
    // Option orders None before Some, and sort_by_key is stable
    items.sort_by_key(|item| item.next_review_date);
    items
}
