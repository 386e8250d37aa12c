//! Shared fixtures for srs-core integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use srs_core::{CollectionId, Item, MemoryStore};

/// Fixed "now" used across tests.
pub fn start_of_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
}

pub fn collection() -> CollectionId {
    CollectionId::new("reviewer", "geography")
}

/// Items due on consecutive days before `start_of_day`, oldest first.
pub fn overdue_items(cards: &[(&str, &str)]) -> Vec<Item> {
    let count = cards.len() as i64;
    cards
        .iter()
        .enumerate()
        .map(|(i, (front, back))| {
            let mut item = Item::new(*front, *back, start_of_day());
            item.next_review_date = Some(start_of_day() - Duration::days(count - i as i64));
            item
        })
        .collect()
}

pub fn seeded_store(items: &[Item]) -> MemoryStore {
    MemoryStore::with_collection(collection(), items.to_vec())
}
