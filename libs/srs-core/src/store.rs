//! Persistence collaborator contract.

use crate::error::StoreError;
use crate::item::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// Identifies one owner's item collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId {
    pub owner: String,
    pub name: String,
}

impl CollectionId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Durable storage of item collections.
///
/// `save_items` replaces the whole collection atomically: either every item
/// in the call is stored, or the previous contents remain untouched.
pub trait ItemStore {
    /// Snapshot read; an unknown collection is empty.
    ///
    /// A stored item that cannot be decoded fails the whole load rather than
    /// being dropped, so a corrupt row makes the collection unreadable (and
    /// every session write to it fail) until the row is repaired.
    fn load_items(&self, collection: &CollectionId) -> Result<Vec<Item>, StoreError>;

    /// Overwrite the collection with exactly `items`, in order.
    fn save_items(&self, collection: &CollectionId, items: &[Item]) -> Result<(), StoreError>;
}

impl<S: ItemStore + ?Sized> ItemStore for &S {
    fn load_items(&self, collection: &CollectionId) -> Result<Vec<Item>, StoreError> {
        (**self).load_items(collection)
    }

    fn save_items(&self, collection: &CollectionId, items: &[Item]) -> Result<(), StoreError> {
        (**self).save_items(collection, items)
    }
}

/// In-process store, last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionId, Vec<Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one collection.
    pub fn with_collection(collection: CollectionId, items: Vec<Item>) -> Self {
        let store = Self::new();
        store
            .collections
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(collection, items);
        store
    }

    /// Collections currently held, sorted.
    pub fn collection_ids(&self) -> Result<Vec<CollectionId>, StoreError> {
        let guard = self.lock()?;
        let mut ids: Vec<_> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<CollectionId, Vec<Item>>>, StoreError> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl ItemStore for MemoryStore {
    fn load_items(&self, collection: &CollectionId) -> Result<Vec<Item>, StoreError> {
        Ok(self.lock()?.get(collection).cloned().unwrap_or_default())
    }

    fn save_items(&self, collection: &CollectionId, items: &[Item]) -> Result<(), StoreError> {
        self.lock()?.insert(collection.clone(), items.to_vec());
        Ok(())
    }
}
