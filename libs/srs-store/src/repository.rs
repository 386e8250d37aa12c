//! SQLite-backed item store.

use crate::error::DbError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use srs_core::{CollectionId, ConfidenceRating, Item, ItemId, ItemStore, StoreError};
use std::path::Path;
use uuid::Uuid;

type Result<T> = std::result::Result<T, DbError>;

/// SQLite implementation of the persistence collaborator.
///
/// Rows are decoded strictly: an undecodable id, date, interval or rating
/// makes `get_items` return `DbError::InvalidData` for the whole collection
/// instead of skipping the row, so nothing is silently lost by the next
/// whole-collection write.
pub struct SqliteStore {
    conn: Connection,
}

/// Item columns as stored, before validation.
struct ItemRow {
    id: String,
    front: String,
    back: String,
    interval_days: i64,
    ease_factor: f64,
    next_review_date: Option<String>,
    last_confidence_rating: Option<i64>,
}

impl ItemRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            front: row.get(1)?,
            back: row.get(2)?,
            interval_days: row.get(3)?,
            ease_factor: row.get(4)?,
            next_review_date: row.get(5)?,
            last_confidence_rating: row.get(6)?,
        })
    }

    fn into_item(self) -> Result<Item> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::InvalidData(format!("item id {}: {}", self.id, e)))?;
        let interval = u32::try_from(self.interval_days).map_err(|_| {
            DbError::InvalidData(format!("item {}: interval {}", self.id, self.interval_days))
        })?;
        let next_review_date = self
            .next_review_date
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| DbError::InvalidData(format!("item {}: date {}: {}", self.id, s, e)))
            })
            .transpose()?;
        let last_confidence_rating = self
            .last_confidence_rating
            .map(|value| {
                u8::try_from(value)
                    .ok()
                    .and_then(|v| ConfidenceRating::new(v).ok())
                    .ok_or_else(|| {
                        DbError::InvalidData(format!("item {}: rating {}", self.id, value))
                    })
            })
            .transpose()?;

        Ok(Item {
            id: ItemId::from_uuid(id),
            front: self.front,
            back: self.back,
            interval,
            ease_factor: self.ease_factor,
            next_review_date,
            last_confidence_rating,
        })
    }
}

impl SqliteStore {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn };
        store.initialize()?;
        tracing::info!(path = %path.as_ref().display(), "opened item database");
        Ok(store)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_SCHEMA_VERSION)?;
        Ok(())
    }

    /// Highest schema version recorded in the database.
    pub fn schema_version(&self) -> Result<i32> {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .map_err(Into::into)
    }

    /// Read a collection in stored order.
    pub fn get_items(&self, collection: &CollectionId) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, interval_days, ease_factor, next_review_date, last_confidence_rating
             FROM items
             WHERE collection_owner = ?1 AND collection_name = ?2
             ORDER BY position",
        )?;

        let rows = stmt
            .query_map(params![collection.owner, collection.name], ItemRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    /// Replace a collection's items inside one transaction.
    pub fn replace_items(&self, collection: &CollectionId, items: &[Item]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        // Rolled back on drop unless committed
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO collections (owner, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(owner, name) DO UPDATE SET updated_at = excluded.updated_at",
            params![collection.owner, collection.name, now],
        )?;
        tx.execute(
            "DELETE FROM items WHERE collection_owner = ?1 AND collection_name = ?2",
            params![collection.owner, collection.name],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO items (collection_owner, collection_name, position, id, front, back,
                    interval_days, ease_factor, next_review_date, last_confidence_rating)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (position, item) in items.iter().enumerate() {
                stmt.execute(params![
                    collection.owner,
                    collection.name,
                    position as i64,
                    item.id.to_string(),
                    item.front,
                    item.back,
                    item.interval,
                    item.ease_factor,
                    item.next_review_date.map(|d| d.to_rfc3339()),
                    item.last_confidence_rating.map(ConfidenceRating::value),
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!(%collection, items = items.len(), "replaced collection");
        Ok(())
    }

    /// Collections belonging to `owner`, by name.
    pub fn list_collections(&self, owner: &str) -> Result<Vec<CollectionId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT owner, name FROM collections WHERE owner = ?1 ORDER BY name")?;

        let ids = stmt
            .query_map(params![owner], |row| {
                Ok(CollectionId {
                    owner: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ids)
    }

    /// Delete a collection and all its items. Returns whether it existed.
    pub fn delete_collection(&self, collection: &CollectionId) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM items WHERE collection_owner = ?1 AND collection_name = ?2",
            params![collection.owner, collection.name],
        )?;
        let removed = tx.execute(
            "DELETE FROM collections WHERE owner = ?1 AND name = ?2",
            params![collection.owner, collection.name],
        )?;
        tx.commit()?;

        if removed > 0 {
            tracing::info!(%collection, "deleted collection");
        }
        Ok(removed > 0)
    }

    /// When the collection was last written, if it exists.
    pub fn updated_at(&self, collection: &CollectionId) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM collections WHERE owner = ?1 AND name = ?2",
                params![collection.owner, collection.name],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DbError::InvalidData(format!("updated_at {}: {}", s, e)))
        })
        .transpose()
    }
}

impl ItemStore for SqliteStore {
    fn load_items(&self, collection: &CollectionId) -> std::result::Result<Vec<Item>, StoreError> {
        self.get_items(collection).map_err(Into::into)
    }

    fn save_items(
        &self,
        collection: &CollectionId,
        items: &[Item],
    ) -> std::result::Result<(), StoreError> {
        self.replace_items(collection, items).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SCHEMA_VERSION;

    #[test]
    fn test_schema_version_recorded() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_corrupt_rating_is_invalid_data() {
        let store = SqliteStore::open_in_memory().unwrap();
        let collection = CollectionId::new("u", "c");
        store
            .replace_items(&collection, &[Item::new("q", "a", Utc::now())])
            .unwrap();
        store
            .conn
            .execute("UPDATE items SET last_confidence_rating = 9", [])
            .unwrap();

        let err = store.get_items(&collection).unwrap_err();
        assert!(matches!(err, DbError::InvalidData(_)));
    }

    #[test]
    fn test_corrupt_id_is_invalid_data() {
        let store = SqliteStore::open_in_memory().unwrap();
        let collection = CollectionId::new("u", "c");
        store
            .replace_items(&collection, &[Item::new("q", "a", Utc::now())])
            .unwrap();
        store
            .conn
            .execute("UPDATE items SET id = 'not-a-uuid'", [])
            .unwrap();

        assert!(matches!(
            store.get_items(&collection),
            Err(DbError::InvalidData(_))
        ));
    }

    #[test]
    fn test_updated_at_tracks_writes() {
        let store = SqliteStore::open_in_memory().unwrap();
        let collection = CollectionId::new("u", "c");
        assert_eq!(store.updated_at(&collection).unwrap(), None);

        store.replace_items(&collection, &[]).unwrap();
        assert!(store.updated_at(&collection).unwrap().is_some());
    }
}
