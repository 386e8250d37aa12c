//! Store configuration.

use crate::error::DbError;
use crate::repository::SqliteStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the database path.
pub const DATABASE_PATH_VAR: &str = "SRS_DATABASE_PATH";

/// Where the item database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl StoreConfig {
    /// Read configuration from the environment, loading `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(DATABASE_PATH_VAR).filter(|value| !value.trim().is_empty()) {
            Some(path) => Self {
                database_path: PathBuf::from(path),
            },
            None => Self::default(),
        }
    }

    /// Open the configured database, creating its directory if needed.
    pub fn open(&self) -> Result<SqliteStore, DbError> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        SqliteStore::open(&self.database_path)
    }
}

/// Platform data directory, falling back to the current directory.
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("srs")
        .join("flashcards.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_lookup() {
        let config = StoreConfig::from_lookup(|key| {
            (key == DATABASE_PATH_VAR).then(|| "/tmp/reviews.db".to_string())
        });
        assert_eq!(config.database_path, PathBuf::from("/tmp/reviews.db"));
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = StoreConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_default_path_file_name() {
        let path = default_database_path();
        assert!(path.ends_with("srs/flashcards.db"));
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("srs-store-{}", uuid::Uuid::new_v4()));
        let config = StoreConfig {
            database_path: dir.join("nested").join("items.db"),
        };
        let store = config.open().unwrap();
        assert_eq!(store.schema_version().unwrap(), crate::schema::SCHEMA_VERSION);
        drop(store);
        std::fs::remove_dir_all(&dir).ok();
    }
}
