//! SQLite persistence for item collections.
//!
//! Implements the whole-collection replace contract of `srs_core::ItemStore`:
//! each save deletes and rewrites a collection's rows inside one transaction.

pub mod config;
pub mod error;
pub mod repository;
pub mod schema;

pub use config::{default_database_path, StoreConfig, DATABASE_PATH_VAR};
pub use error::DbError;
pub use repository::SqliteStore;
