//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the item database.
pub const SCHEMA: &str = r#"
-- One row per owner's collection
CREATE TABLE IF NOT EXISTS collections (
    owner TEXT NOT NULL,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (owner, name)
);

-- Items, in collection order
CREATE TABLE IF NOT EXISTS items (
    collection_owner TEXT NOT NULL,
    collection_name TEXT NOT NULL,
    position INTEGER NOT NULL,
    id TEXT NOT NULL,
    front TEXT NOT NULL,
    back TEXT NOT NULL,
    interval_days INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    next_review_date TEXT,
    last_confidence_rating INTEGER,
    PRIMARY KEY (collection_owner, collection_name, position),
    UNIQUE (collection_owner, collection_name, id)
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_items_due ON items(next_review_date);
"#;

/// Record the schema version if not present.
pub const INIT_SCHEMA_VERSION: &str = r#"
INSERT OR IGNORE INTO schema_version (version) VALUES (1);
"#;
