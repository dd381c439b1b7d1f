//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for local SQLite database.
pub const SCHEMA: &str = r#"
-- Persisted word lists, one JSON array per list
CREATE TABLE IF NOT EXISTS word_lists (
    name TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Game settings
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    cards_per_game INTEGER NOT NULL,
    review_chance REAL NOT NULL,
    mismatch_reset_ms INTEGER NOT NULL,
    speech_language TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

/// Initialize settings with defaults if not exists.
pub const INIT_SETTINGS: &str = "INSERT OR IGNORE INTO settings \
    (id, cards_per_game, review_chance, mismatch_reset_ms, speech_language) \
    VALUES (1, ?1, ?2, ?3, ?4)";

/// Record the schema version if not exists.
pub const INIT_SCHEMA_VERSION: &str = "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)";
