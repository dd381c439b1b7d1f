//! Repository pattern for database access.

use crate::db::error::DbError;
use chrono::Utc;
use match_core::{GameSettings, KeyValueStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for settings operations.
pub trait SettingsRepository {
    fn get_settings(&self) -> Result<GameSettings>;
    fn save_settings(&self, settings: &GameSettings) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;

        let defaults = GameSettings::default();
        self.conn.execute(
            super::schema::INIT_SETTINGS,
            params![
                to_sql_int(defaults.cards_per_game as u64)?,
                defaults.review_chance,
                to_sql_int(defaults.mismatch_reset_ms)?,
                defaults.speech_language,
            ],
        )?;
        self.conn.execute(
            super::schema::INIT_SCHEMA_VERSION,
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Raw JSON payload stored under a list key.
    pub fn get_payload(&self, name: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT payload FROM word_lists WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Replace the payload stored under a list key.
    pub fn put_payload(&self, name: &str, payload: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO word_lists (name, payload, updated_at) VALUES (?1, ?2, ?3)",
            params![name, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteRepository {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        self.get_payload(key).map_err(Into::into)
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        self.put_payload(key, value).map_err(Into::into)
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_settings(&self) -> Result<GameSettings> {
        let (cards_per_game, review_chance, mismatch_reset_ms, speech_language) =
            self.conn.query_row(
                "SELECT cards_per_game, review_chance, mismatch_reset_ms, speech_language FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )?;

        let settings = GameSettings {
            cards_per_game: usize::try_from(cards_per_game)
                .map_err(|_| DbError::InvalidData(format!("cards_per_game {cards_per_game}")))?,
            review_chance,
            mismatch_reset_ms: u64::try_from(mismatch_reset_ms).map_err(|_| {
                DbError::InvalidData(format!("mismatch_reset_ms {mismatch_reset_ms}"))
            })?,
            speech_language,
        };
        settings
            .validate()
            .map_err(|e| DbError::InvalidData(e.to_string()))?;
        Ok(settings)
    }

    fn save_settings(&self, settings: &GameSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| DbError::InvalidData(e.to_string()))?;

        self.conn.execute(
            "UPDATE settings SET cards_per_game = ?1, review_chance = ?2, mismatch_reset_ms = ?3, speech_language = ?4 WHERE id = 1",
            params![
                to_sql_int(settings.cards_per_game as u64)?,
                settings.review_chance,
                to_sql_int(settings.mismatch_reset_ms)?,
                settings.speech_language,
            ],
        )?;

        Ok(())
    }
}

fn to_sql_int(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| DbError::InvalidData(format!("{value} out of range")))
}
