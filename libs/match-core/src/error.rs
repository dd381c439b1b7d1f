//! Error types for match-core.

use thiserror::Error;

/// Result type alias using GameError.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that abort starting a game. Nothing is mutated when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Your word list is empty. Please import a CSV file.")]
    EmptyWordList,

    #[error("You have {total} words. Need at least {required} to generate a game. Please import more.")]
    WordListTooSmall { total: usize, required: usize },

    #[error("Not enough new words (found {available}, need {required}). Add more words or reset learning progress.")]
    InsufficientWords { available: usize, required: usize },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors raised by a key-value store backend.
///
/// These never leave [`crate::store::WordStore`]; they are logged and the
/// in-memory lists stay authoritative.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
