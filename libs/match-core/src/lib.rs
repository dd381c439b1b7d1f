//! Core library for the vocabulary matching game.
//!
//! Provides:
//! - CSV importer for term/definition word lists
//! - Game sessions with review injection of learned words
//! - Selection and matching state machine with deferred mismatch resets
//! - Reconciliation of session results into the learned and mismatched lists
//! - Word list persistence over any key-value backend
//! - Shared types (WordPair, WordList, SlotRef, GameSettings, etc.)

pub mod error;
pub mod game;
pub mod matching;
pub mod parser;
pub mod progress;
pub mod pronounce;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod types;

pub use error::{GameError, Result, StoreError};
pub use game::{Game, Settlement};
pub use matching::ClickOutcome;
pub use parser::{parse_csv, ImportReport};
pub use progress::ProgressSummary;
pub use pronounce::{Muted, Pronouncer};
pub use reconcile::ListUpdate;
pub use session::{
    setup_game, BoardItem, BoardLayout, PendingReset, Selection, Session, TermOutcome,
    TermOutcomes,
};
pub use store::{KeyValueStore, MemoryStore, WordStore};
pub use types::{
    ActiveCard, CardId, GameSettings, ItemKind, ListName, SlotRef, SlotState, WordList, WordPair,
    MIN_CARDS_FOR_GAME,
};
