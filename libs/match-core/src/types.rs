//! Core types for the word matching game.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of cards a game can be played with.
pub const MIN_CARDS_FOR_GAME: usize = 6;

/// Probability that a learned word is brought back for review.
pub const LEARNED_WORD_REVIEW_CHANCE: f64 = 0.05;

/// How long an incorrect pair stays highlighted before the definition is released.
pub const MISMATCH_RESET_MS: u64 = 1200;

/// A vocabulary pair. Identity is the term, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub term: String,
    pub definition: String,
}

impl WordPair {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    /// Lowercased term used for identity comparisons.
    pub fn key(&self) -> String {
        self.term.to_lowercase()
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.term.to_lowercase() == term.to_lowercase()
    }
}

/// Ordered collection of word pairs with unique terms (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordList(Vec<WordPair>);

impl WordList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list from arbitrary pairs, dropping later duplicates of a term.
    pub fn from_pairs(pairs: impl IntoIterator<Item = WordPair>) -> Self {
        let mut list = Self::new();
        for pair in pairs {
            list.push_unique(pair);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordPair> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[WordPair] {
        &self.0
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.find_term(term).is_some()
    }

    pub fn find_term(&self, term: &str) -> Option<&WordPair> {
        let key = term.to_lowercase();
        self.0.iter().find(|pair| pair.key() == key)
    }

    /// Append a pair unless its term is already present. Returns whether it was added.
    pub fn push_unique(&mut self, pair: WordPair) -> bool {
        if self.contains_term(&pair.term) {
            return false;
        }
        self.0.push(pair);
        true
    }

    /// Remove the entry with the given term. Returns whether anything was removed.
    pub fn remove_term(&mut self, term: &str) -> bool {
        let key = term.to_lowercase();
        match self.0.iter().position(|pair| pair.key() == key) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Copy of this list without any term present in `other`.
    pub fn without_terms_in(&self, other: &WordList) -> WordList {
        WordList(
            self.0
                .iter()
                .filter(|pair| !other.contains_term(&pair.term))
                .cloned()
                .collect(),
        )
    }

    /// Pairs sorted by term for display.
    pub fn sorted(&self) -> Vec<WordPair> {
        let mut pairs = self.0.clone();
        pairs.sort_by_key(|pair| pair.key());
        pairs
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a WordPair;
    type IntoIter = std::slice::Iter<'a, WordPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListName {
    Master,
    Learned,
    Mismatched,
}

impl ListName {
    pub const ALL: [ListName; 3] = [Self::Master, Self::Learned, Self::Mismatched];

    /// Key the list is stored under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Master => "flashcardGameMasterList",
            Self::Learned => "flashcardGameLearnedItems",
            Self::Mismatched => "flashcardGameMismatchedAttempts",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Learned => "learned",
            Self::Mismatched => "mismatched",
        }
    }
}

/// Which side of a pair a board item shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Term,
    Definition,
}

/// Opaque identifier of a card within one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub(crate) fn new(session: &uuid::Uuid, index: usize) -> Self {
        Self(format!("{}-{}", session, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One clickable item on the board: the term or the definition of a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub card: CardId,
    pub kind: ItemKind,
}

impl SlotRef {
    pub fn term(card: CardId) -> Self {
        Self {
            card,
            kind: ItemKind::Term,
        }
    }

    pub fn definition(card: CardId) -> Self {
        Self {
            card,
            kind: ItemKind::Definition,
        }
    }
}

/// Selection state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Unselected,
    Selected,
    Matched,
}

/// Card in play, tagged with its session-scoped id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCard {
    pub id: CardId,
    pub term: String,
    pub definition: String,
}

impl ActiveCard {
    pub fn text(&self, kind: ItemKind) -> &str {
        match kind {
            ItemKind::Term => &self.term,
            ItemKind::Definition => &self.definition,
        }
    }
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub cards_per_game: usize,
    pub review_chance: f64,
    pub mismatch_reset_ms: u64,
    pub speech_language: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            cards_per_game: MIN_CARDS_FOR_GAME,
            review_chance: LEARNED_WORD_REVIEW_CHANCE,
            mismatch_reset_ms: MISMATCH_RESET_MS,
            speech_language: "en-US".to_string(),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<()> {
        if self.cards_per_game == 0 {
            return Err(GameError::InvalidSettings(
                "cards_per_game must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.review_chance) {
            return Err(GameError::InvalidSettings(format!(
                "review_chance must be between 0 and 1, got {}",
                self.review_chance
            )));
        }
        if self.speech_language.trim().is_empty() {
            return Err(GameError::InvalidSettings(
                "speech_language must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
