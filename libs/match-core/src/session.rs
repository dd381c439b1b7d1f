//! Session state for one game and its construction.

use crate::error::{GameError, Result};
use crate::types::{ActiveCard, CardId, ItemKind, SlotRef, SlotState, WordList, WordPair};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

/// What happened to a term during the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermOutcome {
    #[default]
    Unseen,
    MatchedClean,
    MatchedAfterMismatch,
    MismatchedOnly,
}

impl TermOutcome {
    pub fn was_matched(self) -> bool {
        matches!(self, Self::MatchedClean | Self::MatchedAfterMismatch)
    }

    pub fn was_mismatched(self) -> bool {
        matches!(self, Self::MatchedAfterMismatch | Self::MismatchedOnly)
    }

    fn on_match(self) -> Self {
        match self {
            Self::Unseen | Self::MatchedClean => Self::MatchedClean,
            Self::MismatchedOnly | Self::MatchedAfterMismatch => Self::MatchedAfterMismatch,
        }
    }

    fn on_mismatch(self) -> Self {
        match self {
            Self::Unseen | Self::MismatchedOnly => Self::MismatchedOnly,
            Self::MatchedClean | Self::MatchedAfterMismatch => Self::MatchedAfterMismatch,
        }
    }
}

/// Per-term outcome record, keyed by the exact term text shown on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermOutcomes(HashMap<String, TermOutcome>);

impl TermOutcomes {
    pub fn get(&self, term: &str) -> TermOutcome {
        self.0.get(term).copied().unwrap_or_default()
    }

    pub fn was_matched(&self, term: &str) -> bool {
        self.get(term).was_matched()
    }

    pub fn was_mismatched(&self, term: &str) -> bool {
        self.get(term).was_mismatched()
    }

    /// Terms matched without a single mismatch.
    pub fn is_clean_match(&self, term: &str) -> bool {
        self.get(term) == TermOutcome::MatchedClean
    }

    pub(crate) fn record_match(&mut self, term: &str) {
        let entry = self.0.entry(term.to_string()).or_default();
        *entry = entry.on_match();
    }

    /// Returns true on the first mismatch of the term this session.
    pub(crate) fn record_mismatch(&mut self, term: &str) -> bool {
        let entry = self.0.entry(term.to_string()).or_default();
        let first = !entry.was_mismatched();
        *entry = entry.on_mismatch();
        first
    }

    pub fn matched_count(&self) -> usize {
        self.0.values().filter(|o| o.was_matched()).count()
    }

    pub fn mismatched_count(&self) -> usize {
        self.0.values().filter(|o| o.was_mismatched()).count()
    }
}

/// Currently selected slot and the text it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub slot: SlotRef,
    pub text: String,
}

/// Deferred release of an incorrect pair, keyed by the exact slots it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReset {
    pub session: Uuid,
    pub term_slot: SlotRef,
    pub definition_slot: SlotRef,
    pub token: u64,
    pub delay_ms: u64,
}

impl PendingReset {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// One board item for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem {
    pub slot: SlotRef,
    pub text: String,
}

/// Terms and definitions, each shuffled independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub session: Uuid,
    pub terms: Vec<BoardItem>,
    pub definitions: Vec<BoardItem>,
}

/// Ephemeral state of the game in progress.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    cards: Vec<ActiveCard>,
    raw_cards: Vec<WordPair>,
    pub(crate) selected_term: Option<Selection>,
    pub(crate) selected_definition: Option<Selection>,
    pub(crate) matched_slots: HashSet<SlotRef>,
    pub(crate) matched_pairs: usize,
    pub(crate) mismatched_attempts: usize,
    pub(crate) outcomes: TermOutcomes,
    pub(crate) pending_resets: HashMap<(SlotRef, SlotRef), u64>,
    pub(crate) next_reset_token: u64,
    /// Value of `next_reset_token` at the most recent correct match.
    pub(crate) last_match_token: Option<u64>,
}

impl Session {
    fn new(raw_cards: Vec<WordPair>) -> Self {
        let id = Uuid::new_v4();
        let cards = raw_cards
            .iter()
            .enumerate()
            .map(|(index, pair)| ActiveCard {
                id: CardId::new(&id, index),
                term: pair.term.clone(),
                definition: pair.definition.clone(),
            })
            .collect();

        Self {
            id,
            started_at: Utc::now(),
            cards,
            raw_cards,
            selected_term: None,
            selected_definition: None,
            matched_slots: HashSet::new(),
            matched_pairs: 0,
            mismatched_attempts: 0,
            outcomes: TermOutcomes::default(),
            pending_resets: HashMap::new(),
            next_reset_token: 0,
            last_match_token: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn cards(&self) -> &[ActiveCard] {
        &self.cards
    }

    /// Pairs in play, including a reviewed learned word if one was injected.
    pub fn raw_cards(&self) -> &[WordPair] {
        &self.raw_cards
    }

    pub fn selected_term(&self) -> Option<&Selection> {
        self.selected_term.as_ref()
    }

    pub fn selected_definition(&self) -> Option<&Selection> {
        self.selected_definition.as_ref()
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn mismatched_attempts(&self) -> usize {
        self.mismatched_attempts
    }

    pub fn outcomes(&self) -> &TermOutcomes {
        &self.outcomes
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.matched_pairs == self.cards.len()
    }

    /// Some pairs matched, but not all of them.
    pub fn is_partially_played(&self) -> bool {
        self.matched_pairs > 0 && self.matched_pairs < self.cards.len()
    }

    pub fn card(&self, id: &CardId) -> Option<&ActiveCard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Text shown by a slot, if the slot belongs to this session.
    pub fn slot_text(&self, slot: &SlotRef) -> Option<&str> {
        self.card(&slot.card).map(|card| card.text(slot.kind))
    }

    pub fn slot_state(&self, slot: &SlotRef) -> SlotState {
        if self.matched_slots.contains(slot) {
            return SlotState::Matched;
        }
        let selected = match slot.kind {
            ItemKind::Term => &self.selected_term,
            ItemKind::Definition => &self.selected_definition,
        };
        match selected {
            Some(selection) if &selection.slot == slot => SlotState::Selected,
            _ => SlotState::Unselected,
        }
    }

    /// Shuffle terms and definitions separately for display.
    pub fn layout<R: Rng>(&self, rng: &mut R) -> BoardLayout {
        let mut terms: Vec<BoardItem> = self
            .cards
            .iter()
            .map(|card| BoardItem {
                slot: SlotRef::term(card.id.clone()),
                text: card.term.clone(),
            })
            .collect();
        let mut definitions: Vec<BoardItem> = self
            .cards
            .iter()
            .map(|card| BoardItem {
                slot: SlotRef::definition(card.id.clone()),
                text: card.definition.clone(),
            })
            .collect();

        terms.shuffle(rng);
        definitions.shuffle(rng);

        BoardLayout {
            session: self.id,
            terms,
            definitions,
        }
    }
}

/// Build a new session from the words not yet learned.
///
/// With probability `review_chance` one of the chosen cards is swapped for a
/// random learned word so mastered vocabulary comes back for review.
pub fn setup_game<R: Rng>(
    master: &WordList,
    learned: &WordList,
    cards_per_game: usize,
    review_chance: f64,
    rng: &mut R,
) -> Result<Session> {
    let mut available: Vec<WordPair> = master
        .iter()
        .filter(|pair| !learned.contains_term(&pair.term))
        .cloned()
        .collect();

    if available.len() < cards_per_game {
        return Err(GameError::InsufficientWords {
            available: available.len(),
            required: cards_per_game,
        });
    }

    available.shuffle(rng);
    available.truncate(cards_per_game);

    if !learned.is_empty() && !available.is_empty() && rng.random::<f64>() < review_chance {
        let review = learned.as_slice()[rng.random_range(0..learned.len())].clone();
        let index = rng.random_range(0..available.len());
        tracing::info!("Including learned word for review: {:?}", review.term);
        available[index] = review;
    }

    let session = Session::new(available);
    tracing::debug!(
        session = %session.id,
        cards = session.cards.len(),
        "Game session created"
    );
    Ok(session)
}
