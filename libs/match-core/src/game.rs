//! The game: word lists, settings and the session in play.

use crate::error::{GameError, Result};
use crate::matching::{self, ClickOutcome};
use crate::parser::{parse_csv, ImportReport};
use crate::progress::ProgressSummary;
use crate::reconcile::{self, ListUpdate};
use crate::session::{setup_game, BoardLayout, PendingReset, Session};
use crate::store::{KeyValueStore, WordStore};
use crate::types::{GameSettings, ListName, SlotRef, WordList, WordPair};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// What a settlement changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub graduated: Vec<WordPair>,
    pub demoted: Vec<WordPair>,
    pub progress: ProgressSummary,
}

/// Single-user game over a key-value backend.
pub struct Game<K> {
    store: WordStore<K>,
    master: WordList,
    learned: WordList,
    mismatched: WordList,
    settings: GameSettings,
    session: Option<Session>,
    rng: StdRng,
}

impl<K: KeyValueStore> Game<K> {
    /// Load the three lists from `backend`.
    pub fn open(backend: K, settings: GameSettings) -> Self {
        Self::with_rng(backend, settings, StdRng::from_os_rng())
    }

    pub fn with_rng(backend: K, settings: GameSettings, rng: StdRng) -> Self {
        let store = WordStore::new(backend);
        let master = store.load(ListName::Master);
        let learned = store.load(ListName::Learned);
        let mismatched = store.load(ListName::Mismatched);
        tracing::info!(
            "Loaded {} words ({} learned, {} mismatched)",
            master.len(),
            learned.len(),
            mismatched.len()
        );

        Self {
            store,
            master,
            learned,
            mismatched,
            settings,
            session: None,
            rng,
        }
    }

    pub fn backend(&self) -> &K {
        self.store.backend()
    }

    pub fn backend_mut(&mut self) -> &mut K {
        self.store.backend_mut()
    }

    pub fn list(&self, name: ListName) -> &WordList {
        match name {
            ListName::Master => &self.master,
            ListName::Learned => &self.learned,
            ListName::Mismatched => &self.mismatched,
        }
    }

    pub fn master(&self) -> &WordList {
        &self.master
    }

    pub fn learned(&self) -> &WordList {
        &self.learned
    }

    pub fn mismatched(&self) -> &WordList {
        &self.mismatched
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GameSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::new(self.master.len(), self.learned.len(), self.mismatched.len())
    }

    /// Whether the master list is large enough for the configured game size.
    pub fn can_generate(&self) -> bool {
        self.master.len() >= self.settings.cards_per_game
    }

    /// Import CSV content into the master list.
    pub fn import_csv(&mut self, content: &str, source_label: &str) -> ImportReport {
        let report = parse_csv(content, source_label, &self.master);
        if report.success {
            for pair in &report.new_words {
                self.master.push_unique(pair.clone());
            }
            self.store.save(ListName::Master, &self.master);
        }
        tracing::info!("{}", report.message);
        report
    }

    /// Start a new game, folding in the results of the one being replaced.
    ///
    /// A partially played game only graduates its clean matches; a completed
    /// one is settled again. The previous session is gone either way, even
    /// when the new one cannot be built.
    pub fn generate(&mut self, cards_per_game: Option<usize>) -> Result<BoardLayout> {
        let required = cards_per_game.unwrap_or(self.settings.cards_per_game);
        if required == 0 {
            return Err(GameError::InvalidSettings(
                "cards_per_game must be at least 1".to_string(),
            ));
        }

        let (partial, complete) = self
            .session
            .as_ref()
            .map_or((false, false), |s| (s.is_partially_played(), s.is_complete()));
        if partial {
            self.graduate();
        } else if complete {
            self.settle();
        }
        self.session = None;

        if self.master.is_empty() {
            return Err(GameError::EmptyWordList);
        }
        if self.master.len() < required {
            return Err(GameError::WordListTooSmall {
                total: self.master.len(),
                required,
            });
        }

        let session = setup_game(
            &self.master,
            &self.learned,
            required,
            self.settings.review_chance,
            &mut self.rng,
        )?;
        let layout = session.layout(&mut self.rng);
        tracing::info!("Game ready with {} cards", session.cards().len());
        self.session = Some(session);
        Ok(layout)
    }

    /// Handle a click on a board slot. Completing the board settles the game.
    pub fn click(&mut self, slot: &SlotRef) -> ClickOutcome {
        let reset_delay_ms = self.settings.mismatch_reset_ms;
        let Some(session) = self.session.as_mut() else {
            return ClickOutcome::Ignored;
        };

        let outcome = matching::click(session, slot, reset_delay_ms);
        if outcome.is_complete() {
            tracing::info!("All pairs matched");
            self.settle();
        }
        outcome
    }

    /// Fire a deferred mismatch reset. Returns whether it was still live.
    pub fn apply_reset(&mut self, reset: &PendingReset) -> bool {
        match self.session.as_mut() {
            Some(session) => matching::apply_reset(session, reset),
            None => false,
        }
    }

    /// Prompt to show once `reset` has fired, if no match has replaced it.
    pub fn prompt_after_reset(&self, reset: &PendingReset) -> Option<&'static str> {
        self.session
            .as_ref()
            .and_then(|session| matching::prompt_after_reset(session, reset))
    }

    /// Promote clean matches of the current session to learned.
    pub fn graduate(&mut self) -> Vec<WordPair> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let update = reconcile::graduate(
            session.raw_cards(),
            session.outcomes(),
            &self.learned,
            &self.mismatched,
        );
        let graduated = update.graduated.clone();
        apply_update(&mut self.store, &mut self.learned, &mut self.mismatched, update);
        graduated
    }

    /// Settle the current session into the persisted lists.
    ///
    /// Only lists that actually change are written, so settling the same
    /// session twice writes nothing the second time.
    pub fn settle(&mut self) -> Settlement {
        let Some(session) = self.session.as_ref() else {
            return Settlement {
                graduated: Vec::new(),
                demoted: Vec::new(),
                progress: self.progress(),
            };
        };
        tracing::info!(
            "Processing game with {} matched and {} mismatched words",
            session.outcomes().matched_count(),
            session.outcomes().mismatched_count()
        );

        let settled = reconcile::settle(
            session.raw_cards(),
            session.outcomes(),
            &self.master,
            &self.learned,
            &self.mismatched,
        );
        let demoted = settled.demoted.clone();
        apply_update(&mut self.store, &mut self.learned, &mut self.mismatched, settled);

        let graduated = reconcile::graduate(
            session.raw_cards(),
            session.outcomes(),
            &self.learned,
            &self.mismatched,
        );
        let graduated_words = graduated.graduated.clone();
        apply_update(&mut self.store, &mut self.learned, &mut self.mismatched, graduated);

        Settlement {
            graduated: graduated_words,
            demoted,
            progress: self.progress(),
        }
    }

    /// Stop the game in progress, settling whatever was played.
    pub fn stop(&mut self) -> Option<Settlement> {
        let in_play = self
            .session
            .as_ref()
            .is_some_and(|session| !session.cards().is_empty());
        let settlement = in_play.then(|| self.settle());
        self.session = None;
        tracing::info!("Game stopped");
        settlement
    }

    /// Forget all learning progress. The game in progress is discarded.
    pub fn reset_learned(&mut self) {
        self.learned.clear();
        self.store.save(ListName::Learned, &self.learned);
        self.session = None;
        tracing::info!("Learned words reset");
    }

    /// Drop every imported word and all progress.
    pub fn reset_all(&mut self) {
        self.master.clear();
        self.learned.clear();
        self.mismatched.clear();
        self.store.save(ListName::Master, &self.master);
        self.store.save(ListName::Learned, &self.learned);
        self.store.save(ListName::Mismatched, &self.mismatched);
        self.session = None;
        tracing::info!("All word lists reset");
    }
}

fn apply_update<K: KeyValueStore>(
    store: &mut WordStore<K>,
    learned: &mut WordList,
    mismatched: &mut WordList,
    update: ListUpdate,
) {
    if let Some(list) = update.learned {
        store.save(ListName::Learned, &list);
        *learned = list;
    }
    if let Some(list) = update.mismatched {
        store.save(ListName::Mismatched, &list);
        *mismatched = list;
    }
}
