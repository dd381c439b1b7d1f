//! Selection state machine and pair matching.

use crate::session::{PendingReset, Selection, Session};
use crate::types::{ItemKind, SlotRef};
use serde::{Deserialize, Serialize};

/// Result of a click on a board slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Matched slot, unknown slot, or no game running.
    Ignored,
    Selected {
        slot: SlotRef,
    },
    Deselected {
        slot: SlotRef,
    },
    Matched {
        term: String,
        term_slot: SlotRef,
        definition_slot: SlotRef,
        complete: bool,
    },
    Mismatched {
        term: String,
        first_mismatch: bool,
        reset: PendingReset,
    },
}

impl ClickOutcome {
    /// Status line to show after the click.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::Matched { complete: true, .. } => "Congratulations! You've matched all pairs!",
            Self::Matched { .. } => "Correct Match!",
            Self::Mismatched { .. } => "Incorrect match. Try again.",
            Self::Ignored | Self::Selected { .. } | Self::Deselected { .. } => "",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Matched { complete: true, .. })
    }
}

/// Apply a click to the session and run the match check.
pub fn click(session: &mut Session, slot: &SlotRef, reset_delay_ms: u64) -> ClickOutcome {
    if session.matched_slots.contains(slot) {
        return ClickOutcome::Ignored;
    }
    let Some(text) = session.slot_text(slot).map(str::to_string) else {
        tracing::debug!("Ignoring click on unknown slot {}", slot.card);
        return ClickOutcome::Ignored;
    };

    let selected = match slot.kind {
        ItemKind::Term => &mut session.selected_term,
        ItemKind::Definition => &mut session.selected_definition,
    };
    let toggled_off = selected.as_ref().is_some_and(|s| &s.slot == slot);
    if toggled_off {
        *selected = None;
    } else {
        *selected = Some(Selection {
            slot: slot.clone(),
            text,
        });
    }

    match check_match(session, reset_delay_ms) {
        Some(outcome) => outcome,
        None if toggled_off => ClickOutcome::Deselected { slot: slot.clone() },
        None => ClickOutcome::Selected { slot: slot.clone() },
    }
}

/// Compare the selected pair, if both sides are selected.
///
/// A selected term with no card in the session leaves everything untouched.
fn check_match(session: &mut Session, reset_delay_ms: u64) -> Option<ClickOutcome> {
    let (term, definition) = match (&session.selected_term, &session.selected_definition) {
        (Some(term), Some(definition)) => (term.clone(), definition.clone()),
        _ => return None,
    };

    let card = session.cards().iter().find(|card| card.term == term.text)?;
    let is_match = card.definition == definition.text;

    if is_match {
        session.matched_slots.insert(term.slot.clone());
        session.matched_slots.insert(definition.slot.clone());
        session.outcomes.record_match(&term.text);
        session.matched_pairs += 1;
        session.last_match_token = Some(session.next_reset_token);
        session.selected_term = None;
        session.selected_definition = None;

        return Some(ClickOutcome::Matched {
            complete: session.is_complete(),
            term: term.text,
            term_slot: term.slot,
            definition_slot: definition.slot,
        });
    }

    let first_mismatch = session.outcomes.record_mismatch(&term.text);
    session.mismatched_attempts += 1;
    if first_mismatch {
        tracing::debug!("First mismatch this session for {:?}", term.text);
    }

    session.next_reset_token += 1;
    let token = session.next_reset_token;
    session
        .pending_resets
        .insert((term.slot.clone(), definition.slot.clone()), token);

    Some(ClickOutcome::Mismatched {
        term: term.text,
        first_mismatch,
        reset: PendingReset {
            session: session.id(),
            term_slot: term.slot,
            definition_slot: definition.slot,
            token,
            delay_ms: reset_delay_ms,
        },
    })
}

/// Fire a deferred mismatch reset.
///
/// Only the definition selection the reset was issued for is released, and
/// only if it is still selected. Resets from another session or superseded by
/// a later mismatch on the same pair do nothing. Returns whether the reset was
/// live, i.e. whether the incorrect highlight should be cleared.
pub fn apply_reset(session: &mut Session, reset: &PendingReset) -> bool {
    if reset.session != session.id() {
        return false;
    }

    let key = (reset.term_slot.clone(), reset.definition_slot.clone());
    if session.pending_resets.get(&key) != Some(&reset.token) {
        return false;
    }
    session.pending_resets.remove(&key);

    if session
        .selected_definition
        .as_ref()
        .is_some_and(|s| s.slot == reset.definition_slot)
    {
        session.selected_definition = None;
    }
    true
}

/// Prompt shown once an incorrect pair has been released.
pub fn prompt(session: &Session) -> &'static str {
    if session.selected_term().is_some() {
        "Pick a definition."
    } else {
        "Select a term."
    }
}

/// Prompt to show when `reset` fires.
///
/// `None` once the board is complete or a pair was matched after the
/// mismatch, so a success message stays on screen.
pub fn prompt_after_reset(session: &Session, reset: &PendingReset) -> Option<&'static str> {
    let matched_since = session
        .last_match_token
        .is_some_and(|token| token >= reset.token);
    if session.is_complete() || matched_since {
        None
    } else {
        Some(prompt(session))
    }
}
