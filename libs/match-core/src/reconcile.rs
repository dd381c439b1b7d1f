//! Folding session outcomes into the persisted word lists.
//!
//! Both passes are pure: they take the current lists and return the lists
//! that changed. After either pass completes, no term is in both the learned
//! and the mismatched list.

use crate::session::TermOutcomes;
use crate::types::{WordList, WordPair};

/// Lists rewritten by a reconciliation pass. `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUpdate {
    pub learned: Option<WordList>,
    pub mismatched: Option<WordList>,
    /// Words newly promoted to the learned list.
    pub graduated: Vec<WordPair>,
    /// Words newly added to the mismatched list.
    pub demoted: Vec<WordPair>,
}

impl ListUpdate {
    pub fn is_empty(&self) -> bool {
        self.learned.is_none() && self.mismatched.is_none()
    }
}

fn changed(before: &WordList, after: WordList) -> Option<WordList> {
    (before != &after).then_some(after)
}

/// Promote cleanly matched words to the learned list.
///
/// A card graduates when it was matched this session, never mismatched, and
/// is not already learned. Any mismatched entry for a graduated term is
/// dropped.
pub fn graduate(
    raw_cards: &[WordPair],
    outcomes: &TermOutcomes,
    learned: &WordList,
    mismatched: &WordList,
) -> ListUpdate {
    let mut next_learned = learned.clone();
    let mut graduated = Vec::new();

    for card in raw_cards {
        if outcomes.is_clean_match(&card.term) && next_learned.push_unique(card.clone()) {
            graduated.push(card.clone());
        }
    }

    if graduated.is_empty() {
        return ListUpdate::default();
    }

    let next_mismatched = mismatched.without_terms_in(&next_learned);
    tracing::info!("{} word(s) graduated to learned", graduated.len());

    ListUpdate {
        learned: Some(next_learned),
        mismatched: changed(mismatched, next_mismatched),
        graduated,
        demoted: Vec::new(),
    }
}

/// Settle a finished or stopped game.
///
/// Correct matches clear earlier mismatch records. A mismatch revokes learned
/// status and lands the master entry in the mismatched list. Terms that are
/// no longer in the master list are skipped.
pub fn settle(
    raw_cards: &[WordPair],
    outcomes: &TermOutcomes,
    master: &WordList,
    learned: &WordList,
    mismatched: &WordList,
) -> ListUpdate {
    let mut next_learned = learned.clone();
    let mut next_mismatched = mismatched.clone();
    let mut demoted = Vec::new();

    for card in raw_cards {
        if outcomes.was_matched(&card.term)
            && master.contains_term(&card.term)
            && next_mismatched.remove_term(&card.term)
        {
            tracing::debug!("Removed {:?} from mismatched words (matched correctly)", card.term);
        }
    }

    for card in raw_cards {
        if !outcomes.was_mismatched(&card.term) {
            continue;
        }
        let Some(entry) = master.find_term(&card.term) else {
            continue;
        };
        if next_learned.remove_term(&card.term) {
            tracing::debug!("Removed {:?} from learned words (mismatched)", card.term);
        }
        if next_mismatched.push_unique(entry.clone()) {
            tracing::debug!("Added {:?} to mismatched words", card.term);
            demoted.push(entry.clone());
        }
    }

    ListUpdate {
        learned: changed(learned, next_learned),
        mismatched: changed(mismatched, next_mismatched),
        graduated: Vec::new(),
        demoted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(term: &str) -> WordPair {
        WordPair::new(term, format!("{term}-def"))
    }

    fn list(terms: &[&str]) -> WordList {
        WordList::from_pairs(terms.iter().map(|t| pair(t)))
    }

    fn outcomes(matched: &[&str], mismatched: &[&str]) -> TermOutcomes {
        let mut outcomes = TermOutcomes::default();
        for term in mismatched {
            outcomes.record_mismatch(term);
        }
        for term in matched {
            outcomes.record_match(term);
        }
        outcomes
    }

    #[test]
    fn graduate_promotes_clean_matches_only() {
        let raw = vec![pair("a"), pair("b"), pair("c")];
        let record = outcomes(&["a", "b"], &["b"]);

        let update = graduate(&raw, &record, &WordList::new(), &WordList::new());
        assert_eq!(update.learned, Some(list(&["a"])));
        assert_eq!(update.mismatched, None);
        assert_eq!(update.graduated, vec![pair("a")]);
    }

    #[test]
    fn graduate_clears_mismatched_entry() {
        let raw = vec![pair("a")];
        let record = outcomes(&["a"], &[]);

        let update = graduate(&raw, &record, &WordList::new(), &list(&["A", "z"]));
        assert_eq!(update.learned, Some(list(&["a"])));
        assert_eq!(update.mismatched, Some(list(&["z"])));
    }

    #[test]
    fn graduate_skips_already_learned() {
        let raw = vec![pair("a")];
        let record = outcomes(&["a"], &[]);

        let update = graduate(&raw, &record, &list(&["a"]), &WordList::new());
        assert!(update.is_empty());
        assert!(update.graduated.is_empty());
    }

    #[test]
    fn settle_demotes_mismatched_learned_word() {
        let raw = vec![pair("a"), pair("b")];
        let record = outcomes(&["b"], &["a"]);
        let master = list(&["a", "b"]);

        let update = settle(&raw, &record, &master, &list(&["a"]), &list(&["b"]));
        assert_eq!(update.learned, Some(WordList::new()));
        assert_eq!(update.mismatched, Some(list(&["a"])));
        assert_eq!(update.demoted, vec![pair("a")]);
    }

    #[test]
    fn settle_requeues_term_matched_after_mismatch() {
        let raw = vec![pair("a"), pair("b")];
        let record = outcomes(&["a"], &["a"]);
        let master = list(&["a", "b"]);

        let update = settle(&raw, &record, &master, &WordList::new(), &list(&["a", "x"]));
        // Removed by the match, appended again by the mismatch.
        assert_eq!(update.mismatched, Some(list(&["x", "a"])));
        assert_eq!(update.learned, None);
    }

    #[test]
    fn settle_skips_terms_missing_from_master() {
        let raw = vec![pair("ghost")];
        let record = outcomes(&[], &["ghost"]);

        let update = settle(&raw, &record, &WordList::new(), &WordList::new(), &WordList::new());
        assert!(update.is_empty());
    }

    #[test]
    fn settle_is_idempotent() {
        let raw = vec![pair("a"), pair("b")];
        let record = outcomes(&["b"], &["a"]);
        let master = list(&["a", "b"]);

        let first = settle(&raw, &record, &master, &list(&["a"]), &list(&["b"]));
        let learned = first.learned.unwrap();
        let mismatched = first.mismatched.unwrap();

        let second = settle(&raw, &record, &master, &learned, &mismatched);
        assert!(second.is_empty());
        assert!(second.demoted.is_empty());
    }
}
