//! End-to-end tests of the learned/mismatched bookkeeping across games.

use match_core::{
    setup_game, ClickOutcome, Game, GameError, GameSettings, ItemKind, ListName, MemoryStore,
    SlotRef, WordList, WordPair,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn csv(words: &[(&str, &str)]) -> String {
    let mut lines = vec!["Term,Definition".to_string()];
    lines.extend(words.iter().map(|(t, d)| format!("{t},{d}")));
    lines.join("\n")
}

fn numbered(n: usize) -> Vec<(String, String)> {
    (0..n).map(|i| (format!("word{i}"), format!("meaning {i}"))).collect()
}

fn game(words: usize, cards_per_game: usize, seed: u64) -> Game<MemoryStore> {
    let settings = GameSettings {
        cards_per_game,
        review_chance: 0.0,
        ..GameSettings::default()
    };
    let mut game = Game::with_rng(MemoryStore::new(), settings, StdRng::seed_from_u64(seed));
    let pairs = numbered(words);
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(t, d)| (t.as_str(), d.as_str()))
        .collect();
    game.import_csv(&csv(&borrowed), "fixture");
    game
}

fn slot(game: &Game<MemoryStore>, term: &str, kind: ItemKind) -> SlotRef {
    let card = game
        .session()
        .expect("game in progress")
        .cards()
        .iter()
        .find(|card| card.term == term)
        .expect("term on board");
    SlotRef {
        card: card.id.clone(),
        kind,
    }
}

fn match_pair(game: &mut Game<MemoryStore>, term: &str) -> ClickOutcome {
    game.click(&slot(game, term, ItemKind::Term));
    game.click(&slot(game, term, ItemKind::Definition))
}

fn mismatch(game: &mut Game<MemoryStore>, term: &str, wrong_definition_of: &str) -> ClickOutcome {
    game.click(&slot(game, term, ItemKind::Term));
    let outcome = game.click(&slot(game, wrong_definition_of, ItemKind::Definition));
    if let ClickOutcome::Mismatched { reset, .. } = &outcome {
        game.apply_reset(reset);
    }
    // Release the term so the next interaction starts clean.
    game.click(&slot(game, term, ItemKind::Term));
    outcome
}

fn board_terms(game: &Game<MemoryStore>) -> Vec<String> {
    game.session()
        .unwrap()
        .cards()
        .iter()
        .map(|card| card.term.clone())
        .collect()
}

fn assert_disjoint(game: &Game<MemoryStore>) {
    for pair in game.learned() {
        assert!(
            !game.mismatched().contains_term(&pair.term),
            "{} is both learned and mismatched",
            pair.term
        );
    }
}

fn assert_subset_of_master(game: &Game<MemoryStore>) {
    for pair in game.learned().iter().chain(game.mismatched()) {
        assert!(game.master().contains_term(&pair.term));
    }
}

/// Repeated imports never duplicate a term, whatever its case.
#[test]
fn test_master_list_stays_unique() {
    let mut game = game(0, 6, 1);
    game.import_csv(&csv(&[("Hola", "hello"), ("adios", "bye")]), "a.csv");
    game.import_csv(
        &csv(&[("hola", "hi"), ("ADIOS", "farewell"), ("gracias", "thanks")]),
        "b.csv",
    );
    let report = game.import_csv(&csv(&[("Gracias", "thank you"), ("gracias", "ta")]), "c.csv");

    assert_eq!(report.imported_count, 0);
    assert_eq!(report.skipped_count, 2);
    let terms: Vec<_> = game.master().iter().map(|p| p.term.as_str()).collect();
    assert_eq!(terms, vec!["Hola", "adios", "gracias"]);
}

/// A clean match graduates the word and clears any old mismatch record.
#[test]
fn test_clean_match_graduates() {
    let mut game = game(6, 6, 2);
    game.generate(None).unwrap();
    let terms = board_terms(&game);

    // First game: word goes to the mismatched list.
    mismatch(&mut game, &terms[0], &terms[1]);
    game.stop();
    assert!(game.mismatched().contains_term(&terms[0]));

    // Second game: clean match.
    game.generate(None).unwrap();
    for term in board_terms(&game) {
        match_pair(&mut game, &term);
    }

    assert!(game.learned().contains_term(&terms[0]));
    assert!(!game.mismatched().contains_term(&terms[0]));
    assert_disjoint(&game);
    assert_subset_of_master(&game);
}

/// A mismatch demotes a word even when it was matched afterwards.
#[test]
fn test_mismatch_demotes() {
    let mut game = game(6, 6, 3);
    game.generate(None).unwrap();
    let terms = board_terms(&game);

    mismatch(&mut game, &terms[2], &terms[3]);
    for term in &terms {
        match_pair(&mut game, term);
    }

    assert!(game.session().unwrap().is_complete());
    assert!(game.mismatched().contains_term(&terms[2]));
    assert!(!game.learned().contains_term(&terms[2]));
    assert_eq!(game.learned().len(), 5);
    assert_disjoint(&game);
}

/// A learned word brought back for review loses learned status on a mismatch.
#[test]
fn test_reviewed_learned_word_can_be_demoted() {
    let mut game = game(8, 6, 4);
    game.generate(None).unwrap();
    let first_board = board_terms(&game);
    for term in &first_board {
        match_pair(&mut game, term);
    }
    assert_eq!(game.learned().len(), 6);

    game.set_settings(GameSettings {
        cards_per_game: 2,
        review_chance: 1.0,
        ..GameSettings::default()
    })
    .unwrap();
    game.generate(None).unwrap();
    let terms = board_terms(&game);
    let (reviewed, fresh): (Vec<_>, Vec<_>) =
        terms.iter().partition(|term| first_board.contains(*term));
    assert_eq!(reviewed.len(), 1);
    assert_eq!(fresh.len(), 1);

    mismatch(&mut game, reviewed[0], fresh[0]);
    let settlement = game.stop().unwrap();

    assert_eq!(settlement.demoted.len(), 1);
    assert!(game.mismatched().contains_term(reviewed[0]));
    assert!(!game.learned().contains_term(reviewed[0]));
    assert_eq!(game.learned().len(), 5);
    assert_disjoint(&game);
    assert_subset_of_master(&game);
}

/// Five new words are not enough for a six card game; six are.
#[test]
fn test_setup_failure_boundary() {
    let master = WordList::from_pairs(
        numbered(8).into_iter().map(|(t, d)| WordPair::new(t, d)),
    );
    let learned = WordList::from_pairs(master.iter().take(3).cloned());
    let mut rng = StdRng::seed_from_u64(5);

    let err = setup_game(&master, &learned, 6, 0.0, &mut rng).unwrap_err();
    assert_eq!(err, GameError::InsufficientWords { available: 5, required: 6 });
    let message = err.to_string();
    assert!(message.contains('5'));
    assert!(message.contains('6'));

    let learned = WordList::from_pairs(master.iter().take(2).cloned());
    let session = setup_game(&master, &learned, 6, 0.0, &mut rng).unwrap();
    assert_eq!(session.cards().len(), 6);
}

/// Through the game, a setup failure leaves every list untouched.
#[test]
fn test_setup_failure_mutates_nothing() {
    let mut game = game(6, 6, 6);
    game.generate(None).unwrap();
    let terms = board_terms(&game);
    match_pair(&mut game, &terms[0]);
    game.stop();
    assert_eq!(game.learned().len(), 1);

    let writes = game.backend().write_count();
    let err = game.generate(None).unwrap_err();
    assert_eq!(err, GameError::InsufficientWords { available: 5, required: 6 });
    assert_eq!(game.backend().write_count(), writes);
    assert!(game.session().is_none());
}

/// Completion needs exactly one correct match per card, and order is irrelevant.
#[test]
fn test_completion_is_order_independent() {
    let mut forward = game(3, 3, 7);
    let mut backward = game(3, 3, 7);
    forward.generate(None).unwrap();
    backward.generate(None).unwrap();

    let terms = board_terms(&forward);
    assert_eq!(terms, board_terms(&backward));

    mismatch(&mut forward, &terms[0], &terms[1]);
    mismatch(&mut backward, &terms[0], &terms[1]);

    for (i, term) in terms.iter().enumerate() {
        assert_eq!(forward.session().unwrap().matched_pairs(), i);
        let outcome = match_pair(&mut forward, term);
        assert_eq!(outcome.is_complete(), i == 2);
    }
    for term in terms.iter().rev() {
        match_pair(&mut backward, term);
    }

    assert_eq!(forward.session().unwrap().matched_pairs(), 3);
    assert_eq!(forward.learned(), backward.learned());
    assert_eq!(forward.mismatched(), backward.mismatched());

    let reopened_forward = Game::open(forward.backend().clone(), GameSettings::default());
    let reopened_backward = Game::open(backward.backend().clone(), GameSettings::default());
    assert_eq!(reopened_forward.learned(), reopened_backward.learned());
    assert_eq!(reopened_forward.mismatched(), reopened_backward.mismatched());
}

/// With review forced on, exactly one card comes from the learned list.
#[test]
fn test_review_injection() {
    let master = WordList::from_pairs(
        numbered(10).into_iter().map(|(t, d)| WordPair::new(t, d)),
    );
    let learned = WordList::from_pairs(master.iter().take(3).cloned());
    let mut rng = StdRng::seed_from_u64(8);

    let session = setup_game(&master, &learned, 6, 1.0, &mut rng).unwrap();
    let reviewed: Vec<_> = session
        .raw_cards()
        .iter()
        .filter(|pair| learned.contains_term(&pair.term))
        .collect();

    assert_eq!(session.cards().len(), 6);
    assert_eq!(reviewed.len(), 1);
    assert!(session
        .cards()
        .iter()
        .any(|card| card.term == reviewed[0].term));
}

/// Settling an unchanged session twice writes nothing the second time.
#[test]
fn test_settlement_is_idempotent() {
    let mut game = game(8, 6, 9);
    game.generate(None).unwrap();
    let terms = board_terms(&game);
    mismatch(&mut game, &terms[0], &terms[1]);
    match_pair(&mut game, &terms[1]);
    match_pair(&mut game, &terms[2]);

    let first = game.settle();
    assert_eq!(first.demoted.len(), 1);
    assert_eq!(first.graduated.len(), 2);
    let learned = game.learned().clone();
    let mismatched = game.mismatched().clone();
    let writes = game.backend().write_count();

    let second = game.settle();
    assert!(second.graduated.is_empty());
    assert!(second.demoted.is_empty());
    assert_eq!(game.learned(), &learned);
    assert_eq!(game.mismatched(), &mismatched);
    assert_eq!(game.backend().write_count(), writes);
    assert_disjoint(&game);
}

/// A completed game is settled again when the next one is generated, harmlessly.
#[test]
fn test_regenerate_after_completion() {
    let mut game = game(12, 6, 10);
    game.generate(None).unwrap();
    for term in board_terms(&game) {
        match_pair(&mut game, &term);
    }
    let writes = game.backend().write_count();
    let learned = game.learned().clone();

    game.generate(None).unwrap();
    assert_eq!(game.learned(), &learned);
    assert_eq!(game.backend().write_count(), writes);
}

/// Persisted lists survive reopening the store.
#[test]
fn test_lists_round_trip_through_store() {
    let mut game = game(6, 6, 11);
    game.generate(None).unwrap();
    let terms = board_terms(&game);
    mismatch(&mut game, &terms[0], &terms[1]);
    match_pair(&mut game, &terms[3]);
    game.stop();

    let reopened = Game::open(game.backend().clone(), GameSettings::default());
    for name in ListName::ALL {
        assert_eq!(reopened.list(name), game.list(name));
    }
    assert_eq!(reopened.progress(), game.progress());
}
