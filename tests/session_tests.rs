//! End-to-end engine scenarios

use std::fs;
use std::path::PathBuf;
use wordle_advisor::core::{Mark, Pattern, Word};
use wordle_advisor::solver::storage::{self, StorageError};
use wordle_advisor::solver::{Engine, PatternMatrix, SessionStatus};
use wordle_advisor::wordlists::WordList;

fn list(texts: &[&str]) -> WordList {
    texts.iter().map(|t| Word::parse(t).unwrap()).collect()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wordle_advisor_it_{name}.wmx"))
}

#[test]
fn abcab_against_bbaac_full_turn() {
    let guess = Word::parse("abcab").unwrap();
    let answer = Word::parse("bbaac").unwrap();

    // Exact pass: positions 1 (b/b) and 3 (a/a). Presence pass: the a at
    // position 0, the c at position 2, and the b at position 4 each consume
    // one leftover answer letter.
    let pattern = Pattern::between(&guess, &answer);
    assert_eq!(
        pattern.marks(),
        [
            Mark::Present,
            Mark::Exact,
            Mark::Present,
            Mark::Exact,
            Mark::Present
        ]
    );
    assert_eq!(pattern.code(), 151);

    let guesses = list(&["abcab", "bbaac", "ccccc", "aabbc"]);
    let answers = list(&["bbaac", "ccccc", "aabbc"]);
    let matrix = PatternMatrix::build(&guesses, &answers);
    let mut engine = Engine::new(guesses, answers, matrix).unwrap();

    engine.update("abcab", pattern).unwrap();

    // The true answer survives; every answer whose feedback against abcab
    // differs is excluded.
    let remaining: Vec<&str> = engine.candidate_words().iter().map(|w| w.text()).collect();
    assert!(remaining.contains(&"bbaac"));
    assert!(!remaining.contains(&"ccccc"));
    assert!(!remaining.contains(&"aabbc"));
    assert_eq!(engine.status(), SessionStatus::Solved);
    assert_eq!(engine.solution().unwrap().text(), "bbaac");
}

#[test]
fn feedback_history_never_excludes_the_true_answer() {
    let guesses = list(&["crane", "slate", "irate", "trace", "grate"]);
    let answers = list(&["slate", "irate", "trace", "grate"]);
    let matrix = PatternMatrix::build(&guesses, &answers);
    let mut engine = Engine::new(guesses.clone(), answers, matrix).unwrap();

    let truth = Word::parse("trace").unwrap();
    let mut last_count = engine.candidate_count();

    for guess_text in ["crane", "slate", "irate"] {
        let guess = guesses.get(guesses.index_of(guess_text).unwrap()).unwrap();
        let observed = Pattern::between(guess, &truth);

        let remaining = engine.update(guess_text, observed).unwrap();
        assert!(remaining <= last_count);
        last_count = remaining;

        assert!(engine.candidate_words().iter().any(|w| w.text() == "trace"));
    }
}

#[test]
fn ranked_suggestions_drive_a_session_to_solved() {
    let guesses = list(&["crane", "slate", "irate", "trace", "grate", "blimp"]);
    let answers = list(&["slate", "irate", "trace", "grate"]);
    let matrix = PatternMatrix::build(&guesses, &answers);
    let mut engine = Engine::new(guesses, answers, matrix).unwrap();

    let truth = Word::parse("irate").unwrap();

    for _turn in 0..6 {
        if engine.status() == SessionStatus::Solved {
            break;
        }
        let ranking = engine.ranked_guesses(1);
        let best = ranking.first().expect("non-empty candidate set ranks");
        let observed = Pattern::between(&best.word, &truth);
        engine.update(best.word.text(), observed).unwrap();
    }

    assert_eq!(engine.status(), SessionStatus::Solved);
    assert_eq!(engine.solution().unwrap().text(), "irate");
}

#[test]
fn stale_matrix_forces_rebuild_instead_of_silent_reuse() {
    let guesses = list(&["crane", "slate", "irate"]);
    let answers = list(&["slate", "irate"]);
    let matrix = PatternMatrix::build(&guesses, &answers);

    let path = temp_path("stale_rebuild");
    storage::save(&matrix, &guesses, &answers, &path).unwrap();

    // Same three words plus one extra: the persisted 3x2 matrix must be
    // rejected, not reused.
    let grown = list(&["crane", "slate", "irate", "trace"]);
    match storage::load(&path, &grown, &answers) {
        Err(StorageError::DimensionMismatch { stored, current }) => {
            assert_eq!(stored, (3, 2));
            assert_eq!(current, (4, 2));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }

    // load_or_build recovers by rebuilding at the new shape.
    let rebuilt = storage::load_or_build(&path, &grown, &answers).unwrap();
    assert_eq!(rebuilt.guess_count(), 4);
    assert_eq!(rebuilt.answer_count(), 2);

    // The rebuilt matrix agrees with direct computation.
    for (i, guess) in grown.words().iter().enumerate() {
        for (j, answer) in answers.words().iter().enumerate() {
            assert_eq!(rebuilt.code(i, j), Pattern::between(guess, answer).code());
        }
    }

    fs::remove_file(&path).ok();
}

#[test]
fn rejected_turns_leave_the_session_unchanged() {
    let guesses = list(&["crane", "slate"]);
    let answers = list(&["slate"]);
    let matrix = PatternMatrix::build(&guesses, &answers);
    let mut engine = Engine::new(guesses, answers, matrix).unwrap();

    let before = engine.candidate_count();
    let pattern = Pattern::parse("00000").unwrap();

    assert!(engine.update("audio", pattern).is_err());
    assert!(engine.update("xy", pattern).is_err());
    assert_eq!(engine.candidate_count(), before);
    assert_eq!(engine.status(), SessionStatus::Solved); // single-answer list
}
