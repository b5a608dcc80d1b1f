//! Live candidate set
//!
//! Tracks which answer indices are still consistent with every piece of
//! feedback observed this session. The set starts as the full answer list
//! and only ever shrinks.

use super::matrix::PatternMatrix;
use crate::core::Pattern;
use log::debug;

/// Where a solving session stands, judged purely by the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// More than one candidate remains.
    InProgress,
    /// Exactly one candidate remains.
    Solved,
    /// No candidate is consistent with the feedback entered, which implies
    /// an earlier input error. A state to recover from, not a crash.
    Contradiction,
}

/// The set of answer indices not yet excluded by observed feedback.
#[derive(Debug, Clone)]
pub struct CandidateTracker {
    candidates: Vec<usize>,
}

impl CandidateTracker {
    /// Fresh tracker holding every answer index in [0, `answer_count`).
    #[must_use]
    pub fn new(answer_count: usize) -> Self {
        Self {
            candidates: (0..answer_count).collect(),
        }
    }

    /// Restore the full candidate set for a new session.
    pub fn reset(&mut self, answer_count: usize) {
        self.candidates.clear();
        self.candidates.extend(0..answer_count);
    }

    /// Keep only candidates whose matrix code for `guess_index` equals the
    /// observed pattern. Never grows the set.
    ///
    /// The caller is responsible for having resolved `guess_index` against
    /// the guess list; an unknown word must be rejected before this point.
    pub fn update(&mut self, matrix: &PatternMatrix, guess_index: usize, observed: Pattern) {
        let before = self.candidates.len();
        let row = matrix.row(guess_index);
        let code = observed.code();

        self.candidates.retain(|&j| row[j] == code);
        debug!(
            "guess row {guess_index} pattern {observed}: {before} -> {} candidates",
            self.candidates.len()
        );
    }

    /// Remaining candidate indices, in answer-list order.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Terminal-state check: solved on one candidate, contradiction on none.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self.candidates.len() {
            0 => SessionStatus::Contradiction,
            1 => SessionStatus::Solved,
            _ => SessionStatus::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::wordlists::WordList;

    fn list(texts: &[&str]) -> WordList {
        texts.iter().map(|t| Word::parse(t).unwrap()).collect()
    }

    fn setup() -> (WordList, WordList, PatternMatrix) {
        let guesses = list(&["crane", "slate", "irate", "grate"]);
        let answers = list(&["slate", "irate", "grate"]);
        let matrix = PatternMatrix::build(&guesses, &answers);
        (guesses, answers, matrix)
    }

    #[test]
    fn starts_with_every_answer() {
        let tracker = CandidateTracker::new(3);
        assert_eq!(tracker.candidates(), &[0, 1, 2]);
        assert_eq!(tracker.status(), SessionStatus::InProgress);
    }

    #[test]
    fn update_never_grows_the_set() {
        let (guesses, answers, matrix) = setup();
        let mut tracker = CandidateTracker::new(answers.len());

        let crane = guesses.index_of("crane").unwrap();
        let observed = Pattern::between(guesses.get(crane).unwrap(), answers.get(1).unwrap());

        let before = tracker.len();
        tracker.update(&matrix, crane, observed);
        assert!(tracker.len() <= before);

        let before = tracker.len();
        tracker.update(&matrix, crane, observed);
        assert!(tracker.len() <= before);
    }

    #[test]
    fn true_answer_survives_consistent_feedback() {
        let (guesses, answers, matrix) = setup();
        let mut tracker = CandidateTracker::new(answers.len());
        let truth = answers.index_of("grate").unwrap();

        for guess_text in ["crane", "slate", "irate"] {
            let i = guesses.index_of(guess_text).unwrap();
            let observed =
                Pattern::between(guesses.get(i).unwrap(), answers.get(truth).unwrap());
            tracker.update(&matrix, i, observed);
            assert!(tracker.candidates().contains(&truth));
        }
    }

    #[test]
    fn exact_feedback_solves() {
        let (guesses, answers, matrix) = setup();
        let mut tracker = CandidateTracker::new(answers.len());

        let i = guesses.index_of("irate").unwrap();
        tracker.update(&matrix, i, Pattern::SOLVED);

        assert_eq!(tracker.status(), SessionStatus::Solved);
        assert_eq!(tracker.candidates(), &[answers.index_of("irate").unwrap()]);
    }

    #[test]
    fn impossible_feedback_contradicts() {
        let (guesses, answers, matrix) = setup();
        let mut tracker = CandidateTracker::new(answers.len());

        // Claiming crane was fully exact excludes every real answer.
        let i = guesses.index_of("crane").unwrap();
        tracker.update(&matrix, i, Pattern::SOLVED);

        assert_eq!(tracker.status(), SessionStatus::Contradiction);
        assert!(tracker.is_empty());
    }

    #[test]
    fn reset_restores_full_set() {
        let (guesses, answers, matrix) = setup();
        let mut tracker = CandidateTracker::new(answers.len());

        tracker.update(&matrix, guesses.index_of("irate").unwrap(), Pattern::SOLVED);
        assert_eq!(tracker.len(), 1);

        tracker.reset(answers.len());
        assert_eq!(tracker.candidates(), &[0, 1, 2]);
    }
}
