//! Engine facade
//!
//! Ties the word lists, the pattern matrix, and one candidate tracker into
//! the interface the presentation layer drives: `reset`, `update`,
//! `candidate_count`, `ranked_guesses`, `status`. An `Engine` is an
//! explicitly constructed value owned by whoever runs the session; there is
//! no global instance.
//!
//! `update` takes `&mut self` and everything else `&self`, so exclusive
//! access during mutation is enforced by the borrow checker; callers
//! sharing an engine across threads must serialize on their side. Rankings
//! computed in the background work on a snapshot of the candidate set and
//! are only meaningful relative to it.

use super::background::SingleFlight;
use super::matrix::PatternMatrix;
use super::rank::{RankedGuess, rank};
use super::tracker::{CandidateTracker, SessionStatus};
use crate::core::{Pattern, Word, WordError};
use crate::wordlists::WordList;
use std::fmt;
use std::sync::Arc;

/// Errors surfaced by the engine's turn interface.
#[derive(Debug)]
pub enum EngineError {
    /// The guess text is not a well-formed 5-letter word.
    InvalidWord(WordError),
    /// The guess is well-formed but absent from the guess list. Feedback
    /// for it cannot be applied and must not be silently dropped.
    UnknownWord(String),
    /// The matrix shape disagrees with the word lists it is supposed to
    /// cover; using it would corrupt every lookup.
    DimensionMismatch {
        guesses: usize,
        answers: usize,
        rows: usize,
        cols: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWord(err) => write!(f, "invalid guess: {err}"),
            Self::UnknownWord(text) => write!(f, "'{text}' is not in the guess list"),
            Self::DimensionMismatch {
                guesses,
                answers,
                rows,
                cols,
            } => write!(
                f,
                "matrix is {rows}x{cols} but word lists are {guesses}x{answers}"
            ),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidWord(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WordError> for EngineError {
    fn from(err: WordError) -> Self {
        Self::InvalidWord(err)
    }
}

/// The assembled decision-support engine for one solving session.
pub struct Engine {
    guesses: Arc<WordList>,
    answers: Arc<WordList>,
    matrix: Arc<PatternMatrix>,
    tracker: CandidateTracker,
}

impl Engine {
    /// Assemble an engine, verifying that the matrix covers the lists.
    ///
    /// # Errors
    /// Returns [`EngineError::DimensionMismatch`] if the matrix shape does
    /// not equal (guess count, answer count).
    pub fn new(
        guesses: WordList,
        answers: WordList,
        matrix: PatternMatrix,
    ) -> Result<Self, EngineError> {
        if matrix.guess_count() != guesses.len() || matrix.answer_count() != answers.len() {
            return Err(EngineError::DimensionMismatch {
                guesses: guesses.len(),
                answers: answers.len(),
                rows: matrix.guess_count(),
                cols: matrix.answer_count(),
            });
        }

        let tracker = CandidateTracker::new(answers.len());
        Ok(Self {
            guesses: Arc::new(guesses),
            answers: Arc::new(answers),
            matrix: Arc::new(matrix),
            tracker,
        })
    }

    /// Start a fresh session with the full answer list as candidates.
    pub fn reset(&mut self) {
        self.tracker.reset(self.answers.len());
    }

    /// Apply one turn of observed feedback.
    ///
    /// Validation happens before any mutation: a rejected guess leaves the
    /// candidate set untouched. Returns the remaining candidate count.
    ///
    /// # Errors
    /// [`EngineError::InvalidWord`] for malformed text,
    /// [`EngineError::UnknownWord`] for a word outside the guess list.
    pub fn update(&mut self, guess_text: &str, observed: Pattern) -> Result<usize, EngineError> {
        let guess = Word::parse(guess_text)?;
        let guess_index = self
            .guesses
            .index_of(guess.text())
            .ok_or_else(|| EngineError::UnknownWord(guess.text().to_string()))?;

        self.tracker.update(&self.matrix, guess_index, observed);
        Ok(self.tracker.len())
    }

    /// Number of answers still consistent with all feedback this session.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.tracker.len()
    }

    /// Remaining candidate words, in answer-list order.
    #[must_use]
    pub fn candidate_words(&self) -> Vec<&Word> {
        self.tracker
            .candidates()
            .iter()
            .filter_map(|&j| self.answers.get(j))
            .collect()
    }

    /// The solution, once exactly one candidate remains.
    #[must_use]
    pub fn solution(&self) -> Option<&Word> {
        match self.tracker.candidates() {
            [only] => self.answers.get(*only),
            _ => None,
        }
    }

    /// Top `top_k` guesses by expected information gain, computed inline.
    #[must_use]
    pub fn ranked_guesses(&self, top_k: usize) -> Vec<RankedGuess> {
        rank(&self.matrix, self.tracker.candidates(), &self.guesses, top_k)
    }

    /// Run the same ranking off-thread through a [`SingleFlight`] handle,
    /// superseding any ranking already in flight. The job snapshots the
    /// current candidate set; deliver-or-discard is handled by the flight.
    pub fn spawn_ranking(&self, top_k: usize, flight: &mut SingleFlight<Vec<RankedGuess>>) {
        let matrix = Arc::clone(&self.matrix);
        let guesses = Arc::clone(&self.guesses);
        let candidates = self.tracker.candidates().to_vec();

        flight.spawn(move |token| {
            if token.is_cancelled() {
                return None;
            }
            Some(rank(&matrix, &candidates, &guesses, top_k))
        });
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.tracker.status()
    }

    #[must_use]
    pub fn guesses(&self) -> &WordList {
        &self.guesses
    }

    #[must_use]
    pub fn answers(&self) -> &WordList {
        &self.answers
    }
}
