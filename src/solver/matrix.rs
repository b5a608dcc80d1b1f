//! Precomputed guess/answer feedback matrix
//!
//! A dense G x A table where cell (i, j) holds the pattern code of guessing
//! word i against answer j. Built once, immutable afterward. Construction is
//! the performance-critical path of the whole engine: tens of millions of
//! cells for realistic list sizes, so rows are computed in parallel. Each
//! row touches only its own guess and the shared answer list, never another
//! row, so the only synchronization is the final join.

use crate::core::Pattern;
use crate::wordlists::WordList;
use log::info;
use rayon::prelude::*;
use std::time::Instant;

/// Dense row-major table of pattern codes, one row per guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatrix {
    guess_count: usize,
    answer_count: usize,
    codes: Vec<u8>,
}

impl PatternMatrix {
    /// Compute the full matrix for the given lists.
    ///
    /// Deterministic: identical lists always produce an identical matrix.
    #[must_use]
    pub fn build(guesses: &WordList, answers: &WordList) -> Self {
        Self::build_with(guesses, answers, || {})
    }

    /// Compute the full matrix, invoking `row_done` as each row completes.
    ///
    /// The callback runs on worker threads; it is meant for progress
    /// reporting and must be cheap.
    pub fn build_with(
        guesses: &WordList,
        answers: &WordList,
        row_done: impl Fn() + Sync,
    ) -> Self {
        let guess_count = guesses.len();
        let answer_count = answers.len();
        let started = Instant::now();

        let mut codes = vec![0u8; guess_count * answer_count];
        codes
            .par_chunks_mut(answer_count.max(1))
            .zip(guesses.words().par_iter())
            .for_each(|(row, guess)| {
                for (cell, answer) in row.iter_mut().zip(answers.words()) {
                    *cell = Pattern::between(guess, answer).code();
                }
                row_done();
            });

        info!(
            "built {guess_count}x{answer_count} pattern matrix in {:.2}s",
            started.elapsed().as_secs_f64()
        );

        Self {
            guess_count,
            answer_count,
            codes,
        }
    }

    /// Reassemble a matrix from persisted parts.
    ///
    /// Returns `None` if the payload length disagrees with the dimensions.
    #[must_use]
    pub(crate) fn from_parts(
        guess_count: usize,
        answer_count: usize,
        codes: Vec<u8>,
    ) -> Option<Self> {
        (codes.len() == guess_count * answer_count).then_some(Self {
            guess_count,
            answer_count,
            codes,
        })
    }

    /// Number of guess rows (G).
    #[inline]
    #[must_use]
    pub const fn guess_count(&self) -> usize {
        self.guess_count
    }

    /// Number of answer columns (A).
    #[inline]
    #[must_use]
    pub const fn answer_count(&self) -> usize {
        self.answer_count
    }

    /// Pattern code for guess `i` against answer `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    #[must_use]
    pub fn code(&self, guess: usize, answer: usize) -> u8 {
        debug_assert!(guess < self.guess_count && answer < self.answer_count);
        self.codes[guess * self.answer_count + answer]
    }

    /// All codes for one guess row, indexed by answer.
    #[inline]
    #[must_use]
    pub fn row(&self, guess: usize) -> &[u8] {
        let start = guess * self.answer_count;
        &self.codes[start..start + self.answer_count]
    }

    /// Raw row-major payload, for persistence.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.codes
    }
}
