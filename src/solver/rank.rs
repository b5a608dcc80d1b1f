//! Entropy ranking of candidate guesses
//!
//! Scores every guess by the Shannon entropy of the pattern distribution it
//! would induce over the current candidate set. The pattern domain is a
//! small constant (243), so each row is histogrammed into a fixed array
//! rather than a hash map, keeping scoring O(A) per row.

use super::matrix::PatternMatrix;
use crate::core::{PATTERN_COUNT, Word};
use crate::wordlists::WordList;
use rayon::prelude::*;

/// One row of a guess ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGuess {
    /// Index of the guess in the guess list.
    pub guess_index: usize,
    /// The guess word itself.
    pub word: Word,
    /// Expected information gain in bits, in [0, log2(candidates)].
    pub entropy: f64,
}

/// Rank all guesses by entropy against the current candidate set.
///
/// Ordering is strictly reproducible: descending entropy, ties broken by
/// guess-list order. The result is truncated to `top_k`. An empty candidate
/// set yields an empty ranking; the caller should have surfaced the
/// contradiction before asking for one.
#[must_use]
pub fn rank(
    matrix: &PatternMatrix,
    candidates: &[usize],
    guesses: &WordList,
    top_k: usize,
) -> Vec<RankedGuess> {
    if candidates.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f64)> = (0..matrix.guess_count())
        .into_par_iter()
        .map(|i| (i, row_entropy(matrix.row(i), candidates)))
        .collect();

    // Stable sort: equal entropies keep guess-list order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_k);

    scored
        .into_iter()
        .filter_map(|(i, entropy)| {
            guesses.get(i).map(|word| RankedGuess {
                guess_index: i,
                word: word.clone(),
                entropy,
            })
        })
        .collect()
}

/// Shannon entropy of one guess row's pattern distribution.
fn row_entropy(row: &[u8], candidates: &[usize]) -> f64 {
    let mut bins = [0u32; PATTERN_COUNT];
    for &j in candidates {
        bins[row[j] as usize] += 1;
    }

    let total = candidates.len() as f64;
    bins.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = f64::from(count) / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    const EPS: f64 = 1e-9;

    fn list(texts: &[&str]) -> WordList {
        texts.iter().map(|t| Word::parse(t).unwrap()).collect()
    }

    #[test]
    fn entropies_are_bounded_and_sorted() {
        let guesses = list(&["crane", "slate", "aaaaa", "irate", "trace"]);
        let answers = list(&["slate", "irate", "trace", "grate"]);
        let matrix = PatternMatrix::build(&guesses, &answers);
        let candidates: Vec<usize> = (0..answers.len()).collect();

        let ranking = rank(&matrix, &candidates, &guesses, guesses.len());
        assert_eq!(ranking.len(), guesses.len());

        let bound = (candidates.len() as f64).log2();
        for row in &ranking {
            assert!(row.entropy >= -EPS);
            assert!(row.entropy <= bound + EPS);
        }
        for pair in ranking.windows(2) {
            assert!(pair[0].entropy >= pair[1].entropy - EPS);
        }
    }

    #[test]
    fn uniform_binary_split_is_one_bit() {
        let guesses = list(&["slate"]);
        let answers = list(&["slate", "quick"]);
        let matrix = PatternMatrix::build(&guesses, &answers);

        let ranking = rank(&matrix, &[0, 1], &guesses, 1);
        assert!((ranking[0].entropy - 1.0).abs() < EPS);
    }

    #[test]
    fn indistinguishable_candidates_score_zero() {
        // zzzzz produces the all-absent pattern for every candidate.
        let guesses = list(&["zzzzz"]);
        let answers = list(&["crane", "slate", "irate"]);
        let matrix = PatternMatrix::build(&guesses, &answers);

        let ranking = rank(&matrix, &[0, 1, 2], &guesses, 1);
        assert!(ranking[0].entropy.abs() < EPS);
    }

    #[test]
    fn ties_keep_guess_list_order() {
        // Both guesses split {aaaaa} into the same single partition, so both
        // score zero; the earlier one must sort first.
        let guesses = list(&["bbbbb", "ccccc"]);
        let answers = list(&["aaaaa"]);
        let matrix = PatternMatrix::build(&guesses, &answers);

        let ranking = rank(&matrix, &[0], &guesses, 2);
        assert_eq!(ranking[0].guess_index, 0);
        assert_eq!(ranking[1].guess_index, 1);
        assert!((ranking[0].entropy - ranking[1].entropy).abs() < EPS);
    }

    #[test]
    fn discriminating_guess_outranks_blind_one() {
        let guesses = list(&["aaaaa", "slate"]);
        let answers = list(&["slate", "irate", "crate", "grate"]);
        let matrix = PatternMatrix::build(&guesses, &answers);
        let candidates: Vec<usize> = (0..answers.len()).collect();

        let ranking = rank(&matrix, &candidates, &guesses, 2);
        assert_eq!(ranking[0].word.text(), "slate");
    }

    #[test]
    fn truncates_to_top_k() {
        let guesses = list(&["crane", "slate", "irate", "trace"]);
        let answers = list(&["slate", "irate"]);
        let matrix = PatternMatrix::build(&guesses, &answers);

        let ranking = rank(&matrix, &[0, 1], &guesses, 2);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn empty_candidates_rank_empty() {
        let guesses = list(&["crane"]);
        let answers = list(&["slate"]);
        let matrix = PatternMatrix::build(&guesses, &answers);

        assert!(rank(&matrix, &[], &guesses, 5).is_empty());
    }

    #[test]
    fn rank_is_reproducible() {
        let guesses = list(&["crane", "slate", "irate", "trace", "grate"]);
        let answers = list(&["slate", "irate", "trace"]);
        let matrix = PatternMatrix::build(&guesses, &answers);
        let candidates: Vec<usize> = (0..answers.len()).collect();

        let a = rank(&matrix, &candidates, &guesses, 5);
        let b = rank(&matrix, &candidates, &guesses, 5);
        assert_eq!(a, b);
    }
}
