//! Ordered word lists with index-stable addressing
//!
//! The index of a word in its list is its identity everywhere else in the
//! engine: matrix rows and columns and candidate sets all refer to these
//! indices. Lists are built once at load time and never mutated.

pub mod loader;

use crate::core::Word;
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::Hasher;

/// An immutable, ordered list of words plus a text -> index lookup table.
///
/// Order is load order. If the same text appears twice, the lookup table
/// keeps the first index; both entries keep their positions in the list.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<Word>,
    index: FxHashMap<String, usize>,
}

impl WordList {
    /// Build a list from already-validated words, preserving order.
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(words.len());
        for (i, word) in words.iter().enumerate() {
            index.entry(word.text().to_string()).or_insert(i);
        }
        Self { words, index }
    }

    /// All words in load order.
    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Word at a given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// Index of a word by its lowercase text.
    #[must_use]
    pub fn index_of(&self, text: &str) -> Option<usize> {
        self.index.get(text).copied()
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Deterministic 64-bit digest of the list's content and order.
    ///
    /// Two lists fingerprint equal iff they hold the same texts in the same
    /// order, which is exactly the compatibility condition for a persisted
    /// pattern matrix.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for word in &self.words {
            hasher.write(word.text().as_bytes());
            hasher.write_u8(b'\n');
        }
        hasher.finish()
    }
}

impl FromIterator<Word> for WordList {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
