//! Core domain types
//!
//! Words, feedback patterns, and their integer encoding. Everything here is
//! pure and has no knowledge of word lists or matrices.

mod pattern;
mod word;

pub use pattern::{Mark, PATTERN_COUNT, Pattern};
pub use word::{WORD_LEN, Word, WordError};
