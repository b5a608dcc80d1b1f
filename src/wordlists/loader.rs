//! Word list loading
//!
//! One word per line of a plain text source. Blank and malformed lines are
//! skipped deterministically, so the resulting indexing is stable across
//! runs as long as the source is unchanged.

use super::WordList;
use crate::core::Word;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Load a word list from a text file, one word per logical line.
///
/// # Errors
/// Returns an I/O error if the file cannot be read.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordList> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let list = words_from_lines(&content);
    debug!("loaded {} words from {}", list.len(), path.display());
    Ok(list)
}

/// Build a word list from newline-separated text.
#[must_use]
pub fn words_from_lines(content: &str) -> WordList {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| Word::parse(line).ok())
        .collect()
}
