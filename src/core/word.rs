//! Validated 5-letter word type
//!
//! A `Word` is immutable once constructed and always holds exactly five
//! lowercase ASCII letters.

use std::fmt;

/// Number of letters in every word handled by the engine.
pub const WORD_LEN: usize = 5;

/// A 5-letter word, normalized to lowercase ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: [u8; WORD_LEN],
}

/// Rejection reason for a word that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    /// Input was not exactly five characters long.
    BadLength(usize),
    /// Input contained a character outside a-z / A-Z.
    BadCharacter(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength(len) => write!(f, "word must be exactly 5 letters, got {len}"),
            Self::BadCharacter(ch) => write!(f, "word contains invalid character {ch:?}"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Parse and validate a word. Uppercase input is normalized.
    ///
    /// # Errors
    /// Returns `WordError` if the input is not exactly five ASCII letters.
    pub fn parse(text: &str) -> Result<Self, WordError> {
        let text = text.trim();

        if text.chars().count() != WORD_LEN {
            return Err(WordError::BadLength(text.chars().count()));
        }

        if let Some(bad) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordError::BadCharacter(bad));
        }

        let text = text.to_ascii_lowercase();
        let mut letters = [0u8; WORD_LEN];
        letters.copy_from_slice(text.as_bytes());

        Ok(Self { text, letters })
    }

    /// The word as a lowercase string slice.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The word as lowercase ASCII bytes.
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> &[u8; WORD_LEN] {
        &self.letters
    }

    /// Letter at position 0..4.
    ///
    /// # Panics
    /// Panics if `pos >= 5`.
    #[inline]
    #[must_use]
    pub const fn letter(&self, pos: usize) -> u8 {
        self.letters[pos]
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let word = Word::parse("crane").unwrap();
        assert_eq!(word.text(), "crane");
        assert_eq!(word.letters(), b"crane");
    }

    #[test]
    fn parse_normalizes_case() {
        assert_eq!(Word::parse("CRANE").unwrap().text(), "crane");
        assert_eq!(Word::parse("CrAnE").unwrap().text(), "crane");
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(Word::parse("  crane\n").unwrap().text(), "crane");
    }

    #[test]
    fn parse_rejects_bad_length() {
        assert_eq!(Word::parse("cran"), Err(WordError::BadLength(4)));
        assert_eq!(Word::parse("cranes"), Err(WordError::BadLength(6)));
        assert_eq!(Word::parse(""), Err(WordError::BadLength(0)));
    }

    #[test]
    fn parse_rejects_bad_characters() {
        assert_eq!(Word::parse("cr4ne"), Err(WordError::BadCharacter('4')));
        assert_eq!(Word::parse("cra e"), Err(WordError::BadCharacter(' ')));
        assert_eq!(Word::parse("cran!"), Err(WordError::BadCharacter('!')));
    }

    #[test]
    fn letter_access() {
        let word = Word::parse("slate").unwrap();
        assert_eq!(word.letter(0), b's');
        assert_eq!(word.letter(4), b'e');
    }

    #[test]
    fn display_and_from_str() {
        let word: Word = "IRATE".parse().unwrap();
        assert_eq!(format!("{word}"), "irate");
    }

    #[test]
    fn equality_ignores_input_case() {
        assert_eq!(Word::parse("crane").unwrap(), Word::parse("CRANE").unwrap());
        assert_ne!(Word::parse("crane").unwrap(), Word::parse("slate").unwrap());
    }
}
