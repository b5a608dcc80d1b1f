//! Feedback patterns and their base-3 integer encoding
//!
//! A pattern is the per-position feedback a guess receives against an
//! answer: 0 = letter absent, 1 = present elsewhere, 2 = exact match.
//! Patterns encode to a single integer in [0,242] using positional weights
//! [81, 27, 9, 3, 1] with position 0 most significant, matching the layout
//! of the persisted pattern matrix.

use super::{WORD_LEN, Word};

/// Number of distinct feedback patterns (3^5).
pub const PATTERN_COUNT: usize = 243;

/// Base-3 positional weights, position 0 most significant.
const WEIGHTS: [u8; WORD_LEN] = [81, 27, 9, 3, 1];

/// Feedback for a single guess position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Letter does not appear in the answer (gray).
    Absent = 0,
    /// Letter appears elsewhere in the answer (yellow).
    Present = 1,
    /// Letter is in the correct position (green).
    Exact = 2,
}

impl Mark {
    /// Base-3 digit of this mark.
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Self::Absent),
            1 => Some(Self::Present),
            2 => Some(Self::Exact),
            _ => None,
        }
    }

    /// Next mark in the cycle Absent -> Present -> Exact -> Absent.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::Absent => Self::Present,
            Self::Present => Self::Exact,
            Self::Exact => Self::Absent,
        }
    }
}

/// Complete feedback for one guess: five marks, one per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    marks: [Mark; WORD_LEN],
}

impl Pattern {
    /// All-exact pattern (the solved state), code 242.
    pub const SOLVED: Self = Self {
        marks: [Mark::Exact; WORD_LEN],
    };

    /// Build a pattern directly from five marks.
    #[must_use]
    pub const fn from_marks(marks: [Mark; WORD_LEN]) -> Self {
        Self { marks }
    }

    /// Compute the feedback `guess` would receive against `answer`.
    ///
    /// Two passes: exact matches first, each consuming its answer letter;
    /// then presence credits against the pool of unconsumed answer letters,
    /// left-to-right. Each physical answer letter credits at most one guess
    /// position, which is what makes duplicate letters come out right.
    #[must_use]
    pub fn between(guess: &Word, answer: &Word) -> Self {
        let g = guess.letters();
        let a = answer.letters();

        let mut marks = [Mark::Absent; WORD_LEN];
        let mut pool = [0u8; 26];

        for i in 0..WORD_LEN {
            if g[i] == a[i] {
                marks[i] = Mark::Exact;
            } else {
                pool[(a[i] - b'a') as usize] += 1;
            }
        }

        for i in 0..WORD_LEN {
            if marks[i] == Mark::Exact {
                continue;
            }
            let slot = &mut pool[(g[i] - b'a') as usize];
            if *slot > 0 {
                marks[i] = Mark::Present;
                *slot -= 1;
            }
        }

        Self { marks }
    }

    /// Integer encoding in [0,242].
    #[must_use]
    pub fn code(self) -> u8 {
        self.marks
            .iter()
            .zip(WEIGHTS)
            .map(|(mark, weight)| mark.digit() * weight)
            .sum()
    }

    /// Exact inverse of [`Pattern::code`]. `None` for values >= 243.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        if code as usize >= PATTERN_COUNT {
            return None;
        }

        let mut marks = [Mark::Absent; WORD_LEN];
        let mut rest = code;
        for (mark, weight) in marks.iter_mut().zip(WEIGHTS) {
            *mark = Mark::from_digit(rest / weight)?;
            rest %= weight;
        }
        Some(Self { marks })
    }

    /// The five marks, position 0 first.
    #[inline]
    #[must_use]
    pub const fn marks(self) -> [Mark; WORD_LEN] {
        self.marks
    }

    /// Mark at position 0..4.
    #[inline]
    #[must_use]
    pub const fn mark(self, pos: usize) -> Mark {
        self.marks[pos]
    }

    /// Whether every position is an exact match.
    #[inline]
    #[must_use]
    pub fn is_solved(self) -> bool {
        self == Self::SOLVED
    }

    /// Parse user feedback like "21010", "GY-G_", or emoji squares.
    ///
    /// Per position: `2`/`g`/green square = exact, `1`/`y`/yellow square =
    /// present, `0`/`-`/`_`/`b`/`x`/white or black square = absent.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut marks = [Mark::Absent; WORD_LEN];
        let mut count = 0;

        for symbol in input.trim().chars() {
            let mark = match symbol {
                '2' | 'g' | 'G' | '🟩' => Mark::Exact,
                '1' | 'y' | 'Y' | '🟨' => Mark::Present,
                '0' | '-' | '_' | 'b' | 'B' | 'x' | 'X' | '⬜' | '⬛' => Mark::Absent,
                _ => return None,
            };
            if count == WORD_LEN {
                return None;
            }
            marks[count] = mark;
            count += 1;
        }

        (count == WORD_LEN).then_some(Self { marks })
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for mark in self.marks {
            write!(f, "{}", mark.digit())?;
        }
        Ok(())
    }
}
