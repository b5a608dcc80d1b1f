//! Terminal output formatting

pub mod display;

pub use display::{entropy_bar, pattern_glyphs, print_ranking, print_turn_summary};
