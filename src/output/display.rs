//! Terminal formatting for rankings and patterns

use crate::core::{Mark, Pattern};
use crate::solver::RankedGuess;
use colored::Colorize;

/// Render a pattern as colored square glyphs.
#[must_use]
pub fn pattern_glyphs(pattern: Pattern) -> String {
    pattern
        .marks()
        .iter()
        .map(|mark| match mark {
            Mark::Exact => "🟩",
            Mark::Present => "🟨",
            Mark::Absent => "⬜",
        })
        .collect()
}

/// Fixed-width bar visualizing entropy against a nominal 6-bit maximum.
#[must_use]
pub fn entropy_bar(entropy: f64, width: usize) -> String {
    let filled = ((entropy / 6.0) * width as f64) as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print the ranked-guess table for the current candidate set.
pub fn print_ranking(ranking: &[RankedGuess], candidate_count: usize) {
    if ranking.is_empty() {
        println!("{}", "No guesses to rank.".red());
        return;
    }

    println!(
        "\n{} {}",
        "Top guesses against".bright_cyan(),
        format!("{candidate_count} candidates").bright_yellow().bold()
    );
    println!("{}", "─".repeat(44).bright_black());
    println!("  {:>4}  {:<7} {:>8}", "#".bright_black(), "word", "entropy");

    for (i, row) in ranking.iter().enumerate() {
        println!(
            "  {:>4}  {:<7} {:>8}  {}",
            (i + 1).to_string().bright_black(),
            row.word.text().to_uppercase().bright_white().bold(),
            format!("{:.4}", row.entropy).bright_yellow(),
            entropy_bar(row.entropy, 18).green()
        );
    }
    println!();
}

/// Print the narrowing effect of one applied turn.
pub fn print_turn_summary(guess: &str, pattern: Pattern, before: usize, after: usize) {
    println!(
        "  {} {}  {} {} {}",
        guess.to_uppercase().bright_white().bold(),
        pattern_glyphs(pattern),
        before.to_string().bright_black(),
        "→".bright_black(),
        after.to_string().bright_yellow().bold()
    );
}
