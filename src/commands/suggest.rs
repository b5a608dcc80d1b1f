//! One-shot suggestion command
//!
//! Replays a history of `WORD=PATTERN` turns against a fresh session and
//! prints the resulting ranking.

use crate::core::Pattern;
use crate::output::{print_ranking, print_turn_summary};
use crate::solver::{Engine, SessionStatus};
use anyhow::{Context, Result, bail};
use colored::Colorize;

/// Apply each `WORD=PATTERN` turn, then print the top-k ranking.
///
/// Patterns accept any of the notations `Pattern::parse` understands,
/// e.g. `crane=02100` or `crane=-y g--`-style letters.
///
/// # Errors
/// Fails on a malformed turn spec, an invalid or unknown guess word, or a
/// malformed pattern. A failed turn applies nothing.
pub fn run_suggest(engine: &mut Engine, turns: &[String], top_k: usize) -> Result<()> {
    engine.reset();

    for spec in turns {
        let (word, pattern_text) = spec
            .split_once(['=', ':'])
            .with_context(|| format!("turn '{spec}' is not WORD=PATTERN"))?;
        let pattern = Pattern::parse(pattern_text)
            .with_context(|| format!("'{pattern_text}' is not a 5-symbol pattern"))?;

        let before = engine.candidate_count();
        let after = engine
            .update(word, pattern)
            .with_context(|| format!("applying turn '{spec}'"))?;
        print_turn_summary(word, pattern, before, after);
    }

    match engine.status() {
        SessionStatus::Contradiction => {
            bail!("no candidate is consistent with that feedback; check earlier turns");
        }
        SessionStatus::Solved => {
            let solution = engine
                .solution()
                .map(|w| w.text().to_uppercase())
                .unwrap_or_default();
            println!(
                "\n{} {}",
                "Solved! The answer is".bright_green().bold(),
                solution.bright_yellow().bold()
            );
        }
        SessionStatus::InProgress => {
            print_ranking(&engine.ranked_guesses(top_k), engine.candidate_count());
        }
    }
    Ok(())
}
