//! Plain interactive session
//!
//! Line-based assistant for terminals where the TUI is unwanted. Owns the
//! session state machine: the engine reports solved/contradiction, the
//! session imposes the six-turn budget and the exhausted state.

use crate::core::Pattern;
use crate::output::{print_ranking, print_turn_summary};
use crate::solver::{Engine, SessionStatus};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

/// Turn budget imposed by this session, not by the engine.
const MAX_TURNS: usize = 6;

enum Command {
    Quit,
    New,
    Undo,
    Text(String),
}

/// Run the line-based interactive session.
///
/// # Errors
/// Returns an error only on I/O failure reading input; every game-level
/// problem is reported and the loop continues.
pub fn run_simple(engine: &mut Engine, top_k: usize) -> Result<()> {
    println!("\n{}", "Wordle Advisor - interactive mode".bright_cyan().bold());
    println!("{}", "─".repeat(44).bright_black());
    println!("Enter your guess, then the feedback the puzzle showed:");
    println!("  2 / g = green (exact), 1 / y = yellow (present), 0 / - = gray");
    println!("Commands: 'new' restart, 'undo' revert a turn, 'quit' exit\n");

    let mut history: Vec<(String, Pattern)> = Vec::new();
    engine.reset();
    print_ranking(&engine.ranked_guesses(top_k), engine.candidate_count());

    loop {
        match engine.status() {
            SessionStatus::Solved => {
                let solution = engine
                    .solution()
                    .map(|w| w.text().to_uppercase())
                    .unwrap_or_default();
                println!(
                    "\n{} {} {}",
                    "Solved in".bright_green().bold(),
                    history.len().to_string().bright_yellow().bold(),
                    format!("turns! The answer is {solution}").bright_green().bold()
                );
                if !ask_yes_no("Play again?")? {
                    break;
                }
                start_over(engine, &mut history, top_k);
            }
            SessionStatus::Contradiction => {
                println!(
                    "\n{}",
                    "No candidate matches that feedback; an earlier turn must be wrong."
                        .red()
                        .bold()
                );
                match read_command("'undo', 'new', or 'quit'")? {
                    Command::Quit => break,
                    Command::New => start_over(engine, &mut history, top_k),
                    Command::Undo => undo(engine, &mut history, top_k)?,
                    Command::Text(_) => {}
                }
            }
            SessionStatus::InProgress if history.len() >= MAX_TURNS => {
                println!(
                    "\n{}",
                    format!("Out of turns after {MAX_TURNS} guesses; session exhausted.")
                        .yellow()
                        .bold()
                );
                match read_command("'undo', 'new', or 'quit'")? {
                    Command::Quit => break,
                    Command::New => start_over(engine, &mut history, top_k),
                    Command::Undo => undo(engine, &mut history, top_k)?,
                    Command::Text(_) => {}
                }
            }
            SessionStatus::InProgress => {
                println!(
                    "{}",
                    format!(
                        "Turn {} of {MAX_TURNS}, {} candidates",
                        history.len() + 1,
                        engine.candidate_count()
                    )
                    .bright_black()
                );

                let word = match read_command("Your guess")? {
                    Command::Quit => break,
                    Command::New => {
                        start_over(engine, &mut history, top_k);
                        continue;
                    }
                    Command::Undo => {
                        undo(engine, &mut history, top_k)?;
                        continue;
                    }
                    Command::Text(text) => text,
                };

                let pattern = match read_command("Feedback")? {
                    Command::Quit => break,
                    Command::New => {
                        start_over(engine, &mut history, top_k);
                        continue;
                    }
                    Command::Undo => {
                        undo(engine, &mut history, top_k)?;
                        continue;
                    }
                    Command::Text(text) => match Pattern::parse(&text) {
                        Some(pattern) => pattern,
                        None => {
                            println!("{}", "Feedback must be five of 0/1/2 or g/y/-".red());
                            continue;
                        }
                    },
                };

                let before = engine.candidate_count();
                match engine.update(&word, pattern) {
                    Ok(after) => {
                        history.push((word.clone(), pattern));
                        print_turn_summary(&word, pattern, before, after);
                        if engine.status() == SessionStatus::InProgress {
                            print_ranking(&engine.ranked_guesses(top_k), after);
                        }
                    }
                    // Nothing was applied; the candidate set is untouched.
                    Err(err) => println!("{}", err.to_string().red()),
                }
            }
        }
    }

    println!("\nBye!\n");
    Ok(())
}

fn start_over(engine: &mut Engine, history: &mut Vec<(String, Pattern)>, top_k: usize) {
    engine.reset();
    history.clear();
    println!("\n{}\n", "New session started.".bright_cyan());
    print_ranking(&engine.ranked_guesses(top_k), engine.candidate_count());
}

/// Revert the last turn by replaying the remaining history from scratch.
fn undo(engine: &mut Engine, history: &mut Vec<(String, Pattern)>, top_k: usize) -> Result<()> {
    if history.pop().is_none() {
        println!("{}", "Nothing to undo.".yellow());
        return Ok(());
    }

    engine.reset();
    for (word, pattern) in history.iter() {
        // Previously accepted turns cannot fail on replay.
        engine.update(word, *pattern)?;
    }

    println!("{}", format!("Undone, back to turn {}.", history.len() + 1).bright_cyan());
    print_ranking(&engine.ranked_guesses(top_k), engine.candidate_count());
    Ok(())
}

fn read_command(prompt: &str) -> io::Result<Command> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(Command::Quit);
    }

    let input = input.trim().to_lowercase();
    Ok(match input.as_str() {
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "n" => Command::New,
        "undo" | "u" => Command::Undo,
        _ => Command::Text(input),
    })
}

fn ask_yes_no(prompt: &str) -> io::Result<bool> {
    print!("{prompt} (y/n): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
