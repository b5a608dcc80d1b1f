//! Wordle Advisor - CLI
//!
//! Interactive assistant and batch tooling around the pattern-matrix
//! engine. Word lists and the persisted matrix live in files; the matrix
//! is rebuilt automatically whenever it no longer matches the lists.

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wordle_advisor::{
    commands::{run_build, run_simple, run_suggest},
    interactive::{App, run_tui},
    solver::{Engine, storage},
    wordlists::{WordList, loader::load_from_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_advisor",
    about = "Wordle assistant: entropy-ranked suggestions from a precomputed feedback matrix",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the allowed-guess word list (one word per line)
    #[arg(short = 'g', long, global = true, default_value = "data/allowed_words.txt")]
    guesses: PathBuf,

    /// Path to the possible-answer word list (one word per line)
    #[arg(short = 'a', long, global = true, default_value = "data/answer_words.txt")]
    answers: PathBuf,

    /// Path of the persisted pattern matrix
    #[arg(short = 'm', long, global = true, default_value = "data/pattern_matrix.wmx")]
    matrix: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI assistant (default)
    Assist,

    /// Plain line-based assistant without the TUI
    Simple {
        /// How many ranked guesses to show per turn
        #[arg(short = 'k', long, default_value = "10")]
        top: usize,
    },

    /// One-shot ranking after replaying WORD=PATTERN turns
    ///
    /// Example: suggest crane=00202 moist=10000
    Suggest {
        /// Turns as WORD=PATTERN (pattern: five of 0/1/2 or -/y/g)
        turns: Vec<String>,

        /// How many ranked guesses to show
        #[arg(short = 'k', long, default_value = "10")]
        top: usize,
    },

    /// Rebuild the pattern matrix and persist it
    Build,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Assist) {
        Commands::Assist => {
            let engine = load_engine(&cli.guesses, &cli.answers, &cli.matrix)?;
            run_tui(App::new(engine))
        }
        Commands::Simple { top } => {
            let mut engine = load_engine(&cli.guesses, &cli.answers, &cli.matrix)?;
            run_simple(&mut engine, top)
        }
        Commands::Suggest { turns, top } => {
            let mut engine = load_engine(&cli.guesses, &cli.answers, &cli.matrix)?;
            run_suggest(&mut engine, &turns, top)
        }
        Commands::Build => run_build(&cli.guesses, &cli.answers, &cli.matrix),
    }
}

/// Load the word lists, obtain a matching matrix, and assemble the engine.
fn load_engine(guess_path: &Path, answer_path: &Path, matrix_path: &Path) -> Result<Engine> {
    let guesses = load_from_file(guess_path)
        .with_context(|| format!("loading guess list from {}", guess_path.display()))?;
    let answers = load_from_file(answer_path)
        .with_context(|| format!("loading answer list from {}", answer_path.display()))?;

    ensure_usable(&guesses, guess_path, "guess")?;
    ensure_usable(&answers, answer_path, "answer")?;

    let matrix = storage::load_or_build(matrix_path, &guesses, &answers)
        .with_context(|| format!("obtaining pattern matrix at {}", matrix_path.display()))?;

    Engine::new(guesses, answers, matrix).map_err(Into::into)
}

fn ensure_usable(list: &WordList, path: &Path, kind: &str) -> Result<()> {
    ensure!(
        !list.is_empty(),
        "{kind} list {} contains no valid 5-letter words",
        path.display()
    );
    Ok(())
}
