//! Matrix build command
//!
//! Forces a full rebuild of the pattern matrix and persists it, regardless
//! of whether a valid file already exists.

use crate::solver::{PatternMatrix, storage};
use crate::wordlists::loader::load_from_file;
use anyhow::{Context, Result, ensure};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

/// Build the matrix for the given word lists and write it to `matrix_path`.
///
/// # Errors
/// Fails if either list cannot be loaded, is empty, or the matrix cannot
/// be persisted.
pub fn run_build(guess_path: &Path, answer_path: &Path, matrix_path: &Path) -> Result<()> {
    let guesses = load_from_file(guess_path)
        .with_context(|| format!("loading guess list from {}", guess_path.display()))?;
    let answers = load_from_file(answer_path)
        .with_context(|| format!("loading answer list from {}", answer_path.display()))?;

    ensure!(!guesses.is_empty(), "guess list {} is empty", guess_path.display());
    ensure!(!answers.is_empty(), "answer list {} is empty", answer_path.display());

    println!(
        "Building {}x{} pattern matrix ({} cells)...",
        guesses.len(),
        answers.len(),
        guesses.len() * answers.len()
    );

    let pb = ProgressBar::new(guesses.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%)")
            .unwrap()
            .progress_chars("█▓▒░"),
    );

    let started = Instant::now();
    let matrix = PatternMatrix::build_with(&guesses, &answers, || pb.inc(1));
    pb.finish_and_clear();

    storage::save(&matrix, &guesses, &answers, matrix_path)
        .with_context(|| format!("writing matrix to {}", matrix_path.display()))?;

    println!(
        "Done in {:.2}s -> {} ({} bytes)",
        started.elapsed().as_secs_f64(),
        matrix_path.display(),
        matrix.as_bytes().len()
    );
    Ok(())
}
