//! Matrix persistence
//!
//! The matrix is stored as a small fixed header followed by the raw
//! row-major payload. The header carries the dimensions and a fingerprint
//! of each word list, so a consumer can tell a stale file from a valid one
//! instead of silently loading incompatible data. Writes go to a temporary
//! sibling path first and are renamed into place, so a crash mid-write
//! never publishes a corrupt file.

use super::matrix::PatternMatrix;
use crate::core::PATTERN_COUNT;
use crate::wordlists::WordList;
use log::info;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

const MAGIC: [u8; 4] = *b"WMX1";
const HEADER_LEN: usize = 4 + 4 + 4 + 8 + 8;

/// Why a persisted matrix could not be used.
#[derive(Debug)]
pub enum StorageError {
    /// The file could not be read or written.
    Io(io::Error),
    /// The file exists but is not a matrix file this version understands.
    Corrupt(&'static str),
    /// The stored shape disagrees with the current word-list sizes.
    /// The matrix must be rebuilt, never reused.
    DimensionMismatch {
        stored: (usize, usize),
        current: (usize, usize),
    },
    /// Same shape, but the stored lists differ in content or order.
    FingerprintMismatch,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "matrix file I/O error: {err}"),
            Self::Corrupt(what) => write!(f, "matrix file is corrupt: {what}"),
            Self::DimensionMismatch { stored, current } => write!(
                f,
                "matrix shape {}x{} does not match current word lists {}x{}",
                stored.0, stored.1, current.0, current.1
            ),
            Self::FingerprintMismatch => {
                write!(f, "matrix was built from different word lists")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Persist a matrix with the fingerprints of the lists it was built from.
///
/// # Errors
/// Returns an I/O error if the temporary file cannot be written or renamed.
pub fn save(
    matrix: &PatternMatrix,
    guesses: &WordList,
    answers: &WordList,
    path: &Path,
) -> io::Result<()> {
    let tmp = path.with_extension("tmp");

    {
        let mut out = BufWriter::new(File::create(&tmp)?);
        out.write_all(&MAGIC)?;
        out.write_all(&u32::try_from(matrix.guess_count()).map_err(too_large)?.to_le_bytes())?;
        out.write_all(&u32::try_from(matrix.answer_count()).map_err(too_large)?.to_le_bytes())?;
        out.write_all(&guesses.fingerprint().to_le_bytes())?;
        out.write_all(&answers.fingerprint().to_le_bytes())?;
        out.write_all(matrix.as_bytes())?;
        out.flush()?;
    }

    // Publish atomically: readers see either the old file or the new one.
    fs::rename(&tmp, path)?;
    info!("saved pattern matrix to {}", path.display());
    Ok(())
}

fn too_large(_: std::num::TryFromIntError) -> io::Error {
    io::Error::new(ErrorKind::InvalidInput, "word list too large for matrix header")
}

/// Load a matrix and verify it against the current word lists.
///
/// # Errors
/// Fails on any of: missing/unreadable file, unrecognized header, truncated
/// or oversized payload, invalid code bytes, shape mismatch, or fingerprint
/// mismatch. A failed load never yields a usable matrix.
pub fn load(path: &Path, guesses: &WordList, answers: &WordList) -> Result<PatternMatrix, StorageError> {
    let mut file = File::open(path)?;

    let mut header = [0u8; HEADER_LEN];
    file.read_exact(&mut header)
        .map_err(|_| StorageError::Corrupt("short header"))?;

    if header[..4] != MAGIC {
        return Err(StorageError::Corrupt("bad magic"));
    }

    let stored_guesses = u32::from_le_bytes(header[4..8].try_into().expect("fixed slice")) as usize;
    let stored_answers = u32::from_le_bytes(header[8..12].try_into().expect("fixed slice")) as usize;
    let stored_guess_fp = u64::from_le_bytes(header[12..20].try_into().expect("fixed slice"));
    let stored_answer_fp = u64::from_le_bytes(header[20..28].try_into().expect("fixed slice"));

    if (stored_guesses, stored_answers) != (guesses.len(), answers.len()) {
        return Err(StorageError::DimensionMismatch {
            stored: (stored_guesses, stored_answers),
            current: (guesses.len(), answers.len()),
        });
    }

    if stored_guess_fp != guesses.fingerprint() || stored_answer_fp != answers.fingerprint() {
        return Err(StorageError::FingerprintMismatch);
    }

    let expected = stored_guesses * stored_answers;
    let mut codes = Vec::new();
    file.read_to_end(&mut codes)?;

    if codes.len() != expected {
        return Err(StorageError::Corrupt("payload length mismatch"));
    }
    if codes.iter().any(|&code| code as usize >= PATTERN_COUNT) {
        return Err(StorageError::Corrupt("pattern code out of range"));
    }

    PatternMatrix::from_parts(stored_guesses, stored_answers, codes)
        .ok_or(StorageError::Corrupt("payload length mismatch"))
}

/// Load a valid matrix, or rebuild and persist one.
///
/// Any load failure triggers a rebuild; the reason is logged. A save
/// failure after a successful rebuild is returned as an error rather than
/// leaving a stale file in place silently.
///
/// # Errors
/// Returns an error only if the rebuilt matrix cannot be persisted.
pub fn load_or_build(
    path: &Path,
    guesses: &WordList,
    answers: &WordList,
) -> Result<PatternMatrix, StorageError> {
    match load(path, guesses, answers) {
        Ok(matrix) => {
            info!("loaded pattern matrix from {}", path.display());
            Ok(matrix)
        }
        Err(StorageError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            info!("no matrix at {}, building", path.display());
            rebuild(path, guesses, answers)
        }
        Err(reason) => {
            info!("rebuilding matrix: {reason}");
            rebuild(path, guesses, answers)
        }
    }
}

fn rebuild(
    path: &Path,
    guesses: &WordList,
    answers: &WordList,
) -> Result<PatternMatrix, StorageError> {
    let matrix = PatternMatrix::build(guesses, answers);
    save(&matrix, guesses, answers, path)?;
    Ok(matrix)
}
