//! Best-score persistence.
//!
//! Only one integer survives between runs. The session reads it once at
//! start-up and writes it whenever a new best is reached.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for best-score storage.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing file exists but is not valid JSON for a best score.
    Format(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "best score storage I/O failed: {e}"),
            Self::Format(e) => write!(f, "best score file is malformed: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e)
    }
}

/// A durable home for the best score.
pub trait ScoreStore: fmt::Debug {
    /// Read the stored best score (0 when nothing has been stored yet).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load_best(&self) -> Result<u64, StoreError>;

    /// Replace the stored best score.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save_best(&mut self, score: u64) -> Result<(), StoreError>;
}

/// In-memory store, for tests and replays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStore {
    /// The stored value.
    best: u64,
}

impl MemoryStore {
    /// Create a store holding `best`.
    #[must_use]
    pub const fn new(best: u64) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save_best(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

/// On-disk layout of the best-score file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestScoreFile {
    /// The best score reached so far.
    best_score: u64,
}

/// JSON file store: `{"best_score": N}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    /// Location of the file.
    path: PathBuf,
}

impl JsonFileStore {
    /// Default file name, relative to the working directory.
    pub const DEFAULT_FILE: &'static str = ".slide48-best.json";

    /// Create a store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_best(&self) -> Result<u64, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let file: BestScoreFile = serde_json::from_str(&text)?;
        Ok(file.best_score)
    }

    fn save_best(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&BestScoreFile { best_score: score })?;
        // Write-then-rename so a crash never leaves a truncated file behind
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
