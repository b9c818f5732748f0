//! High-score persistence: one integer in a plain-text file.
//!
//! Missing or unparseable files read as zero; failed writes are skipped.
//! Score I/O is never a reason to take the game down.

use std::fs;
use std::path::PathBuf;

use crate::types::HIGHSCORE_FILE;

pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (current working directory).
    pub fn default_location() -> Self {
        Self::new(HIGHSCORE_FILE)
    }

    /// Stored high score, or 0 when the file is missing or malformed.
    pub fn load(&self) -> u64 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Persist `score` if it beats the stored value; returns the resulting
    /// best for display. The write is best-effort.
    pub fn record(&self, score: u64) -> u64 {
        let stored = self.load();
        if score > stored {
            let _ = fs::write(&self.path, score.to_string());
            score
        } else {
            stored
        }
    }
}
