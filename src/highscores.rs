//! Persisted best score
//!
//! A tiny key-value file: `{"high_score": N}` as JSON. Loading falls back
//! to 0 on a missing or corrupt file; saving is best-effort and never
//! surfaces an error to gameplay.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Storage seam for the best score. The session loads once at construction
/// and saves exactly when a run ends with a new best.
pub trait HighScoreStore {
    fn load(&mut self) -> u64;
    fn save(&mut self, score: u64);
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u64,
}

/// File-backed store, compatible with the classic `highscore.json` format.
#[derive(Debug, Clone)]
pub struct JsonHighScores {
    path: PathBuf,
}

impl JsonHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonHighScores {
    fn load(&mut self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<HighScoreFile>(&json) {
                Ok(file) => {
                    log::info!("loaded high score {}", file.high_score);
                    file.high_score
                }
                Err(err) => {
                    log::warn!("corrupt high score file {}: {err}", self.path.display());
                    0
                }
            },
            Err(_) => {
                log::info!("no high score file at {}, starting at 0", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        let json = match serde_json::to_string(&HighScoreFile { high_score: score }) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not encode high score: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("could not save high score to {}: {err}", self.path.display());
        }
    }
}
