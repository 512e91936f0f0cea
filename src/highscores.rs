//! High score persistence
//!
//! The best player score survives across rounds and process restarts. The
//! file-backed store degrades gracefully: a missing or unreadable file reads
//! as zero, and a failed save is logged and dropped rather than surfaced to
//! the game loop.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const HIGH_SCORE_KEY: &str = "harvest_rush_highscore";

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Read the stored best score, or 0 when none exists
    fn load(&self) -> u32;
    /// Persist a new best score
    fn save(&mut self, score: u32);
}

/// JSON-file-backed store, keyed so the file can later hold more entries
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => return 0,
        };
        match serde_json::from_str::<HashMap<String, u32>>(&json) {
            Ok(map) => map.get(HIGH_SCORE_KEY).copied().unwrap_or(0),
            Err(err) => {
                log::warn!("Ignoring corrupt score file {}: {err}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        let mut map = HashMap::new();
        map.insert(HIGH_SCORE_KEY.to_string(), score);
        let json = match serde_json::to_string(&map) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to serialize high score: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("Failed to save high score to {}: {err}", self.path.display());
        } else {
            log::info!("High score saved: {score}");
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    pub score: u32,
    pub saves: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
        self.saves += 1;
    }
}
