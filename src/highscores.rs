//! Best survival time
//!
//! The only persisted value is the longest survival in whole seconds. The
//! session reads and writes it through `ScoreStore`, so the backend (memory
//! or a JSON file) stays outside the simulation.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Persisted best-survival record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    /// Longest survival in whole seconds
    pub seconds: u64,
}

impl HighScore {
    /// Whether a survival time beats this record
    pub fn beaten_by(&self, seconds: u64) -> bool {
        seconds > self.seconds
    }
}

/// Storage backend for the best survival time
pub trait ScoreStore {
    /// Stored best, if any round has been recorded
    fn load(&self) -> Option<HighScore>;

    /// Replace the stored best
    fn save(&mut self, score: HighScore);
}

/// Keeps the best score for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Option<HighScore>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self { best: None }
    }

    pub fn with_best(seconds: u64) -> Self {
        Self {
            best: Some(HighScore { seconds }),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<HighScore> {
        self.best
    }

    fn save(&mut self, score: HighScore) {
        self.best = Some(score);
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: std::path::PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> crate::Result<HighScore> {
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, score: &HighScore) -> crate::Result<()> {
        let json = serde_json::to_string(score)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&self) -> Option<HighScore> {
        if !self.path.exists() {
            log::info!("No high score found, starting fresh");
            return None;
        }
        match self.read() {
            Ok(score) => {
                log::info!("Loaded high score: {}s", score.seconds);
                Some(score)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, score: HighScore) {
        match self.write(&score) {
            Ok(()) => log::info!("High score saved ({}s)", score.seconds),
            Err(e) => log::warn!("Failed to save high score to {}: {}", self.path.display(), e),
        }
    }
}

/// Number of balls in play after surviving `seconds`
pub fn ball_count_for(seconds: u64, settings: &Settings) -> u64 {
    (seconds as f64 / settings.spawn_interval_secs).floor() as u64
        + settings.ball_count_initial as u64
}

/// One-line round summary for the results screen
pub fn results_line(seconds: u64, settings: &Settings) -> String {
    format!(
        "Time alive: {}s ({} balls)",
        seconds,
        ball_count_for(seconds, settings)
    )
}
