//! Game settings and tuning
//!
//! Every gameplay constant lives here so a round can be tuned from a JSON
//! file without rebuilding. Missing fields fall back to `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f64,
    pub arena_height: f64,

    // === Bodies ===
    pub ball_radius: f64,
    pub player_radius: f64,
    /// Speed given to a ball when it activates (units per tick)
    pub ball_speed_initial: f64,

    // === Spawning ===
    pub ball_count_initial: u32,
    /// Seconds a freshly spawned ball stays inert
    pub spawn_warmup_secs: f64,
    /// Seconds between recurring spawns while playing
    pub spawn_interval_secs: f64,
    /// Minimum distance from the arena edge for spawn positions
    pub spawn_margin: f64,

    // === Ending ===
    /// Downward velocity added per tick once the player is hit
    pub gravity_increment: f64,
    /// Depth below the arena floor every body must pass to end the round
    pub exit_depth: f64,

    // === Timing ===
    pub tick_rate_hz: u32,

    /// RNG seed for spawn positions (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            player_radius: BALL_RADIUS,
            ball_speed_initial: BALL_SPEED_INITIAL,

            ball_count_initial: BALL_COUNT_INITIAL,
            spawn_warmup_secs: BALL_SPAWN_WARMUP,
            spawn_interval_secs: BALL_SPAWN_INTERVAL,
            spawn_margin: SPAWN_MARGIN,

            gravity_increment: GRAVITY_INCREMENT,
            exit_depth: EXIT_DEPTH,

            tick_rate_hz: TICK_RATE_HZ,

            seed: None,
        }
    }
}

impl Settings {
    /// Seconds of simulated time per tick
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }

    /// Largest body radius in play
    pub fn max_radius(&self) -> f64 {
        self.ball_radius.max(self.player_radius)
    }

    /// Check that a session can run with these settings
    pub fn validate(&self) -> Result<()> {
        if !(self.ball_radius > 0.0) {
            return Err(Error::invalid(
                "ball_radius",
                format!("must be positive, got {}", self.ball_radius),
            ));
        }
        if !(self.player_radius > 0.0) {
            return Err(Error::invalid(
                "player_radius",
                format!("must be positive, got {}", self.player_radius),
            ));
        }

        if !self.arena_width.is_finite() || !self.arena_height.is_finite() {
            return Err(Error::invalid(
                "arena_width",
                format!("arena must be finite, got {}x{}", self.arena_width, self.arena_height),
            ));
        }

        let min_extent = 2.0 * self.max_radius();
        if !(self.arena_width > min_extent) {
            return Err(Error::invalid(
                "arena_width",
                format!("{} must exceed twice the largest radius ({})", self.arena_width, min_extent),
            ));
        }
        if !(self.arena_height > min_extent) {
            return Err(Error::invalid(
                "arena_height",
                format!("{} must exceed twice the largest radius ({})", self.arena_height, min_extent),
            ));
        }

        if !(self.spawn_margin >= 0.0)
            || 2.0 * self.spawn_margin > self.arena_width
            || 2.0 * self.spawn_margin > self.arena_height
        {
            return Err(Error::invalid(
                "spawn_margin",
                format!("{} leaves no room to spawn in the arena", self.spawn_margin),
            ));
        }

        if self.tick_rate_hz == 0 {
            return Err(Error::invalid("tick_rate_hz", "must be at least 1"));
        }
        if !(self.spawn_interval_secs > 0.0) {
            return Err(Error::invalid(
                "spawn_interval_secs",
                format!("must be positive, got {}", self.spawn_interval_secs),
            ));
        }
        if !(self.spawn_warmup_secs >= 0.0) {
            return Err(Error::invalid(
                "spawn_warmup_secs",
                format!("must not be negative, got {}", self.spawn_warmup_secs),
            ));
        }
        if !(self.ball_speed_initial >= 0.0) || !self.ball_speed_initial.is_finite() {
            return Err(Error::invalid(
                "ball_speed_initial",
                format!("must be finite and not negative, got {}", self.ball_speed_initial),
            ));
        }
        // Without a downward pull the ending phase never empties the arena
        if !(self.gravity_increment > 0.0) || !self.gravity_increment.is_finite() {
            return Err(Error::invalid(
                "gravity_increment",
                format!("must be finite and positive, got {}", self.gravity_increment),
            ));
        }
        if !(self.exit_depth >= 0.0) || !self.exit_depth.is_finite() {
            return Err(Error::invalid(
                "exit_depth",
                format!("must be finite and not negative, got {}", self.exit_depth),
            ));
        }

        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
