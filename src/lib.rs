//! Balls - a dodge-the-balls arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation (vector math, bodies, collisions, spawning, game session)
//! - `settings`: Data-driven game tuning
//! - `highscores`: Best survival time and its storage backends
//! - `runner`: Fixed-timestep driver for wall-clock frame loops

pub mod error;
pub mod highscores;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::{HighScore, MemoryScoreStore, ScoreStore};
pub use settings::Settings;
pub use sim::{EventSink, GameEvent, GamePhase, GameSession};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second). Velocities are in units per tick.
    pub const TICK_RATE_HZ: u32 = 120;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Ball and player radius
    pub const BALL_RADIUS: f64 = 20.0;
    /// Balls spawned when a round starts
    pub const BALL_COUNT_INITIAL: u32 = 4;
    /// Speed given to a ball on activation (units per tick)
    pub const BALL_SPEED_INITIAL: f64 = 3.0;

    /// Seconds between spawn and activation
    pub const BALL_SPAWN_WARMUP: f64 = 2.0;
    /// Seconds between recurring spawns
    pub const BALL_SPAWN_INTERVAL: f64 = 20.0;
    /// Minimum distance from the arena edge for a spawn position
    pub const SPAWN_MARGIN: f64 = 50.0;

    /// Downward velocity added per tick while the round is ending
    pub const GRAVITY_INCREMENT: f64 = 0.1;
    /// How far below the arena every body must fall before the round is over
    pub const EXIT_DEPTH: f64 = 400.0;
}
