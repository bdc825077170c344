//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (velocities are per tick)
//! - Seeded RNG only
//! - Delayed work goes through the session's timer queue
//! - No rendering, audio or storage dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod events;
pub mod session;
pub mod spawn;
pub mod state;
pub mod timers;
pub mod vector;

pub use body::{Body, PLAYER_ID};
pub use bounds::{ArenaBounds, Wall};
pub use collision::{Contact, correct_overlap, elastic_exchange, resolve};
pub use events::{EventLog, EventSink, GameEvent, LogSink};
pub use session::GameSession;
pub use spawn::SpawnScheduler;
pub use state::{BodyView, GamePhase, Snapshot};
pub use timers::{TimerAction, TimerQueue};
pub use vector::{FALLBACK_AXIS, Vector2, Vector2Ext};
