//! Game phase and read-only views of the session
//!
//! Renderers and score screens consume `Snapshot`s between ticks; they never
//! touch the live body list.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::vector::Vector2;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start, idle player
    #[default]
    Menu,
    /// Balls are in play and the player is dodging
    Playing,
    /// Player was hit; everything falls out of the arena
    Ending,
    /// Round finished, results on screen
    Ended,
}

impl GamePhase {
    /// Whether a start request is honoured in this phase
    pub fn can_start(self) -> bool {
        matches!(self, GamePhase::Menu | GamePhase::Ended)
    }
}

/// What a renderer needs to draw one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub id: u32,
    pub pos: Vector2,
    pub radius: f64,
    /// Inactive bodies are drawn as grey placeholders
    pub active: bool,
}

impl From<&Body> for BodyView {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            pos: body.pos,
            radius: body.radius,
            active: body.active,
        }
    }
}

/// Copy of the session state taken between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Session clock (seconds)
    pub time: f64,
    pub bodies: Vec<BodyView>,
    pub player: BodyView,
    /// Whole seconds survived in the last (or current) round
    pub survival_secs: u64,
    pub best_secs: Option<u64>,
}
