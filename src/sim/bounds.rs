//! Rectangular arena walls

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::vector::Vector2;

/// Which wall a body bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Play area spanning `[0, width] x [0, height]`, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub width: f64,
    pub height: f64,
}

impl ArenaBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a centre so a disc of `radius` stays inside the arena
    pub fn clamp_inside(&self, pos: Vector2, radius: f64) -> Vector2 {
        Vector2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }

    /// Reflect a body off the first wall it touches
    ///
    /// Walls are checked left, right, top, bottom and at most one bounces per
    /// call. The floor only bounces when `floor_enabled`; otherwise bodies
    /// fall through it. Only the offending velocity component changes.
    pub fn bounce(&self, body: &mut Body, floor_enabled: bool) -> Option<Wall> {
        if !body.active {
            return None;
        }

        let r = body.radius;
        if body.pos.x <= r {
            body.pos.x = r;
            body.vel.x = body.vel.x.abs();
            Some(Wall::Left)
        } else if body.pos.x >= self.width - r {
            body.pos.x = self.width - r;
            body.vel.x = -body.vel.x.abs();
            Some(Wall::Right)
        } else if body.pos.y <= r {
            body.pos.y = r;
            body.vel.y = body.vel.y.abs();
            Some(Wall::Top)
        } else if floor_enabled && body.pos.y >= self.height - r {
            body.pos.y = self.height - r;
            body.vel.y = -body.vel.y.abs();
            Some(Wall::Bottom)
        } else {
            None
        }
    }
}
