//! Circular bodies: the balls and the player

use serde::{Deserialize, Serialize};

use super::vector::{Vector2, Vector2Ext};

/// Id reserved for the player body; balls count up from 1
pub const PLAYER_ID: u32 = 0;

/// A circular body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vector2,
    /// Displacement per tick
    pub vel: Vector2,
    pub radius: f64,
    /// Inactive bodies are in warm-up: they neither move nor collide
    pub active: bool,
    /// Already resolved against a partner this tick
    #[serde(skip)]
    pub colliding: bool,
}

impl Body {
    /// A resting, inactive body
    pub fn new(id: u32, pos: Vector2, radius: f64) -> Self {
        Self {
            id,
            pos,
            vel: Vector2::ZERO,
            radius,
            active: false,
            colliding: false,
        }
    }

    pub fn is_player(&self) -> bool {
        self.id == PLAYER_ID
    }

    /// Advance by one tick of velocity (inactive bodies stay put)
    pub fn move_one_step(&mut self) {
        if self.active {
            self.pos += self.vel;
        }
    }

    /// Distance between centres
    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.pos - other.pos).magnitude()
    }

    /// Both bodies active and their discs overlap
    pub fn is_colliding_with(&self, other: &Body) -> bool {
        self.active && other.active && self.distance_to(other) < self.radius + other.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(id: u32, x: f64, y: f64) -> Body {
        let mut body = Body::new(id, Vector2::new(x, y), 20.0);
        body.active = true;
        body
    }

    #[test]
    fn test_move_one_step() {
        let mut body = active(1, 10.0, 10.0);
        body.vel = Vector2::new(2.0, -1.0);
        body.move_one_step();
        assert_eq!(body.pos, Vector2::new(12.0, 9.0));
    }

    #[test]
    fn test_inactive_body_does_not_move() {
        let mut body = Body::new(1, Vector2::new(10.0, 10.0), 20.0);
        body.vel = Vector2::new(5.0, 5.0);
        for _ in 0..100 {
            body.move_one_step();
        }
        assert_eq!(body.pos, Vector2::new(10.0, 10.0));
    }

    #[test]
    fn test_collision_requires_both_active() {
        let a = active(1, 0.0, 0.0);
        let mut b = active(2, 30.0, 0.0);
        assert!(a.is_colliding_with(&b));

        b.active = false;
        assert!(!a.is_colliding_with(&b));
        assert!(!b.is_colliding_with(&a));
    }

    #[test]
    fn test_touching_is_not_colliding() {
        let a = active(1, 0.0, 0.0);
        let b = active(2, 40.0, 0.0);
        assert_eq!(a.distance_to(&b), 40.0);
        assert!(!a.is_colliding_with(&b));
    }

    #[test]
    fn test_player_id() {
        assert!(active(PLAYER_ID, 0.0, 0.0).is_player());
        assert!(!active(1, 0.0, 0.0).is_player());
    }
}
