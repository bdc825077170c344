//! Circle-circle collision response
//!
//! Resolution runs in two phases on a colliding pair:
//! 1. Positional correction pushes the discs apart until they touch.
//! 2. Elastic exchange swaps the velocity components along the line of
//!    centres (equal masses, no friction, no energy loss).

use super::body::Body;
use super::vector::{FALLBACK_AXIS, Vector2, Vector2Ext};

/// Result of resolving one pair
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub a: u32,
    pub b: u32,
    /// Unit normal from `a` toward `b` after correction
    pub normal: Vector2,
    /// Interpenetration depth that was removed
    pub overlap: f64,
}

/// Separate two overlapping discs so they just touch
///
/// The overlap is split across the axes in proportion to how far apart the
/// centres are on each axis, and each body takes half of it. Velocities are
/// untouched. Returns the removed overlap depth.
pub fn correct_overlap(a: &mut Body, b: &mut Body) -> f64 {
    let distance = a.distance_to(b);
    let overlap = a.radius + b.radius - distance;

    if distance == 0.0 {
        // Coincident centres: no axis to split along
        let push = FALLBACK_AXIS * (overlap / 2.0);
        a.pos += push;
        b.pos -= push;
        return overlap;
    }

    let x_overlap = overlap * (a.pos.x - b.pos.x).abs() / distance;
    let y_overlap = overlap * (a.pos.y - b.pos.y).abs() / distance;

    let x_push = if a.pos.x > b.pos.x { x_overlap / 2.0 } else { -x_overlap / 2.0 };
    a.pos.x += x_push;
    b.pos.x -= x_push;

    let y_push = if a.pos.y > b.pos.y { y_overlap / 2.0 } else { -y_overlap / 2.0 };
    a.pos.y += y_push;
    b.pos.y -= y_push;

    overlap
}

/// Exchange the normal velocity components of two equal-mass bodies
///
/// Returns the collision normal (from `a` toward `b`).
pub fn elastic_exchange(a: &mut Body, b: &mut Body) -> Vector2 {
    let normal = a.pos.direction_to(b.pos, FALLBACK_AXIS);

    let a_normal = a.vel.dot(normal);
    let b_normal = b.vel.dot(normal);

    a.vel += normal * (b_normal - a_normal);
    b.vel += normal * (a_normal - b_normal);

    normal
}

/// Fully resolve a colliding pair and mark both as done for this tick
pub fn resolve(a: &mut Body, b: &mut Body) -> Contact {
    a.colliding = true;
    b.colliding = true;

    let overlap = correct_overlap(a, b);
    let normal = elastic_exchange(a, b);

    log::trace!("Collision {} <-> {} (overlap {:.3})", a.id, b.id, overlap);

    Contact {
        a: a.id,
        b: b.id,
        normal,
        overlap,
    }
}

/// Whether a pair may be resolved now: overlapping, and neither body has
/// already been resolved this tick
pub fn should_resolve(a: &Body, b: &Body) -> bool {
    !a.colliding && !b.colliding && a.is_colliding_with(b)
}

/// Mutable references to two distinct bodies of a slice
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball(id: u32, x: f64, y: f64, vx: f64, vy: f64) -> Body {
        let mut body = Body::new(id, Vector2::new(x, y), 20.0);
        body.vel = Vector2::new(vx, vy);
        body.active = true;
        body
    }

    #[test]
    fn test_player_ball_scenario() {
        // Arena 800x600, player at (400,300), ball at (400,235)
        let mut player = ball(0, 400.0, 300.0, 0.0, 0.0);
        let mut ball = ball(1, 400.0, 235.0, 0.0, 5.0);
        assert_eq!(ball.distance_to(&player), 65.0);
        assert!(!ball.is_colliding_with(&player));

        ball.pos = Vector2::new(400.0, 265.0);
        assert!(ball.is_colliding_with(&player));

        resolve(&mut ball, &mut player);
        assert!(ball.distance_to(&player) >= 40.0 - 1e-9);
        // Head-on: the ball's downward motion is handed to the player
        assert!((ball.vel.y).abs() < 1e-9);
        assert!((player.vel.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_correct_overlap_is_symmetric() {
        let mut a = ball(1, 100.0, 100.0, 0.0, 0.0);
        let mut b = ball(2, 130.0, 100.0, 0.0, 0.0);
        let overlap = correct_overlap(&mut a, &mut b);
        assert_eq!(overlap, 10.0);
        assert_eq!(a.pos, Vector2::new(95.0, 100.0));
        assert_eq!(b.pos, Vector2::new(135.0, 100.0));
    }

    #[test]
    fn test_correct_overlap_does_not_touch_velocity() {
        let mut a = ball(1, 100.0, 100.0, 1.0, 2.0);
        let mut b = ball(2, 110.0, 120.0, -3.0, 4.0);
        correct_overlap(&mut a, &mut b);
        assert_eq!(a.vel, Vector2::new(1.0, 2.0));
        assert_eq!(b.vel, Vector2::new(-3.0, 4.0));
    }

    #[test]
    fn test_coincident_bodies_separate_along_x() {
        let mut a = ball(1, 200.0, 200.0, 1.0, 0.0);
        let mut b = ball(2, 200.0, 200.0, -1.0, 0.0);
        let contact = resolve(&mut a, &mut b);

        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!(a.vel.is_finite() && b.vel.is_finite());
        assert_eq!(a.pos, Vector2::new(220.0, 200.0));
        assert_eq!(b.pos, Vector2::new(180.0, 200.0));
        assert_eq!(contact.overlap, 40.0);
        assert_eq!(contact.normal, Vector2::new(-1.0, 0.0));
    }

    #[test]
    fn test_resolve_marks_both_colliding() {
        let mut a = ball(1, 100.0, 100.0, 0.0, 0.0);
        let mut b = ball(2, 120.0, 100.0, 0.0, 0.0);
        assert!(should_resolve(&a, &b));
        let contact = resolve(&mut a, &mut b);
        assert!(a.colliding && b.colliding);
        assert_eq!((contact.a, contact.b), (1, 2));
        assert_eq!(contact.normal, Vector2::new(1.0, 0.0));
        assert!(!should_resolve(&a, &b));
    }

    #[test]
    fn test_tangential_velocity_untouched() {
        // Centres aligned on x: y components are tangential
        let mut a = ball(1, 100.0, 100.0, 2.0, 3.0);
        let mut b = ball(2, 130.0, 100.0, -1.0, -7.0);
        resolve(&mut a, &mut b);
        assert!((a.vel.x - (-1.0)).abs() < 1e-12);
        assert!((b.vel.x - 2.0).abs() < 1e-12);
        assert!((a.vel.y - 3.0).abs() < 1e-12);
        assert!((b.vel.y - (-7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut bodies = vec![ball(1, 0.0, 0.0, 0.0, 0.0), ball(2, 1.0, 0.0, 0.0, 0.0)];
        let (a, b) = pair_mut(&mut bodies, 0, 1);
        assert_eq!((a.id, b.id), (1, 2));
        let (a, b) = pair_mut(&mut bodies, 1, 0);
        assert_eq!((a.id, b.id), (2, 1));
    }

    proptest! {
        #[test]
        fn prop_resolution_removes_overlap(
            ax in 100.0f64..700.0, ay in 100.0f64..500.0,
            dx in -39.0f64..39.0, dy in -39.0f64..39.0,
            ra in 5.0f64..30.0, rb in 5.0f64..30.0,
        ) {
            let mut a = Body::new(1, Vector2::new(ax, ay), ra);
            let mut b = Body::new(2, Vector2::new(ax + dx, ay + dy), rb);
            a.active = true;
            b.active = true;
            prop_assume!(a.is_colliding_with(&b));

            resolve(&mut a, &mut b);
            prop_assert!(a.distance_to(&b) >= ra + rb - 1e-6);
        }

        #[test]
        fn prop_normal_momentum_conserved(
            dx in -39.0f64..39.0, dy in -39.0f64..39.0,
            avx in -10.0f64..10.0, avy in -10.0f64..10.0,
            bvx in -10.0f64..10.0, bvy in -10.0f64..10.0,
        ) {
            let mut a = ball(1, 400.0, 300.0, avx, avy);
            let mut b = ball(2, 400.0 + dx, 300.0 + dy, bvx, bvy);
            prop_assume!(a.is_colliding_with(&b));

            correct_overlap(&mut a, &mut b);
            let before_a = a.vel;
            let before_b = b.vel;
            let n = elastic_exchange(&mut a, &mut b);

            let before = before_a.dot(n) + before_b.dot(n);
            let after = a.vel.dot(n) + b.vel.dot(n);
            prop_assert!((before - after).abs() < 1e-9);

            // Total momentum and kinetic energy are conserved too
            prop_assert!(((before_a + before_b) - (a.vel + b.vel)).length() < 1e-9);
            let ke_before = before_a.length_squared() + before_b.length_squared();
            let ke_after = a.vel.length_squared() + b.vel.length_squared();
            prop_assert!((ke_before - ke_after).abs() < 1e-6);
        }
    }
}
