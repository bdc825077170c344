//! Ball spawning and warm-up activation
//!
//! A spawned ball appears inert at a random spot, then after the warm-up
//! delay is launched straight at wherever the player is at that moment.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, PLAYER_ID};
use super::bounds::ArenaBounds;
use super::timers::{TimerAction, TimerQueue};
use super::vector::{FALLBACK_AXIS, Vector2, Vector2Ext};
use crate::settings::Settings;

/// Slack for interval comparisons on the tick clock
const INTERVAL_EPSILON: f64 = 1e-9;

/// Creates balls and decides when the next one is due
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    rng: Pcg32,
    radius: f64,
    margin: f64,
    speed: f64,
    warmup: f64,
    interval: f64,
    /// Clock time of the most recent spawn
    last_spawn: f64,
    next_id: u32,
}

impl SpawnScheduler {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            radius: settings.ball_radius,
            margin: settings.spawn_margin,
            speed: settings.ball_speed_initial,
            warmup: settings.spawn_warmup_secs,
            interval: settings.spawn_interval_secs,
            last_spawn: 0.0,
            next_id: PLAYER_ID + 1,
        }
    }

    /// Restart the recurring-spawn interval from `now`
    pub fn reset(&mut self, now: f64) {
        self.last_spawn = now;
    }

    /// A full interval has passed since the last spawn
    pub fn is_due(&self, now: f64) -> bool {
        now - self.last_spawn >= self.interval - INTERVAL_EPSILON
    }

    /// Add an inert ball at a random position and queue its activation
    ///
    /// Returns the index of the new body in `bodies`.
    pub fn spawn(
        &mut self,
        now: f64,
        bounds: &ArenaBounds,
        bodies: &mut Vec<Body>,
        timers: &mut TimerQueue,
    ) -> usize {
        let x = self
            .rng
            .random_range(self.margin..=bounds.width - self.margin);
        let y = self
            .rng
            .random_range(self.margin..=bounds.height - self.margin);

        let id = self.next_id;
        self.next_id += 1;

        bodies.push(Body::new(id, Vector2::new(x, y), self.radius));
        self.last_spawn = now;
        timers.schedule(now + self.warmup, TimerAction::ActivateBall { id });

        log::debug!("Spawned ball {} at ({:.1}, {:.1})", id, x, y);
        bodies.len() - 1
    }

    /// End warm-up: aim the ball at `target` and set it moving
    pub fn activate(&self, body: &mut Body, target: Vector2) {
        let direction = body.pos.direction_to(target, FALLBACK_AXIS);
        body.vel = direction * self.speed;
        body.active = true;
        log::debug!(
            "Activated ball {} heading ({:.2}, {:.2})",
            body.id,
            body.vel.x,
            body.vel.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> SpawnScheduler {
        SpawnScheduler::new(&Settings::default(), 12345)
    }

    #[test]
    fn test_spawn_within_margin() {
        let mut spawner = scheduler();
        let bounds = ArenaBounds::new(800.0, 600.0);
        let mut bodies = Vec::new();
        let mut timers = TimerQueue::new();

        for _ in 0..200 {
            spawner.spawn(0.0, &bounds, &mut bodies, &mut timers);
        }
        for body in &bodies {
            assert!((50.0..=750.0).contains(&body.pos.x));
            assert!((50.0..=550.0).contains(&body.pos.y));
            assert!(!body.active);
            assert_eq!(body.vel, Vector2::ZERO);
        }
    }

    #[test]
    fn test_spawn_assigns_ids_and_schedules_activation() {
        let mut spawner = scheduler();
        let bounds = ArenaBounds::new(800.0, 600.0);
        let mut bodies = Vec::new();
        let mut timers = TimerQueue::new();

        let idx = spawner.spawn(5.0, &bounds, &mut bodies, &mut timers);
        assert_eq!(idx, 0);
        assert_eq!(bodies[0].id, 1);
        // Spawning restarts the interval
        assert!(!spawner.is_due(24.9));
        assert!(spawner.is_due(25.0));
        assert_eq!(timers.pop_due(6.99), None);
        assert_eq!(timers.pop_due(7.0), Some(TimerAction::ActivateBall { id: 1 }));

        spawner.spawn(6.0, &bounds, &mut bodies, &mut timers);
        assert_eq!(bodies[1].id, 2);
    }

    #[test]
    fn test_same_seed_same_positions() {
        let bounds = ArenaBounds::new(800.0, 600.0);
        let mut a = scheduler();
        let mut b = scheduler();
        let (mut bodies_a, mut bodies_b) = (Vec::new(), Vec::new());
        let mut timers = TimerQueue::new();
        for _ in 0..5 {
            a.spawn(0.0, &bounds, &mut bodies_a, &mut timers);
            b.spawn(0.0, &bounds, &mut bodies_b, &mut timers);
        }
        assert_eq!(bodies_a, bodies_b);
    }

    #[test]
    fn test_activate_aims_at_target() {
        let spawner = scheduler();
        let mut body = Body::new(1, Vector2::new(100.0, 100.0), 20.0);
        spawner.activate(&mut body, Vector2::new(400.0, 500.0));

        assert!(body.active);
        assert!((body.vel.length() - 3.0).abs() < 1e-12);
        assert!((body.vel.x - 1.8).abs() < 1e-12);
        assert!((body.vel.y - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_activate_on_target_uses_fallback() {
        let spawner = scheduler();
        let mut body = Body::new(1, Vector2::new(300.0, 300.0), 20.0);
        spawner.activate(&mut body, Vector2::new(300.0, 300.0));
        assert!(body.active);
        assert_eq!(body.vel, Vector2::new(3.0, 0.0));
    }

    #[test]
    fn test_is_due_after_interval() {
        let mut spawner = scheduler();
        spawner.reset(10.0);
        assert!(!spawner.is_due(29.9));
        assert!(spawner.is_due(30.0));
    }
}
