//! Game session: owns every body and advances the round one tick at a time
//!
//! Phases run `Menu -> Playing -> Ending -> Ended -> Playing -> ...`. The
//! clock is the tick counter divided by the tick rate, so warm-up, spawn
//! interval and survival time do not depend on how fast a driver calls
//! `tick()`, while per-tick velocities do.

use super::body::{Body, PLAYER_ID};
use super::bounds::ArenaBounds;
use super::collision::{self, pair_mut, should_resolve};
use super::events::{EventSink, GameEvent};
use super::spawn::SpawnScheduler;
use super::state::{BodyView, GamePhase, Snapshot};
use super::timers::{TimerAction, TimerQueue};
use super::vector::Vector2;
use crate::error::Result;
use crate::highscores::{HighScore, ScoreStore, ball_count_for};
use crate::settings::Settings;

pub struct GameSession {
    settings: Settings,
    bounds: ArenaBounds,
    phase: GamePhase,
    /// Ticks since construction
    ticks: u64,
    /// Balls in play; the player joins once it has been hit
    bodies: Vec<Body>,
    /// Player while it is steered; stale once it joins `bodies`
    player: Body,
    spawner: SpawnScheduler,
    timers: TimerQueue,
    /// Clock time survival is measured from (start plus warm-up)
    round_start: f64,
    /// Seconds survived in the current or last round
    survival: f64,
    best: Option<HighScore>,
    scores: Box<dyn ScoreStore>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl GameSession {
    /// Create a session in the menu phase
    ///
    /// Fails with `InvalidConfiguration` before anything is simulated if
    /// the settings cannot produce a playable arena.
    pub fn new(settings: Settings, scores: impl ScoreStore + 'static) -> Result<Self> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        let bounds = ArenaBounds::new(settings.arena_width, settings.arena_height);
        let player = Body::new(PLAYER_ID, bounds.center(), settings.player_radius);
        let best = scores.load();

        log::info!(
            "Session created: {}x{} arena, seed {}",
            bounds.width,
            bounds.height,
            seed
        );

        Ok(Self {
            spawner: SpawnScheduler::new(&settings, seed),
            settings,
            bounds,
            phase: GamePhase::Menu,
            ticks: 0,
            bodies: Vec::new(),
            player,
            timers: TimerQueue::new(),
            round_start: 0.0,
            survival: 0.0,
            best,
            scores: Box::new(scores),
            sinks: Vec::new(),
        })
    }

    /// Register an observer for simulation events
    pub fn add_sink(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    /// Session clock in seconds
    pub fn now(&self) -> f64 {
        self.ticks as f64 / self.settings.tick_rate_hz as f64
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Bodies in the arena (includes the player while the round is ending)
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn player(&self) -> &Body {
        self.bodies
            .iter()
            .find(|b| b.is_player())
            .unwrap_or(&self.player)
    }

    /// Balls currently in the arena, not counting the player
    pub fn ball_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_player()).count()
    }

    /// Seconds survived: live while playing, final once hit
    pub fn survival_secs(&self) -> f64 {
        match self.phase {
            GamePhase::Playing => (self.now() - self.round_start).max(0.0),
            _ => self.survival,
        }
    }

    pub fn best_secs(&self) -> Option<u64> {
        self.best.map(|h| h.seconds)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            time: self.now(),
            bodies: self.bodies.iter().map(BodyView::from).collect(),
            player: BodyView::from(self.player()),
            survival_secs: self.survival_secs().floor() as u64,
            best_secs: self.best_secs(),
        }
    }

    // === Commands ===

    /// Begin a new round from the menu or results screen
    ///
    /// Returns false (and does nothing) while a round is in progress.
    pub fn request_start(&mut self) -> bool {
        if !self.phase.can_start() {
            log::debug!("Start ignored in {:?}", self.phase);
            return false;
        }

        let now = self.now();
        self.bodies.clear();
        self.timers.clear();

        self.player.pos = self.bounds.clamp_inside(self.player.pos, self.player.radius);
        self.player.vel = Vector2::ZERO;
        self.player.colliding = false;
        self.player.active = true;

        self.round_start = now + self.settings.spawn_warmup_secs;
        self.survival = 0.0;
        self.spawner.reset(now);

        self.set_phase(GamePhase::Playing);
        for _ in 0..self.settings.ball_count_initial {
            self.spawn_ball();
        }
        true
    }

    /// Move the player, keeping it fully inside the arena
    ///
    /// Only honoured while playing.
    pub fn set_player_position(&mut self, x: f64, y: f64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.player.pos = self
            .bounds
            .clamp_inside(Vector2::new(x, y), self.player.radius);
    }

    /// Advance the simulation by one tick
    ///
    /// Due timers fire first, then all collisions are resolved, then bodies
    /// move, then spawning and end-of-round checks run.
    pub fn tick(&mut self) {
        self.ticks += 1;
        let now = self.now();
        self.fire_timers(now);

        match self.phase {
            GamePhase::Menu | GamePhase::Ended => {}
            GamePhase::Playing | GamePhase::Ending => {
                self.resolve_interactions(now);
                self.apply_movement();
                self.check_progress(now);
            }
        }
    }

    /// Tick for `seconds` of simulated time
    pub fn run_for(&mut self, seconds: f64) {
        let ticks = (seconds / self.settings.tick_dt()).round() as u64;
        for _ in 0..ticks {
            self.tick();
        }
    }

    // === Tick phases ===

    fn fire_timers(&mut self, now: f64) {
        while let Some(action) = self.timers.pop_due(now) {
            match action {
                TimerAction::ActivateBall { id } => self.activate_ball(id),
            }
        }
    }

    fn activate_ball(&mut self, id: u32) {
        let target = self.player().pos;
        let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) else {
            log::trace!("Activation for missing ball {}", id);
            return;
        };
        self.spawner.activate(body, target);
        let event = GameEvent::BallActivated {
            id,
            pos: body.pos,
            vel: body.vel,
            target,
        };
        self.emit(event);
    }

    fn resolve_interactions(&mut self, now: f64) {
        // The player may be appended mid-pass; it is visited like any other body
        let mut i = 0;
        while i < self.bodies.len() {
            if self.phase == GamePhase::Playing && self.bodies[i].is_colliding_with(&self.player) {
                self.strike_player(i, now);
            }

            let floor_enabled = self.phase == GamePhase::Playing;
            if let Some(wall) = self.bounds.bounce(&mut self.bodies[i], floor_enabled) {
                let id = self.bodies[i].id;
                self.emit(GameEvent::WallBounce { id, wall });
            }

            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if should_resolve(a, b) {
                    let contact = collision::resolve(a, b);
                    self.emit(GameEvent::Collide {
                        a: contact.a,
                        b: contact.b,
                    });
                }
            }

            i += 1;
        }
    }

    /// Ball at `index` hit the player: the round starts ending
    fn strike_player(&mut self, index: usize, now: f64) {
        let ball = &mut self.bodies[index];
        self.player.vel = -ball.vel;
        let contact = collision::resolve(ball, &mut self.player);
        self.emit(GameEvent::Collide {
            a: contact.a,
            b: contact.b,
        });

        self.survival = (now - self.round_start).max(0.0);
        log::info!("Player hit after {:.2}s", self.survival);

        self.bodies.push(self.player.clone());
        self.set_phase(GamePhase::Ending);
    }

    fn apply_movement(&mut self) {
        let gravity = match self.phase {
            GamePhase::Ending => self.settings.gravity_increment,
            _ => 0.0,
        };
        for body in &mut self.bodies {
            body.colliding = false;
            body.vel.y += gravity;
            body.move_one_step();
        }
        self.player.colliding = false;
    }

    fn check_progress(&mut self, now: f64) {
        match self.phase {
            GamePhase::Playing => {
                if self.spawner.is_due(now) {
                    self.spawn_ball();
                }
            }
            GamePhase::Ending => {
                let floor = self.bounds.height + self.settings.exit_depth;
                if self.bodies.iter().all(|b| b.pos.y >= floor) {
                    self.finish_round();
                }
            }
            GamePhase::Menu | GamePhase::Ended => {}
        }
    }

    fn spawn_ball(&mut self) {
        let now = self.now();
        let index = self
            .spawner
            .spawn(now, &self.bounds, &mut self.bodies, &mut self.timers);
        let body = &self.bodies[index];
        let event = GameEvent::BallSpawned {
            id: body.id,
            pos: body.pos,
        };
        self.emit(event);
    }

    fn finish_round(&mut self) {
        if let Some(index) = self.bodies.iter().position(|b| b.is_player()) {
            self.player = self.bodies.swap_remove(index);
            self.player.colliding = false;
        }
        let ball_count = self.bodies.len() as u64;
        self.bodies.clear();
        self.timers.clear();

        let seconds = self.survival.floor() as u64;
        self.set_phase(GamePhase::Ended);

        if self.best.unwrap_or_default().beaten_by(seconds) {
            let score = HighScore { seconds };
            self.scores.save(score);
            self.best = Some(score);
            self.emit(GameEvent::NewHighScore {
                survival_secs: seconds,
            });
        }

        log::debug!("{} balls were still in the arena", ball_count);
        self.emit(GameEvent::RoundEnded {
            survival_secs: seconds,
            ball_count: ball_count_for(seconds, &self.settings),
        });
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    fn emit(&mut self, event: GameEvent) {
        for sink in &mut self.sinks {
            sink.on_event(&event);
        }
    }
}
