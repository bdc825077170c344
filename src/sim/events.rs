//! Events emitted by the simulation for audio, rendering and score keeping.
//!
//! Collaborators implement `EventSink` and are invoked synchronously while
//! the session ticks. Override `on_event` to see everything, or just the
//! hooks you care about.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::bounds::Wall;
use super::state::GamePhase;
use super::vector::Vector2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Two bodies were resolved against each other.
    Collide { a: u32, b: u32 },
    /// A body bounced off an arena wall.
    WallBounce { id: u32, wall: Wall },
    /// A ball appeared and started its warm-up.
    BallSpawned { id: u32, pos: Vector2 },
    /// A ball finished warm-up and was launched toward `target`.
    BallActivated {
        id: u32,
        pos: Vector2,
        vel: Vector2,
        target: Vector2,
    },
    /// The session moved to another phase.
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Every body left the arena; the round is over.
    RoundEnded { survival_secs: u64, ball_count: u64 },
    /// The round beat the stored best survival time.
    NewHighScore { survival_secs: u64 },
}

/// Observer for simulation events
pub trait EventSink {
    /// Called for every event; the default forwards to the typed hooks
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Collide { a, b } => self.on_collide(a, b),
            GameEvent::WallBounce { id, wall } => self.on_wall_bounce(id, wall),
            GameEvent::BallSpawned { id, .. } => self.on_ball_spawned(id),
            GameEvent::BallActivated { id, .. } => self.on_ball_activated(id),
            GameEvent::PhaseChanged { from, to } => self.on_phase_changed(from, to),
            GameEvent::RoundEnded {
                survival_secs,
                ball_count,
            } => self.on_round_ended(survival_secs, ball_count),
            GameEvent::NewHighScore { survival_secs } => self.on_new_high_score(survival_secs),
        }
    }

    fn on_collide(&mut self, _a: u32, _b: u32) {}
    fn on_wall_bounce(&mut self, _id: u32, _wall: Wall) {}
    fn on_ball_spawned(&mut self, _id: u32) {}
    fn on_ball_activated(&mut self, _id: u32) {}
    fn on_phase_changed(&mut self, _from: GamePhase, _to: GamePhase) {}
    fn on_round_ended(&mut self, _survival_secs: u64, _ball_count: u64) {}
    fn on_new_high_score(&mut self, _survival_secs: u64) {}
}

/// Share one sink between the session and its owner
impl<S: EventSink + ?Sized> EventSink for Rc<RefCell<S>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().on_event(event);
    }
}

/// Keeps every event it sees, in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Writes events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Collide { .. } | GameEvent::WallBounce { .. } => {
                log::trace!("{:?}", event)
            }
            GameEvent::BallSpawned { .. } | GameEvent::BallActivated { .. } => {
                log::debug!("{:?}", event)
            }
            GameEvent::PhaseChanged { from, to } => log::info!("Phase {:?} -> {:?}", from, to),
            GameEvent::RoundEnded {
                survival_secs,
                ball_count,
            } => log::info!(
                "Round over: survived {}s against {} balls",
                survival_secs,
                ball_count
            ),
            GameEvent::NewHighScore { survival_secs } => {
                log::info!("New high score: {}s", survival_secs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sounds {
        collide: u32,
        wall: u32,
    }

    impl EventSink for Sounds {
        fn on_collide(&mut self, _a: u32, _b: u32) {
            self.collide += 1;
        }

        fn on_wall_bounce(&mut self, _id: u32, _wall: Wall) {
            self.wall += 1;
        }
    }

    #[test]
    fn test_default_on_event_dispatches_to_hooks() {
        let mut sounds = Sounds::default();
        sounds.on_event(&GameEvent::Collide { a: 1, b: 2 });
        sounds.on_event(&GameEvent::WallBounce {
            id: 1,
            wall: Wall::Left,
        });
        sounds.on_event(&GameEvent::NewHighScore { survival_secs: 9 });
        assert_eq!(sounds.collide, 1);
        assert_eq!(sounds.wall, 1);
    }

    #[test]
    fn test_shared_log() {
        let log = Rc::new(RefCell::new(EventLog::new()));
        let mut sink: Box<dyn EventSink> = Box::new(log.clone());
        sink.on_event(&GameEvent::Collide { a: 3, b: 4 });

        assert_eq!(log.borrow().events, vec![GameEvent::Collide { a: 3, b: 4 }]);
        assert_eq!(log.borrow_mut().drain().len(), 1);
        assert!(log.borrow().events.is_empty());
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_string(&GameEvent::RoundEnded {
            survival_secs: 45,
            ball_count: 6,
        })
        .expect("serialize");
        assert!(json.contains(r#""type":"RoundEnded""#));
    }
}
