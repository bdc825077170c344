//! Fixed timestep driver
//!
//! Frame loops hand over however much wall-clock time passed; the runner
//! turns it into whole simulation ticks and carries the remainder forward.

use crate::consts::MAX_SUBSTEPS;
use crate::sim::GameSession;

/// Longest frame delta accepted (a stalled tab or debugger pause)
pub const MAX_FRAME_DT: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepRunner {
    step: f64,
    accumulator: f64,
}

impl FixedStepRunner {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            step: 1.0 / tick_rate_hz.max(1) as f64,
            accumulator: 0.0,
        }
    }

    /// Run as many ticks as `frame_dt` seconds cover, at most `MAX_SUBSTEPS`
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, session: &mut GameSession, frame_dt: f64) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            session.tick();
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }
}
