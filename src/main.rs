//! Balls entry point
//!
//! Runs one headless round with a scripted player that steers
//! away from the balls, logging events as they happen. Pass a settings JSON
//! path as the first argument to override the defaults.

mod headless {
    use balls::highscores::{JsonFileScoreStore, results_line};
    use balls::runner::FixedStepRunner;
    use balls::sim::{GamePhase, GameSession, LogSink, Vector2};
    use balls::Settings;

    /// Simulated display refresh
    const FRAME_DT: f64 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// How far the pilot may move the pointer per frame
    const PILOT_SPEED: f64 = 6.0;

    /// Pointer position a nervous player would pick: away from every active
    /// ball, weighted by closeness, with a pull back toward the middle
    fn evade(session: &GameSession) -> Vector2 {
        let me = session.player().pos;
        let center = session.bounds().center();

        let mut push = (center - me) * 0.002;
        for ball in session.bodies().iter().filter(|b| b.active) {
            let away = me - ball.pos;
            let dist_sq = away.length_squared().max(1.0);
            push += away / dist_sq * 100.0;
        }

        me + push.clamp_length_max(PILOT_SPEED)
    }

    fn load_settings() -> Result<Settings, balls::Error> {
        match std::env::args().nth(1) {
            Some(path) => Settings::load_from(path),
            None => Ok(Settings::default()),
        }
    }

    pub fn run() -> Result<(), balls::Error> {
        let settings = load_settings()?;
        let store = JsonFileScoreStore::new(std::env::temp_dir().join("balls_highscore.json"));
        let mut session = GameSession::new(settings, store)?;
        session.add_sink(LogSink);

        if let Some(best) = session.best_secs() {
            log::info!("Your best: {}", results_line(best, session.settings()));
        }

        let mut runner = FixedStepRunner::new(session.settings().tick_rate_hz);
        session.request_start();

        let mut frames = 0;
        while session.phase() != GamePhase::Ended && frames < MAX_FRAMES {
            let target = evade(&session);
            session.set_player_position(target.x, target.y);
            runner.advance(&mut session, FRAME_DT);
            frames += 1;
        }

        if session.phase() != GamePhase::Ended {
            log::warn!("Stopped after {} frames without the round ending", frames);
        }

        let survived = session.survival_secs().floor() as u64;
        println!("Game over! {}", results_line(survived, session.settings()));
        if let Some(best) = session.best_secs() {
            println!("Your best: {}", results_line(best, session.settings()));
        }
        Ok(())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Balls (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
