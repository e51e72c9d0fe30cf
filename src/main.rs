//! Brick Breaker entry point
//!
//! Native builds run a headless demo: an autopilot plays one run, events are
//! logged and the final snapshot is printed as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use brick_breaker::config::StoreError;
    use brick_breaker::consts::SIM_DT;
    use brick_breaker::highscores::JsonFileStore;
    use brick_breaker::sim::{GameEvent, GamePhase, GameState};
    use brick_breaker::{Game, GameConfig, HighScoreStore, Key, Renderer};
    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    #[derive(Parser, Debug)]
    #[command(name = "brick-breaker")]
    #[command(about = "Headless Breakout run driven by a simple autopilot")]
    struct Cli {
        /// RNG seed for launch angles, power-up drops and particles
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stop after this many frames even if the run is still going
        #[arg(long, default_value_t = 36_000)]
        max_frames: u64,
        /// JSON config overriding the default constants
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where the high score is kept between runs
        #[arg(long, default_value = "highscore.json")]
        highscore_file: PathBuf,
        /// Write the final snapshot here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    }

    /// Logs a one-line HUD every few seconds of game time
    struct LogRenderer {
        every: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, snapshot: &GameState) {
            if snapshot.ticks > 0 && snapshot.ticks % self.every == 0 {
                log::debug!(
                    "tick {}: score {} lives {} level {} bricks {} particles {}",
                    snapshot.ticks,
                    snapshot.score,
                    snapshot.lives,
                    snapshot.level,
                    snapshot.bricks.len(),
                    snapshot.particles.len()
                );
            }
        }
    }

    /// Steers the paddle under the ball and serves whenever it can
    #[derive(Default)]
    struct Autopilot {
        held: Option<Key>,
    }

    impl Autopilot {
        fn drive<R: Rng, S: HighScoreStore>(&mut self, game: &mut Game<R, S>) {
            let state = game.state();
            let paddle = &state.paddle;
            let offset = state.ball.x - paddle.center_x();

            let want = if offset > paddle.speed {
                Some(Key::Right)
            } else if offset < -paddle.speed {
                Some(Key::Left)
            } else {
                None
            };
            let serve = matches!(state.phase(), GamePhase::NotStarted | GamePhase::Serving);

            if want != self.held {
                if let Some(key) = self.held {
                    game.key_up(key);
                }
                if let Some(key) = want {
                    game.key_down(key);
                }
                self.held = want;
            }
            if serve {
                game.key_down(Key::Action);
            }
        }
    }

    pub fn run() -> Result<(), StoreError> {
        let cli = Cli::parse();

        let config = match &cli.config {
            Some(path) => GameConfig::load(path),
            None => GameConfig::default(),
        };
        let store = JsonFileStore::open(&cli.highscore_file);
        let rng = Pcg32::seed_from_u64(cli.seed);
        let mut game = Game::new(config, store, rng);
        let mut renderer = LogRenderer { every: 600 };
        let mut pilot = Autopilot::default();

        log::info!("Brick Breaker (headless) starting, seed {}", cli.seed);

        for _ in 0..cli.max_frames {
            pilot.drive(&mut game);
            for event in game.update(SIM_DT, Some(&mut renderer)) {
                match event {
                    GameEvent::BrickDestroyed { index, brick } => {
                        log::debug!("Brick {index} destroyed (+{})", brick.points)
                    }
                    GameEvent::BallLost { lives_left } => {
                        log::info!("Ball lost, {lives_left} lives left")
                    }
                    other => log::trace!("{other:?}"),
                }
            }
            if game.state().phase() == GamePhase::GameOver {
                break;
            }
        }

        let state = game.state();
        log::info!(
            "Finished after {} ticks: score {}, level {}, high score {}",
            state.ticks,
            state.score,
            state.level,
            state.high_score
        );

        let json = serde_json::to_string_pretty(state)?;
        match &cli.output {
            Some(path) => std::fs::write(path, json)?,
            None => println!("{json}"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = headless::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts drive `brick_breaker::Game` directly
}
