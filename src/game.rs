//! Game instance and frame driver
//!
//! `Game` is the single writer: it owns the snapshot, the RNG and the high
//! score store, runs the resolver at a fixed 60 Hz and hands each frame's
//! snapshot to an optional renderer.

use std::sync::Arc;

use log::{info, trace};
use rand::Rng;

use crate::config::GameConfig;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScoreStore;
use crate::input::{InputIntent, InputMapper, Key};
use crate::sim::action::Action;
use crate::sim::dispatch::Dispatch;
use crate::sim::events::GameEvent;
use crate::sim::reducer::reduce;
use crate::sim::state::GameState;
use crate::sim::tick::tick;

/// Longest frame the driver will try to catch up on
const MAX_FRAME_DT: f32 = 0.1;

/// Draws snapshots; never mutates them
pub trait Renderer {
    fn render(&mut self, snapshot: &GameState);
}

/// Whether the host should schedule another animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameRequest {
    #[default]
    Scheduled,
    /// Loop stopped while paused; the next pause key press restarts it
    Cancelled,
}

/// State, config and store behind the `Dispatch` seam
///
/// Persists the high score whenever an action raises it.
#[derive(Debug)]
pub struct Dispatcher<S> {
    config: Arc<GameConfig>,
    state: GameState,
    store: S,
    /// New high scores seen since the last drain
    records: Vec<u32>,
}

impl<S: HighScoreStore> Dispatcher<S> {
    pub fn new(config: impl Into<Arc<GameConfig>>, state: GameState, store: S) -> Self {
        Self {
            config: config.into(),
            state,
            store,
            records: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn drain_records(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.records.drain(..).map(GameEvent::NewHighScore)
    }
}

impl<S: HighScoreStore> Dispatch for Dispatcher<S> {
    fn state(&self) -> &GameState {
        &self.state
    }

    fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    fn dispatch(&mut self, action: Action) {
        trace!("dispatch {}", action.name());
        let previous = self.state.high_score;
        self.state = reduce(&self.state, &action, &self.config);

        let high_score = self.state.high_score;
        if high_score > previous {
            info!("New high score: {high_score}");
            self.store.set_high_score(high_score);
            self.records.push(high_score);
        }
    }
}

/// Game instance holding all state
pub struct Game<R, S> {
    core: Dispatcher<S>,
    rng: R,
    accumulator: f32,
    keys: InputMapper,
    /// Input for the next tick; commands are cleared once consumed
    pending: InputIntent,
    frame: FrameRequest,
}

impl<R: Rng, S: HighScoreStore> Game<R, S> {
    /// Fresh, unstarted game seeded with the stored high score
    pub fn new(config: GameConfig, store: S, rng: R) -> Self {
        let state = GameState::new(&config, store.high_score());
        Self::from_snapshot(config, state, store, rng)
    }

    /// Resume from a saved snapshot
    pub fn from_snapshot(config: GameConfig, state: GameState, store: S, rng: R) -> Self {
        Self {
            core: Dispatcher::new(config, state, store),
            rng,
            accumulator: 0.0,
            keys: InputMapper::new(),
            pending: InputIntent::default(),
            frame: FrameRequest::Scheduled,
        }
    }

    pub fn state(&self) -> &GameState {
        self.core.state()
    }

    pub fn config(&self) -> &GameConfig {
        self.core.config()
    }

    pub fn store(&self) -> &S {
        self.core.store()
    }

    pub fn frame_request(&self) -> FrameRequest {
        self.frame
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.key_down(key);
        if key == Key::Pause && self.frame == FrameRequest::Cancelled {
            // Resume needs a frame to be processed in
            self.frame = FrameRequest::Scheduled;
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.key_up(key);
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self, input: &InputIntent) -> Vec<GameEvent> {
        let mut events = tick(&mut self.core, input, &mut self.rng);
        events.extend(self.core.drain_records());
        events
    }

    /// Advance by a frame's worth of wall time and render the result
    pub fn update(&mut self, dt: f32, renderer: Option<&mut dyn Renderer>) -> Vec<GameEvent> {
        let sampled = self.keys.sample();
        self.pending = InputIntent {
            left: sampled.left,
            right: sampled.right,
            action: self.pending.action || sampled.action,
            pause: self.pending.pause || sampled.pause,
        };

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pending;
            events.extend(self.step(&input));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = self.pending.held_only();
        }

        if let Some(renderer) = renderer {
            renderer.render(self.core.state());
        }

        self.frame = if self.core.state().game_paused {
            FrameRequest::Cancelled
        } else {
            FrameRequest::Scheduled
        };

        events
    }
}
