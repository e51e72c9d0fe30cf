//! The seam between the resolver and the reducer
//!
//! The resolver only ever reads the latest snapshot and dispatches actions;
//! whoever implements `Dispatch` owns the state and runs the reducer.

use std::sync::Arc;

use super::action::Action;
use super::reducer::reduce;
use super::state::GameState;
use crate::config::GameConfig;

/// Owner of the action stream
pub trait Dispatch {
    /// Latest snapshot
    fn state(&self) -> &GameState;
    /// Shared, so the resolver can hold it across dispatches without a deep copy
    fn config(&self) -> &Arc<GameConfig>;
    /// Feed one action through the reducer, replacing the snapshot
    fn dispatch(&mut self, action: Action);
}

/// Minimal dispatcher: a snapshot and the config, nothing else
#[derive(Debug, Clone)]
pub struct Reducer {
    config: Arc<GameConfig>,
    state: GameState,
}

impl Reducer {
    pub fn new(config: impl Into<Arc<GameConfig>>, state: GameState) -> Self {
        Self {
            config: config.into(),
            state,
        }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}

impl Dispatch for Reducer {
    fn state(&self) -> &GameState {
        &self.state
    }

    fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, &action, &self.config);
    }
}
