//! Brick Breaker - a deterministic Breakout simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state, reducer, collisions, power-ups, particles)
//! - `config`: Data-driven game constants, loadable from JSON
//! - `input`: Key state to input intent mapping
//! - `highscores`: High score persistence adapters
//! - `game`: Single-writer dispatcher and fixed-timestep frame driver

pub mod config;
pub mod game;
pub mod highscores;
pub mod input;
pub mod sim;

pub use config::GameConfig;
pub use game::{FrameRequest, Game, Renderer};
pub use highscores::{HighScoreStore, MemoryStore};
#[cfg(not(target_arch = "wasm32"))]
pub use highscores::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use highscores::LocalStorageStore;
pub use input::{InputIntent, InputMapper, Key};

/// Frame driver constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
}

/// Convert a duration in milliseconds to whole simulation ticks
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    (ms as u64 * consts::TICKS_PER_SECOND as u64 / 1000) as u32
}
