//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - Stable iteration order (back to front over sequences)
//! - State changes only through `reduce`
//! - No rendering or platform dependencies

pub mod action;
pub mod collision;
pub mod dispatch;
pub mod effects;
pub mod events;
pub mod particles;
pub mod progression;
pub mod reducer;
pub mod state;
pub mod tick;

pub use action::{Action, BallPatch, PaddlePatch, ParticlePatch, PowerUpPatch, Target};
pub use collision::{CollisionResult, Rect, circle_rect_collision, clamp_speed};
pub use dispatch::{Dispatch, Reducer};
pub use events::GameEvent;
pub use reducer::reduce;
pub use state::{
    ActiveEffects, Ball, Brick, Color, GamePhase, GameState, Paddle, Particle, PowerUp,
    PowerUpKind, build_bricks,
};
pub use tick::tick;
