//! Gameplay events reported by a tick
//!
//! Events describe what happened; they never change state. Hosts use them for
//! logging, sound and HUD effects.

use serde::{Deserialize, Serialize};

use super::state::{Brick, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Launched,
    Paused,
    Resumed,
    /// Run reset to a fresh, unstarted state
    Reset,
    WallBounce,
    PaddleHit,
    /// `brick` is the removed brick, flagged as hit
    BrickDestroyed { index: usize, brick: Brick },
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    /// Fell off the bottom of the canvas
    PowerUpMissed(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    BallLost { lives_left: u32 },
    /// Bricks cleared; `level` is the level now being served
    LevelComplete { level: u32 },
    GameOver { score: u32 },
    NewHighScore(u32),
}
