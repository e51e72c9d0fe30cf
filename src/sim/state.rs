//! Game state and core simulation types
//!
//! A `GameState` is an immutable snapshot: the reducer builds a new one for
//! every action and nothing else writes to it.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{BrickConfig, GameConfig};

/// A 0xRRGGBB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Current phase of gameplay, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh run waiting for the start command
    NotStarted,
    /// Ball rides the paddle, waiting for launch
    Serving,
    /// Ball is free
    InPlay,
    /// Run is suspended
    Paused,
    /// Run ended, terminal until reset
    GameOver,
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
    pub color: Color,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: (config.canvas.width - config.paddle.width) / 2.0,
            y: config.paddle_y(),
            width: config.paddle.width,
            height: config.paddle.height,
            speed: config.paddle.speed,
            color: config.paddle.color,
        }
    }

    /// Horizontal centre
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Largest legal `x` on a canvas of the given width
    #[inline]
    pub fn max_x(&self, canvas_width: f32) -> f32 {
        (canvas_width - self.width).max(0.0)
    }

    /// Same paddle with `x` pulled back inside the canvas
    pub fn clamped(mut self, canvas_width: f32) -> Self {
        self.x = self.x.clamp(0.0, self.max_x(canvas_width));
        self
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
    /// Launch speed, also the floor for collision rescales
    pub speed: f32,
    pub color: Color,
}

impl Ball {
    /// A ball resting in serve position above the paddle
    pub fn serving(paddle: &Paddle, speed: f32, config: &GameConfig) -> Self {
        let radius = config.ball.radius;
        Self {
            x: paddle.center_x(),
            y: paddle.y - radius - 8.0,
            dx: 0.0,
            dy: 0.0,
            radius,
            speed,
            color: config.ball.color,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Only ever true on the copy reported with a destruction event
    pub hit: bool,
    /// Reward for destroying this brick
    pub points: u32,
}

impl Brick {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Build the brick grid for a level (the layout is the same on every level)
pub fn build_bricks(config: &GameConfig, _level: u32) -> Vec<Brick> {
    let layout = &config.bricks;
    let width = layout.brick_width(config.canvas.width);
    let rows = layout.rows.min(BrickConfig::MAX_GRID);
    let cols = layout.cols.min(BrickConfig::MAX_GRID);
    let mut bricks = Vec::with_capacity(rows as usize * cols as usize);

    for row in 0..rows {
        // Top row is worth the most
        let points = (rows - row).saturating_mul(layout.row_points);
        let color = layout
            .colors
            .get(row as usize % layout.colors.len().max(1))
            .copied()
            .unwrap_or(Color(0xffffff));
        for col in 0..cols {
            bricks.push(Brick {
                x: layout.side_padding + col as f32 * (width + layout.gap),
                y: layout.top_offset + row as f32 * (layout.height + layout.gap),
                width,
                height: layout.height,
                color,
                hit: false,
                points,
            });
        }
    }

    bricks
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Wider paddle for a while
    Bigger,
    /// Faster ball for a while
    Speed,
    /// One extra life
    Life,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Bigger, PowerUpKind::Speed, PowerUpKind::Life];

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Bigger => Color(0xff6b6b),
            PowerUpKind::Speed => Color(0x4ecdc4),
            PowerUpKind::Life => Color(0xff9ff3),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PowerUpKind::Bigger => "🔴",
            PowerUpKind::Speed => "⚡",
            PowerUpKind::Life => "❤️",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Bigger => "bigger",
            PowerUpKind::Speed => "speed",
            PowerUpKind::Life => "life",
        }
    }
}

/// A falling collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fall speed in pixels per tick
    pub speed: f32,
    pub kind: PowerUpKind,
    pub color: Color,
    pub icon: String,
}

impl PowerUp {
    /// A power-up box centred on `center`
    pub fn new(kind: PowerUpKind, center: Vec2, config: &GameConfig) -> Self {
        let width = config.power_ups.width;
        let height = config.power_ups.height;
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
            speed: config.power_ups.speed,
            kind,
            color: kind.color(),
            icon: kind.icon().to_string(),
        }
    }
}

/// A cosmetic particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Color,
    /// 0-1, removed at or below zero
    pub life: f32,
    pub decay: f32,
    pub size: f32,
}

/// Remaining ticks of the timed power-up effects (0 = inactive)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub bigger_ticks: u32,
    pub speed_ticks: u32,
}

impl ActiveEffects {
    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Bigger => self.bigger_ticks,
            PowerUpKind::Speed => self.speed_ticks,
            PowerUpKind::Life => 0,
        }
    }

    /// Set a timed effect's counter; `Life` has none
    pub fn restart(&mut self, kind: PowerUpKind, ticks: u32) {
        match kind {
            PowerUpKind::Bigger => self.bigger_ticks = ticks,
            PowerUpKind::Speed => self.speed_ticks = ticks,
            PowerUpKind::Life => {}
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    /// 1-based
    pub level: u32,
    pub high_score: u32,
    pub game_running: bool,
    pub game_paused: bool,
    pub ball_launched: bool,
    /// Simulation tick counter
    pub ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live bricks; destroyed bricks are removed
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub effects: ActiveEffects,
}

impl GameState {
    /// A fresh run that has not been started yet
    pub fn new(config: &GameConfig, high_score: u32) -> Self {
        let paddle = Paddle::new(config);
        let ball = Ball::serving(&paddle, config.level_speed(1), config);
        Self {
            score: 0,
            lives: config.starting_lives,
            level: 1,
            high_score,
            game_running: false,
            game_paused: false,
            ball_launched: false,
            ticks: 0,
            paddle,
            ball,
            bricks: build_bricks(config, 1),
            power_ups: Vec::new(),
            particles: Vec::new(),
            effects: ActiveEffects::default(),
        }
    }

    /// Phase of the progression state machine
    pub fn phase(&self) -> GamePhase {
        if !self.game_running {
            if self.lives == 0 {
                GamePhase::GameOver
            } else {
                GamePhase::NotStarted
            }
        } else if self.game_paused {
            GamePhase::Paused
        } else if self.ball_launched {
            GamePhase::InPlay
        } else {
            GamePhase::Serving
        }
    }
}
