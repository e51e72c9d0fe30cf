//! Game configuration
//!
//! Every gameplay constant lives here. Defaults match the classic 800x600
//! layout; a JSON file can override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::state::Color;

/// Errors raised while reading or writing ambient files (config, high scores)
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Well-formed config with a value the simulation cannot run with
    Invalid(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Parse(err) => write!(f, "invalid json: {err}"),
            Self::Invalid(what) => write!(f, "invalid config: {what}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
    /// Distance from the paddle top to the canvas bottom
    pub bottom_offset: f32,
    /// Absolute width cap for the `Bigger` power-up
    pub max_width: f32,
    pub color: Color,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 15.0,
            speed: 8.0,
            bottom_offset: 30.0,
            max_width: 200.0,
            color: Color(0x00ffff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Serve speed, also the lower bound after a collision rescale
    pub speed: f32,
    pub max_speed: f32,
    /// Speed added on every level advance
    pub level_speed_step: f32,
    /// Launch `dx` is drawn from `[-launch_spread, launch_spread)`
    pub launch_spread: f32,
    /// Horizontal speed at the very edge of the paddle
    pub paddle_deflection: f32,
    pub color: Color,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            speed: 5.0,
            max_speed: 8.0,
            level_speed_step: 0.5,
            launch_spread: 2.0,
            paddle_deflection: 4.0,
            color: Color(0xff6b6b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: u32,
    pub cols: u32,
    pub height: f32,
    pub gap: f32,
    /// Horizontal margin on each side of the grid
    pub side_padding: f32,
    pub top_offset: f32,
    /// Points for the bottom row; each row above adds the same amount again
    pub row_points: u32,
    pub colors: Vec<Color>,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 10,
            height: 25.0,
            gap: 2.0,
            side_padding: 20.0,
            top_offset: 50.0,
            row_points: 10,
            colors: vec![
                Color(0xff6b6b),
                Color(0x4ecdc4),
                Color(0x45b7d1),
                Color(0x96ceb4),
                Color(0xfeca57),
                Color(0xff9ff3),
            ],
        }
    }
}

impl BrickConfig {
    /// Largest accepted row or column count
    pub const MAX_GRID: u32 = 100;

    /// Brick width that fits `cols` bricks between the side paddings
    pub fn brick_width(&self, canvas_width: f32) -> f32 {
        let usable = canvas_width - self.side_padding * 2.0;
        let cols = self.cols.clamp(1, Self::MAX_GRID) as f32;
        ((usable - (cols - 1.0) * self.gap) / cols).floor()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub width: f32,
    pub height: f32,
    /// Fall speed in pixels per tick
    pub speed: f32,
    /// Chance that a destroyed brick drops a power-up
    pub drop_chance: f64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 30.0,
            speed: 2.0,
            drop_chance: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub batch_size: usize,
    pub decay: f32,
    pub damping: f32,
    /// Maximum initial speed along each axis
    pub spread: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub max_particles: usize,
    pub paddle_color: Color,
    pub pickup_color: Color,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            batch_size: 8,
            decay: 0.02,
            damping: 0.98,
            spread: 5.0,
            min_size: 2.0,
            max_size: 6.0,
            max_particles: 256,
            paddle_color: Color(0x00ffff),
            pickup_color: Color(0xffd700),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub multiplier: f32,
    /// `Bigger` duration in ticks (10 s)
    pub bigger_ticks: u32,
    /// `Speed` duration in ticks (8 s)
    pub speed_ticks: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            multiplier: 1.5,
            bigger_ticks: crate::ms_to_ticks(10_000),
            speed_ticks: crate::ms_to_ticks(8_000),
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub power_ups: PowerUpConfig,
    pub particles: ParticleConfig,
    pub effects: EffectConfig,
    /// Lives at the start of a run
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            power_ups: PowerUpConfig::default(),
            particles: ParticleConfig::default(),
            effects: EffectConfig::default(),
            starting_lives: 3,
        }
    }
}

impl GameConfig {
    /// Paddle top edge
    pub fn paddle_y(&self) -> f32 {
        self.canvas.height - self.paddle.bottom_offset
    }

    /// Ball speed for a level, before any power-up
    pub fn level_speed(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.ball.speed + self.ball.level_speed_step * steps).min(self.ball.max_speed)
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), StoreError> {
        fn check(ok: bool, what: &str) -> Result<(), StoreError> {
            if ok {
                Ok(())
            } else {
                Err(StoreError::Invalid(what.to_string()))
            }
        }
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        check(positive(self.canvas.width), "canvas.width must be > 0")?;
        check(positive(self.canvas.height), "canvas.height must be > 0")?;

        let paddle = &self.paddle;
        check(positive(paddle.width), "paddle.width must be > 0")?;
        check(positive(paddle.height), "paddle.height must be > 0")?;
        check(non_negative(paddle.speed), "paddle.speed must be >= 0")?;
        check(non_negative(paddle.bottom_offset), "paddle.bottom_offset must be >= 0")?;
        check(
            paddle.max_width.is_finite() && paddle.max_width >= paddle.width,
            "paddle.max_width must be >= paddle.width",
        )?;

        let ball = &self.ball;
        check(positive(ball.radius), "ball.radius must be > 0")?;
        check(positive(ball.speed), "ball.speed must be > 0")?;
        check(
            ball.max_speed.is_finite() && ball.max_speed >= ball.speed,
            "ball.max_speed must be >= ball.speed",
        )?;
        check(non_negative(ball.level_speed_step), "ball.level_speed_step must be >= 0")?;
        check(non_negative(ball.launch_spread), "ball.launch_spread must be >= 0")?;
        check(non_negative(ball.paddle_deflection), "ball.paddle_deflection must be >= 0")?;

        let bricks = &self.bricks;
        check(
            (1..=BrickConfig::MAX_GRID).contains(&bricks.rows),
            "bricks.rows must be between 1 and 100",
        )?;
        check(
            (1..=BrickConfig::MAX_GRID).contains(&bricks.cols),
            "bricks.cols must be between 1 and 100",
        )?;
        check(
            bricks.rows.checked_mul(bricks.row_points).is_some(),
            "bricks.row_points overflows the top row value",
        )?;
        check(positive(bricks.height), "bricks.height must be > 0")?;
        check(non_negative(bricks.gap), "bricks.gap must be >= 0")?;
        check(non_negative(bricks.side_padding), "bricks.side_padding must be >= 0")?;
        check(non_negative(bricks.top_offset), "bricks.top_offset must be >= 0")?;
        check(
            positive(bricks.brick_width(self.canvas.width)),
            "brick grid does not fit the canvas",
        )?;

        let power_ups = &self.power_ups;
        check(positive(power_ups.width), "power_ups.width must be > 0")?;
        check(positive(power_ups.height), "power_ups.height must be > 0")?;
        check(non_negative(power_ups.speed), "power_ups.speed must be >= 0")?;
        check(
            (0.0..=1.0).contains(&power_ups.drop_chance),
            "power_ups.drop_chance must be within [0, 1]",
        )?;

        let particles = &self.particles;
        check(positive(particles.decay), "particles.decay must be > 0")?;
        check(
            (0.0..=1.0).contains(&particles.damping),
            "particles.damping must be within [0, 1]",
        )?;
        check(non_negative(particles.spread), "particles.spread must be >= 0")?;
        check(non_negative(particles.min_size), "particles.min_size must be >= 0")?;
        check(
            particles.max_size.is_finite() && particles.max_size >= particles.min_size,
            "particles.max_size must be >= particles.min_size",
        )?;

        check(positive(self.effects.multiplier), "effects.multiplier must be > 0")?;
        check(self.starting_lives >= 1, "starting_lives must be >= 1")
    }

    /// Load a config file, falling back to defaults when it is missing or invalid
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(StoreError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config ({}: {err})", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_constants() {
        let config = GameConfig::default();
        assert_eq!(config.canvas.width, 800.0);
        assert_eq!(config.canvas.height, 600.0);
        assert_eq!(config.paddle_y(), 570.0);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.effects.bigger_ticks, 600);
        assert_eq!(config.effects.speed_ticks, 480);
    }

    #[test]
    fn test_brick_grid_fits_canvas() {
        let config = GameConfig::default();
        let width = config.bricks.brick_width(config.canvas.width);
        assert_eq!(width, 74.0);
        let right = config.bricks.side_padding
            + config.bricks.cols as f32 * (width + config.bricks.gap)
            - config.bricks.gap;
        assert!(right <= config.canvas.width);
    }

    #[test]
    fn test_level_speed_is_capped() {
        let config = GameConfig::default();
        assert_eq!(config.level_speed(1), 5.0);
        assert_eq!(config.level_speed(3), 6.0);
        assert_eq!(config.level_speed(50), config.ball.max_speed);
    }

    #[test]
    fn test_partial_json_override() {
        let config = GameConfig::from_json(r#"{ "ball": { "max_speed": 10.0 } }"#).unwrap();
        assert_eq!(config.ball.max_speed, 10.0);
        assert_eq!(config.ball.radius, 12.0);
        assert_eq!(config.starting_lives, 3);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_launch_spread_is_rejected() {
        let err = GameConfig::from_json(r#"{ "ball": { "launch_spread": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(ref what) if what.contains("launch_spread")));
    }

    #[test]
    fn test_max_speed_below_speed_is_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "ball": { "max_speed": -8.0 } }"#),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn test_huge_brick_grid_is_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "bricks": { "rows": 70000, "cols": 70000 } }"#),
            Err(StoreError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "bricks": { "row_points": 4294967295 } }"#),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn test_nan_drop_chance_is_rejected() {
        let mut config = GameConfig::default();
        config.power_ups.drop_chance = f64::NAN;
        assert!(matches!(config.validate(), Err(StoreError::Invalid(_))));
        config.power_ups.drop_chance = 1.5;
        assert!(matches!(config.validate(), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn test_load_invalid_values_falls_back() {
        let path = std::env::temp_dir().join(format!(
            "brick-breaker-{}-bad-config.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "ball": { "launch_spread": -1.0 } }"#).unwrap();
        let config = GameConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = GameConfig::load(Path::new("/definitely/not/here.json"));
        assert_eq!(config, GameConfig::default());
    }
}
