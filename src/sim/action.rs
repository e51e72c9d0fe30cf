//! Action catalog
//!
//! An action is an intent record consumed exactly once by the reducer.
//! Components never edit state fields directly; they dispatch one of these.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Color, Paddle, Particle, PowerUp, PowerUpKind};

/// Which entries of a sequence an update applies to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A single entry; out-of-range indices match nothing
    Index(usize),
    /// Every entry sitting exactly at this position
    At { x: f32, y: f32 },
    /// Every entry
    All,
}

impl Target {
    fn matches(&self, index: usize, x: f32, y: f32) -> bool {
        match *self {
            Target::Index(i) => i == index,
            Target::At { x: tx, y: ty } => tx == x && ty == y,
            Target::All => true,
        }
    }
}

/// Partial update for the paddle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaddlePatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub speed: Option<f32>,
    pub color: Option<Color>,
}

impl PaddlePatch {
    pub fn x(x: f32) -> Self {
        Self {
            x: Some(x),
            ..Self::default()
        }
    }

    pub fn width(width: f32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn apply(&self, paddle: &mut Paddle) {
        if let Some(v) = self.x {
            paddle.x = v;
        }
        if let Some(v) = self.y {
            paddle.y = v;
        }
        if let Some(v) = self.width {
            paddle.width = v;
        }
        if let Some(v) = self.height {
            paddle.height = v;
        }
        if let Some(v) = self.speed {
            paddle.speed = v;
        }
        if let Some(v) = self.color {
            paddle.color = v;
        }
    }
}

/// Partial update for the ball
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BallPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub dx: Option<f32>,
    pub dy: Option<f32>,
    pub radius: Option<f32>,
    pub speed: Option<f32>,
    pub color: Option<Color>,
}

impl BallPatch {
    /// Position and velocity in one patch
    pub fn motion(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            dx: Some(dx),
            dy: Some(dy),
            ..Self::default()
        }
    }

    pub fn velocity(dx: f32, dy: f32) -> Self {
        Self {
            dx: Some(dx),
            dy: Some(dy),
            ..Self::default()
        }
    }

    pub fn apply(&self, ball: &mut Ball) {
        if let Some(v) = self.x {
            ball.x = v;
        }
        if let Some(v) = self.y {
            ball.y = v;
        }
        if let Some(v) = self.dx {
            ball.dx = v;
        }
        if let Some(v) = self.dy {
            ball.dy = v;
        }
        if let Some(v) = self.radius {
            ball.radius = v;
        }
        if let Some(v) = self.speed {
            ball.speed = v;
        }
        if let Some(v) = self.color {
            ball.color = v;
        }
    }
}

/// Partial update for a power-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub speed: Option<f32>,
}

impl PowerUpPatch {
    pub fn apply(&self, power_up: &mut PowerUp) {
        if let Some(v) = self.x {
            power_up.x = v;
        }
        if let Some(v) = self.y {
            power_up.y = v;
        }
        if let Some(v) = self.speed {
            power_up.speed = v;
        }
    }
}

/// Partial update for a particle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticlePatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub vx: Option<f32>,
    pub vy: Option<f32>,
    pub life: Option<f32>,
    pub size: Option<f32>,
}

impl ParticlePatch {
    /// Patch carrying every moving field of `particle`
    pub fn from_particle(particle: &Particle) -> Self {
        Self {
            x: Some(particle.x),
            y: Some(particle.y),
            vx: Some(particle.vx),
            vy: Some(particle.vy),
            life: Some(particle.life),
            size: Some(particle.size),
        }
    }

    pub fn apply(&self, particle: &mut Particle) {
        if let Some(v) = self.x {
            particle.x = v;
        }
        if let Some(v) = self.y {
            particle.y = v;
        }
        if let Some(v) = self.vx {
            particle.vx = v;
        }
        if let Some(v) = self.vy {
            particle.vy = v;
        }
        if let Some(v) = self.life {
            particle.life = v;
        }
        if let Some(v) = self.size {
            particle.size = v;
        }
    }
}

/// Every state change the simulation knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    StartGame,
    /// `dx` is drawn by the dispatcher so the reducer stays pure
    LaunchBall { dx: f32 },
    ResetBall,
    UpdateScore(u32),
    UpdateLives(u32),
    UpdateLevel(u32),
    NextLevel,
    GameOver,
    AddPowerUp(PowerUp),
    RemovePowerUp(usize),
    UpdatePowerUp { target: Target, patch: PowerUpPatch },
    AddParticle(Particle),
    RemoveParticle(usize),
    UpdateParticle { target: Target, patch: ParticlePatch },
    RemoveBrick(usize),
    UpdatePaddle(PaddlePatch),
    UpdateBall(BallPatch),
    Pause,
    Resume,
    /// Back to a fresh, unstarted run (high score survives)
    Reset,
    /// Advance the tick counter and count down active effects
    BeginTick,
    ApplyPowerUp(PowerUpKind),
    ExpirePowerUp(PowerUpKind),
    /// Several actions applied in order to a single copy of the state
    Batch(Vec<Action>),
}

impl Action {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartGame => "START_GAME",
            Action::LaunchBall { .. } => "LAUNCH_BALL",
            Action::ResetBall => "RESET_BALL",
            Action::UpdateScore(_) => "UPDATE_SCORE",
            Action::UpdateLives(_) => "UPDATE_LIVES",
            Action::UpdateLevel(_) => "UPDATE_LEVEL",
            Action::NextLevel => "NEXT_LEVEL",
            Action::GameOver => "GAME_OVER",
            Action::AddPowerUp(_) => "ADD_POWER_UP",
            Action::RemovePowerUp(_) => "REMOVE_POWER_UP",
            Action::UpdatePowerUp { .. } => "UPDATE_POWER_UP",
            Action::AddParticle(_) => "ADD_PARTICLE",
            Action::RemoveParticle(_) => "REMOVE_PARTICLE",
            Action::UpdateParticle { .. } => "UPDATE_PARTICLE",
            Action::RemoveBrick(_) => "REMOVE_BRICK",
            Action::UpdatePaddle(_) => "UPDATE_PADDLE",
            Action::UpdateBall(_) => "UPDATE_BALL",
            Action::Pause => "PAUSE",
            Action::Resume => "RESUME",
            Action::Reset => "RESET",
            Action::BeginTick => "BEGIN_TICK",
            Action::ApplyPowerUp(_) => "APPLY_POWER_UP",
            Action::ExpirePowerUp(_) => "EXPIRE_POWER_UP",
            Action::Batch(_) => "BATCH",
        }
    }
}

/// Apply `patch` to every element `target` selects
pub(crate) fn update_matching<T>(
    items: &mut [T],
    target: Target,
    position: impl Fn(&T) -> (f32, f32),
    mut apply: impl FnMut(&mut T),
) {
    for (index, item) in items.iter_mut().enumerate() {
        let (x, y) = position(item);
        if target.matches(index, x, y) {
            apply(item);
        }
    }
}
