//! Transition function
//!
//! `reduce` is the single writer of game state: it takes a snapshot and an
//! action and returns the next snapshot. It is total; an action whose
//! precondition does not hold yields an unchanged copy.

use super::action::{Action, update_matching};
use super::effects;
use super::state::{Ball, GameState, build_bricks};
use crate::config::GameConfig;

/// Compute the state that follows `state` once `action` is applied
pub fn reduce(state: &GameState, action: &Action, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    apply(&mut next, action, config);
    next
}

/// Apply an action to the reducer's private working copy
fn apply(next: &mut GameState, action: &Action, config: &GameConfig) {
    match action {
        Action::StartGame => {
            next.game_running = true;
            next.game_paused = false;
            next.ball_launched = false;
            next.effects.speed_ticks = 0;
            next.ball = Ball::serving(&next.paddle, config.level_speed(next.level), config);
        }

        Action::LaunchBall { dx } => {
            if !next.ball_launched {
                let spread = config.ball.launch_spread.abs();
                next.ball_launched = true;
                next.ball.dx = dx.max(-spread).min(spread);
                next.ball.dy = -next.ball.speed;
            }
        }

        Action::ResetBall => {
            next.ball_launched = false;
            next.ball = Ball::serving(&next.paddle, next.ball.speed, config);
        }

        Action::UpdateScore(score) => next.score = *score,
        Action::UpdateLives(lives) => next.lives = *lives,
        Action::UpdateLevel(level) => next.level = (*level).max(1),

        Action::NextLevel => {
            if next.bricks.is_empty() {
                next.level += 1;
                next.high_score = next.high_score.max(next.score);
                next.bricks = build_bricks(config, next.level);
                next.power_ups.clear();
                let speed = (next.ball.speed + config.ball.level_speed_step).min(config.ball.max_speed);
                next.ball = Ball::serving(&next.paddle, speed, config);
                next.ball_launched = false;
            }
        }

        Action::GameOver => {
            if next.lives == 0 {
                next.game_running = false;
                next.game_paused = false;
                next.high_score = next.high_score.max(next.score);
            }
        }

        Action::AddPowerUp(power_up) => next.power_ups.push(power_up.clone()),
        Action::RemovePowerUp(index) => {
            if *index < next.power_ups.len() {
                next.power_ups.remove(*index);
            }
        }
        Action::UpdatePowerUp { target, patch } => {
            update_matching(&mut next.power_ups, *target, |p| (p.x, p.y), |p| patch.apply(p));
        }

        Action::AddParticle(particle) => {
            if next.particles.len() < config.particles.max_particles {
                next.particles.push(particle.clone());
            }
        }
        Action::RemoveParticle(index) => {
            if *index < next.particles.len() {
                next.particles.remove(*index);
            }
        }
        Action::UpdateParticle { target, patch } => {
            update_matching(&mut next.particles, *target, |p| (p.x, p.y), |p| patch.apply(p));
        }

        Action::RemoveBrick(index) => {
            if *index < next.bricks.len() {
                next.bricks.remove(*index);
            }
        }

        Action::UpdatePaddle(patch) => {
            patch.apply(&mut next.paddle);
            next.paddle = next.paddle.clone().clamped(config.canvas.width);
        }
        Action::UpdateBall(patch) => patch.apply(&mut next.ball),

        Action::Pause => {
            if next.game_running {
                next.game_paused = true;
            }
        }
        Action::Resume => next.game_paused = false,

        Action::Reset => *next = GameState::new(config, next.high_score),

        Action::BeginTick => {
            next.ticks += 1;
            next.effects.bigger_ticks = next.effects.bigger_ticks.saturating_sub(1);
            next.effects.speed_ticks = next.effects.speed_ticks.saturating_sub(1);
        }

        Action::ApplyPowerUp(kind) => effects::apply(next, *kind, config),
        Action::ExpirePowerUp(kind) => {
            if next.effects.remaining(*kind) == 0 {
                effects::revert(next, *kind, config);
            }
        }

        Action::Batch(actions) => {
            for action in actions {
                apply(next, action, config);
            }
        }
    }
}
