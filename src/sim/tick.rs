//! Fixed timestep simulation tick
//!
//! One call resolves one frame of gameplay. The resolver never writes state
//! itself: it reads the latest snapshot through `Dispatch` and feeds actions
//! back, so every step below sees the result of the previous one.

use std::sync::Arc;

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use super::action::{Action, BallPatch, PaddlePatch, ParticlePatch, PowerUpPatch, Target};
use super::collision::{Rect, aabb_overlap, circle_rect_collision, clamp_speed, paddle_deflection};
use super::dispatch::Dispatch;
use super::effects;
use super::events::GameEvent;
use super::particles;
use super::progression;
use super::state::{Brick, Color, PowerUp, PowerUpKind};
use crate::config::GameConfig;
use crate::input::InputIntent;

/// Ball is parked this far above the paddle after a paddle bounce
const PADDLE_NUDGE: f32 = 0.5;

/// Advance the game by one fixed timestep
pub fn tick<D, R>(d: &mut D, input: &InputIntent, rng: &mut R) -> Vec<GameEvent>
where
    D: Dispatch + ?Sized,
    R: Rng + ?Sized,
{
    let config = Arc::clone(d.config());
    let mut events = Vec::new();

    // Discrete commands
    if input.pause {
        if let Some((action, event)) = progression::pause_command(d.state()) {
            d.dispatch(action);
            events.push(event);
        }
    }
    if input.action {
        if let Some((action, event)) = progression::action_command(d.state(), &config, rng) {
            if event == GameEvent::Started {
                info!("Game started (level {})", d.state().level);
            }
            d.dispatch(action);
            events.push(event);
        }
    }

    // Don't tick if paused or not running
    if !d.state().game_running || d.state().game_paused {
        return events;
    }

    // 0. Clock and effect expiry
    d.dispatch(Action::BeginTick);
    for kind in effects::pending_expiry(d.state(), &config) {
        debug!("Power-up expired: {}", kind.as_str());
        d.dispatch(Action::ExpirePowerUp(kind));
        events.push(GameEvent::PowerUpExpired(kind));
    }

    // 1. Paddle
    move_paddle(d, input);

    // 2-4. Ball motion, walls and paddle
    move_ball(d, &config, rng, &mut events);

    // 5. Bricks
    hit_bricks(d, &config, rng, &mut events);

    // 6. Out of bounds
    if progression::is_ball_lost(d.state(), &config) {
        let lost = progression::ball_lost_actions(d.state());
        d.dispatch(Action::Batch(lost));
        let lives_left = d.state().lives;
        events.push(GameEvent::BallLost { lives_left });

        // The batch already ended the run
        if lives_left == 0 {
            let score = d.state().score;
            info!("Game over: score {}, level {}", score, d.state().level);
            events.push(GameEvent::GameOver { score });
            return events;
        }
    }

    // 7. Power-ups
    update_power_ups(d, &config, rng, &mut events);

    // 8. Particles
    update_particles(d, &config);

    // 9. Level complete
    if progression::is_level_complete(d.state()) {
        d.dispatch(Action::NextLevel);
        let level = d.state().level;
        info!("Level complete, now on level {}", level);
        events.push(GameEvent::LevelComplete { level });
    }

    events
}

fn move_paddle<D: Dispatch + ?Sized>(d: &mut D, input: &InputIntent) {
    let paddle = &d.state().paddle;
    let mut x = paddle.x;
    if input.left {
        x -= paddle.speed;
    }
    if input.right {
        x += paddle.speed;
    }
    if x != paddle.x {
        // The reducer clamps to the canvas
        d.dispatch(Action::UpdatePaddle(PaddlePatch::x(x)));
    }
}

fn move_ball<D, R>(d: &mut D, config: &GameConfig, rng: &mut R, events: &mut Vec<GameEvent>)
where
    D: Dispatch + ?Sized,
    R: Rng + ?Sized,
{
    let state = d.state();
    let paddle = &state.paddle;
    let mut ball = state.ball.clone();
    let r = ball.radius;

    // Unlaunched ball rides the paddle
    if !state.ball_launched {
        let patch = BallPatch::motion(paddle.center_x(), paddle.y - r - 8.0, 0.0, 0.0);
        d.dispatch(Action::UpdateBall(patch));
        return;
    }

    ball.x += ball.dx;
    ball.y += ball.dy;

    // Side and top walls; the bottom is open
    let width = config.canvas.width;
    if ball.x - r < 0.0 {
        ball.x = r;
        ball.dx = ball.dx.abs();
        events.push(GameEvent::WallBounce);
    } else if ball.x + r > width {
        ball.x = width - r;
        ball.dx = -ball.dx.abs();
        events.push(GameEvent::WallBounce);
    }
    if ball.y - r < 0.0 {
        ball.y = r;
        ball.dy = ball.dy.abs();
        events.push(GameEvent::WallBounce);
    }

    // Paddle, only while falling
    let mut contact = None;
    if ball.dy > 0.0 {
        let rect = Rect::new(paddle.x, paddle.y, paddle.width, paddle.height);
        let hit = circle_rect_collision(ball.pos(), r, &rect);
        if hit.hit {
            let max = config.ball.max_speed;
            let dx = paddle_deflection(ball.x, &rect, config.ball.paddle_deflection, max);
            let vel = clamp_speed(Vec2::new(dx, -ball.dy.abs()), ball.speed.min(max), max);
            ball.dx = vel.x;
            ball.dy = vel.y;
            ball.y = paddle.y - r - PADDLE_NUDGE;
            contact = Some(hit.point);
            events.push(GameEvent::PaddleHit);
        }
    }

    d.dispatch(Action::UpdateBall(BallPatch::motion(ball.x, ball.y, ball.dx, ball.dy)));

    if let Some(point) = contact {
        spawn_burst(d, point, config.particles.paddle_color, config, rng);
    }
}

fn hit_bricks<D, R>(d: &mut D, config: &GameConfig, rng: &mut R, events: &mut Vec<GameEvent>)
where
    D: Dispatch + ?Sized,
    R: Rng + ?Sized,
{
    let state = d.state();
    if !state.ball_launched {
        return;
    }
    let ball = &state.ball;

    // Back to front, first hit only
    let Some((index, brick)) = state
        .bricks
        .iter()
        .enumerate()
        .rev()
        .find(|(_, b)| {
            let rect = Rect::new(b.x, b.y, b.width, b.height);
            circle_rect_collision(ball.pos(), ball.radius, &rect).hit
        })
        .map(|(i, b)| (i, b.clone()))
    else {
        return;
    };

    let max = config.ball.max_speed;
    let vel = clamp_speed(Vec2::new(ball.dx, -ball.dy), ball.speed.min(max), max);
    let score = state.score.saturating_add(brick.points);
    d.dispatch(Action::Batch(vec![
        Action::RemoveBrick(index),
        Action::UpdateScore(score),
        Action::UpdateBall(BallPatch::velocity(vel.x, vel.y)),
    ]));

    spawn_burst(d, brick.center(), brick.color, config, rng);

    // NaN counts as never
    let chance = config.power_ups.drop_chance.max(0.0).min(1.0);
    if rng.random_bool(chance) {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        debug!("Power-up spawned: {}", kind.as_str());
        d.dispatch(Action::AddPowerUp(PowerUp::new(kind, brick.center(), config)));
        events.push(GameEvent::PowerUpSpawned(kind));
    }

    events.push(GameEvent::BrickDestroyed {
        index,
        brick: Brick { hit: true, ..brick },
    });
}

fn update_power_ups<D, R>(d: &mut D, config: &GameConfig, rng: &mut R, events: &mut Vec<GameEvent>)
where
    D: Dispatch + ?Sized,
    R: Rng + ?Sized,
{
    let state = d.state();
    if state.power_ups.is_empty() {
        return;
    }
    let paddle = &state.paddle;
    let paddle_rect = Rect::new(paddle.x, paddle.y, paddle.width, paddle.height);
    let power_ups = state.power_ups.clone();

    let mut actions = Vec::with_capacity(power_ups.len());
    let mut collected = Vec::new();

    // Back to front so removals keep earlier indices valid
    for (index, power_up) in power_ups.iter().enumerate().rev() {
        let y = power_up.y + power_up.speed;
        let rect = Rect::new(power_up.x, y, power_up.width, power_up.height);

        if aabb_overlap(&rect, &paddle_rect) {
            debug!("Power-up collected: {}", power_up.kind.as_str());
            actions.push(Action::ApplyPowerUp(power_up.kind));
            actions.push(Action::RemovePowerUp(index));
            collected.push(Vec2::new(power_up.x, y));
            events.push(GameEvent::PowerUpCollected(power_up.kind));
        } else if y + power_up.height >= config.canvas.height {
            actions.push(Action::RemovePowerUp(index));
            events.push(GameEvent::PowerUpMissed(power_up.kind));
        } else {
            let patch = PowerUpPatch {
                y: Some(y),
                ..Default::default()
            };
            actions.push(Action::UpdatePowerUp {
                target: Target::Index(index),
                patch,
            });
        }
    }

    d.dispatch(Action::Batch(actions));

    for at in collected {
        spawn_burst(d, at, config.particles.pickup_color, config, rng);
    }
}

fn update_particles<D: Dispatch + ?Sized>(d: &mut D, config: &GameConfig) {
    let state = d.state();
    if state.particles.is_empty() {
        return;
    }
    let damping = config.particles.damping;

    let actions = state
        .particles
        .iter()
        .enumerate()
        .rev()
        .map(|(index, particle)| match particles::step(particle, damping) {
            Some(next) => Action::UpdateParticle {
                target: Target::Index(index),
                patch: ParticlePatch::from_particle(&next),
            },
            None => Action::RemoveParticle(index),
        })
        .collect();

    d.dispatch(Action::Batch(actions));
}

fn spawn_burst<D, R>(d: &mut D, center: Vec2, color: Color, config: &GameConfig, rng: &mut R)
where
    D: Dispatch + ?Sized,
    R: Rng + ?Sized,
{
    let live = d.state().particles.len();
    let burst = particles::burst(center, color, live, &config.particles, rng);
    if !burst.is_empty() {
        d.dispatch(Action::Batch(burst.into_iter().map(Action::AddParticle).collect()));
    }
}
