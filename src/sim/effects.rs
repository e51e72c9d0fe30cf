//! Power-up effect manager
//!
//! Timed effects are tick counters stored in the state. Collecting an effect
//! that is already active restarts its timer and re-applies the multiplier
//! to the default value, so boosts never compound. Reversal happens through
//! an `ExpirePowerUp` action once the counter reaches zero.

use super::collision::clamp_speed;
use super::state::{GameState, PowerUpKind};
use crate::config::GameConfig;

/// Full duration of an effect in ticks (`None` for permanent effects)
pub fn duration(kind: PowerUpKind, config: &GameConfig) -> Option<u32> {
    match kind {
        PowerUpKind::Bigger => Some(config.effects.bigger_ticks),
        PowerUpKind::Speed => Some(config.effects.speed_ticks),
        PowerUpKind::Life => None,
    }
}

/// Whether a timed effect is currently running
pub fn is_active(state: &GameState, kind: PowerUpKind) -> bool {
    state.effects.remaining(kind) > 0
}

/// Timed effects whose counter is zero but whose boost is still applied
pub fn pending_expiry(state: &GameState, config: &GameConfig) -> Vec<PowerUpKind> {
    let mut expired = Vec::new();
    if !is_active(state, PowerUpKind::Bigger) && state.paddle.width != config.paddle.width {
        expired.push(PowerUpKind::Bigger);
    }
    if !is_active(state, PowerUpKind::Speed) && state.ball.speed > config.level_speed(state.level) {
        expired.push(PowerUpKind::Speed);
    }
    expired
}

/// Apply a collected power-up (reducer only)
pub(crate) fn apply(state: &mut GameState, kind: PowerUpKind, config: &GameConfig) {
    let multiplier = config.effects.multiplier;
    match kind {
        PowerUpKind::Bigger => {
            let width = (config.paddle.width * multiplier).min(config.paddle.max_width);
            resize_paddle(state, width, config);
        }
        PowerUpKind::Speed => {
            let speed = (config.level_speed(state.level) * multiplier).min(config.ball.max_speed);
            set_ball_speed(state, speed);
        }
        PowerUpKind::Life => {
            state.lives += 1;
        }
    }
    if let Some(ticks) = duration(kind, config) {
        state.effects.restart(kind, ticks);
    }
}

/// Undo a timed power-up (reducer only)
pub(crate) fn revert(state: &mut GameState, kind: PowerUpKind, config: &GameConfig) {
    match kind {
        PowerUpKind::Bigger => resize_paddle(state, config.paddle.width, config),
        PowerUpKind::Speed => set_ball_speed(state, config.level_speed(state.level)),
        PowerUpKind::Life => {}
    }
}

/// Change paddle width around its centre, keeping it on the canvas
fn resize_paddle(state: &mut GameState, width: f32, config: &GameConfig) {
    let center = state.paddle.center_x();
    state.paddle.width = width;
    state.paddle.x = center - width / 2.0;
    state.paddle = state.paddle.clone().clamped(config.canvas.width);
}

/// Change ball speed; a moving ball is rescaled to it
fn set_ball_speed(state: &mut GameState, speed: f32) {
    state.ball.speed = speed;
    if state.ball_launched {
        let vel = clamp_speed(state.ball.vel(), speed, speed);
        state.ball.dx = vel.x;
        state.ball.dy = vel.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::action::Action;
    use crate::sim::reducer::reduce;

    fn in_play() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        state = reduce(&state, &Action::StartGame, &config);
        state = reduce(&state, &Action::LaunchBall { dx: 0.0 }, &config);
        (state, config)
    }

    #[test]
    fn test_bigger_multiplies_width() {
        let (state, config) = in_play();
        let next = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Bigger), &config);
        assert_eq!(next.paddle.width, 150.0);
        assert_eq!(next.paddle.center_x(), state.paddle.center_x());
        assert_eq!(next.effects.bigger_ticks, 600);
        assert!(is_active(&next, PowerUpKind::Bigger));
    }

    #[test]
    fn test_bigger_does_not_compound() {
        let (state, config) = in_play();
        let once = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Bigger), &config);
        let mut twice = once.clone();
        twice.effects.bigger_ticks = 10;
        let twice = reduce(&twice, &Action::ApplyPowerUp(PowerUpKind::Bigger), &config);
        assert_eq!(twice.paddle.width, 150.0);
        assert_eq!(twice.effects.bigger_ticks, 600);
    }

    #[test]
    fn test_bigger_respects_cap_and_edge() {
        let mut config = GameConfig::default();
        config.effects.multiplier = 3.0;
        let mut state = GameState::new(&config, 0);
        state.paddle.x = 700.0;
        let next = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Bigger), &config);
        assert_eq!(next.paddle.width, config.paddle.max_width);
        assert_eq!(next.paddle.x, 600.0);
    }

    #[test]
    fn test_speed_boost_and_revert() {
        let (state, config) = in_play();
        let fast = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Speed), &config);
        assert_eq!(fast.ball.speed, 7.5);
        assert!((fast.ball.vel().length() - 7.5).abs() < 1e-4);

        let mut expired = fast.clone();
        expired.effects.speed_ticks = 0;
        assert_eq!(pending_expiry(&expired, &config), vec![PowerUpKind::Speed]);
        let slow = reduce(&expired, &Action::ExpirePowerUp(PowerUpKind::Speed), &config);
        assert_eq!(slow.ball.speed, 5.0);
        assert!((slow.ball.vel().length() - 5.0).abs() < 1e-4);
        assert!(pending_expiry(&slow, &config).is_empty());
    }

    #[test]
    fn test_speed_boost_capped_at_max() {
        let (mut state, config) = in_play();
        state.level = 4;
        let fast = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Speed), &config);
        assert_eq!(fast.ball.speed, config.ball.max_speed);
    }

    #[test]
    fn test_life_is_permanent() {
        let (state, config) = in_play();
        let next = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Life), &config);
        assert_eq!(next.lives, 4);
        assert_eq!(duration(PowerUpKind::Life, &config), None);
        assert!(pending_expiry(&next, &config).is_empty());
    }

    #[test]
    fn test_custom_duration_drives_timer() {
        let (state, mut config) = in_play();
        config.effects.speed_ticks = 3;
        let fast = reduce(&state, &Action::ApplyPowerUp(PowerUpKind::Speed), &config);
        assert_eq!(fast.effects.speed_ticks, 3);

        let mut next = fast;
        for _ in 0..3 {
            assert!(pending_expiry(&next, &config).is_empty());
            next = reduce(&next, &Action::BeginTick, &config);
        }
        assert!(!is_active(&next, PowerUpKind::Speed));
        assert_eq!(pending_expiry(&next, &config), vec![PowerUpKind::Speed]);
    }
}
