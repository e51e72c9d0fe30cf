//! Level and progression state machine
//!
//! NotStarted -> Serving -> InPlay -> {LevelComplete -> Serving(level + 1),
//! BallLost -> Serving, GameOver}. GameOver is terminal until a reset.
//! The phase itself is derived from the state (`GameState::phase`); this
//! module decides which actions move the machine along.

use rand::Rng;

use super::action::Action;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::config::GameConfig;

/// Action for the discrete "action" key in the current phase
pub fn action_command<R: Rng + ?Sized>(
    state: &GameState,
    config: &GameConfig,
    rng: &mut R,
) -> Option<(Action, GameEvent)> {
    match state.phase() {
        GamePhase::NotStarted => Some((Action::StartGame, GameEvent::Started)),
        GamePhase::Serving => {
            let spread = config.ball.launch_spread.abs();
            let dx = if spread > 0.0 && spread.is_finite() {
                rng.random_range(-spread..spread)
            } else {
                0.0
            };
            Some((Action::LaunchBall { dx }, GameEvent::Launched))
        }
        GamePhase::GameOver => Some((Action::Reset, GameEvent::Reset)),
        GamePhase::InPlay | GamePhase::Paused => None,
    }
}

/// Action for the pause key in the current phase
pub fn pause_command(state: &GameState) -> Option<(Action, GameEvent)> {
    match state.phase() {
        GamePhase::Serving | GamePhase::InPlay => Some((Action::Pause, GameEvent::Paused)),
        GamePhase::Paused => Some((Action::Resume, GameEvent::Resumed)),
        GamePhase::NotStarted | GamePhase::GameOver => None,
    }
}

/// Whether the ball has dropped below the canvas
pub fn is_ball_lost(state: &GameState, config: &GameConfig) -> bool {
    state.ball_launched && state.ball.y > config.canvas.height
}

/// Actions for a lost ball: one life down, then a new serve or the end of the run
pub fn ball_lost_actions(state: &GameState) -> Vec<Action> {
    let lives = state.lives.saturating_sub(1);
    let follow_up = if lives == 0 {
        Action::GameOver
    } else {
        Action::ResetBall
    };
    vec![Action::UpdateLives(lives), follow_up]
}

/// Whether the current level has been cleared
pub fn is_level_complete(state: &GameState) -> bool {
    state.game_running && state.bricks.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::reducer::reduce;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_action_key_walks_the_machine() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&config, 0);

        let (start, _) = action_command(&state, &config, &mut rng).unwrap();
        assert_eq!(start, Action::StartGame);
        state = reduce(&state, &start, &config);

        let (launch, event) = action_command(&state, &config, &mut rng).unwrap();
        assert_eq!(event, GameEvent::Launched);
        match launch {
            Action::LaunchBall { dx } => assert!((-2.0..2.0).contains(&dx)),
            other => panic!("expected launch, got {other:?}"),
        }
        state = reduce(&state, &launch, &config);
        assert_eq!(state.phase(), GamePhase::InPlay);

        // Ignored while the ball is in play
        assert!(action_command(&state, &config, &mut rng).is_none());
    }

    #[test]
    fn test_action_key_resets_after_game_over() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&config, 0);
        state.lives = 0;
        assert_eq!(state.phase(), GamePhase::GameOver);
        let (action, _) = action_command(&state, &config, &mut rng).unwrap();
        assert_eq!(action, Action::Reset);
    }

    #[test]
    fn test_pause_toggle() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        assert!(pause_command(&state).is_none());
        state = reduce(&state, &Action::StartGame, &config);
        let (pause, _) = pause_command(&state).unwrap();
        state = reduce(&state, &pause, &config);
        assert_eq!(pause_command(&state).unwrap().0, Action::Resume);
    }

    #[test]
    fn test_ball_lost_actions() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        state.lives = 2;
        assert_eq!(
            ball_lost_actions(&state),
            vec![Action::UpdateLives(1), Action::ResetBall]
        );
        state.lives = 1;
        assert_eq!(
            ball_lost_actions(&state),
            vec![Action::UpdateLives(0), Action::GameOver]
        );
    }

    #[test]
    fn test_ball_lost_only_when_launched() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        state.ball.y = 700.0;
        assert!(!is_ball_lost(&state, &config));
        state.ball_launched = true;
        assert!(is_ball_lost(&state, &config));
    }
}
