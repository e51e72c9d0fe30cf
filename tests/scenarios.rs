//! End-to-end runs through the public API

use brick_breaker::sim::{Action, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind, reduce};
use brick_breaker::{Game, GameConfig, HighScoreStore, InputIntent, MemoryStore};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn idle() -> InputIntent {
    InputIntent::default()
}

/// Started run with the ball just launched straight up from the paddle
fn launched(config: &GameConfig) -> GameState {
    let state = reduce(&GameState::new(config, 0), &Action::StartGame, config);
    reduce(&state, &Action::LaunchBall { dx: 0.0 }, config)
}

#[test]
fn straight_launch_breaks_bottom_row_brick() {
    let config = GameConfig::default();
    let state = launched(&config);
    assert_eq!(state.ball.dy, -5.0);
    let mut game = Game::from_snapshot(config, state, MemoryStore::default(), Pcg32::seed_from_u64(7));

    for _ in 0..65 {
        game.step(&idle());
    }
    assert_eq!(game.state().bricks.len(), 60);

    let events = game.step(&idle());
    let state = game.state();
    assert_eq!(state.bricks.len(), 59);
    assert_eq!(state.score, 10);
    assert_eq!(state.ball.dy, 5.0);
    // At x = 400 the ball touches columns 4 and 5; the later brick wins
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::BrickDestroyed { index: 55, brick } if brick.x == 400.0 && brick.points == 10
    )));
}

#[test]
fn losing_last_ball_ends_run_and_saves_record() {
    let config = GameConfig::default();
    let mut state = launched(&config);
    state.lives = 1;
    state.score = 480;
    state.ball.x = 60.0;
    state.ball.y = 596.0;
    state.ball.dy = 5.0;

    let mut game = Game::from_snapshot(config, state, MemoryStore::new(100), Pcg32::seed_from_u64(1));
    let events = game.step(&idle());

    let state = game.state().clone();
    assert!(!state.game_running);
    assert_eq!(state.lives, 0);
    assert_eq!(state.phase(), GamePhase::GameOver);
    assert_eq!(state.high_score, 480);
    assert_eq!(game.store().high_score(), 480);
    assert!(events.contains(&GameEvent::GameOver { score: 480 }));

    // No more scoring or brick changes after the end
    for _ in 0..30 {
        game.step(&idle());
    }
    assert_eq!(game.state().score, state.score);
    assert_eq!(game.state().bricks, state.bricks);
}

#[test]
fn bigger_pickup_widens_then_reverts() {
    let config = GameConfig::default();
    let mut state = reduce(&GameState::new(&config, 0), &Action::StartGame, &config);
    // Just above the paddle, falls onto it next tick
    state.power_ups.push(PowerUp::new(
        PowerUpKind::Bigger,
        Vec2::new(400.0, 556.0),
        &config,
    ));
    let mut game = Game::from_snapshot(config, state, MemoryStore::default(), Pcg32::seed_from_u64(3));

    let events = game.step(&idle());
    assert!(events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Bigger)));
    assert_eq!(game.state().paddle.width, 150.0);

    for _ in 0..599 {
        game.step(&idle());
    }
    assert_eq!(game.state().paddle.width, 150.0);

    let events = game.step(&idle());
    assert!(events.contains(&GameEvent::PowerUpExpired(PowerUpKind::Bigger)));
    assert_eq!(game.state().paddle.width, 100.0);
}

#[test]
fn clearing_the_board_serves_the_next_level() {
    let config = GameConfig::default();
    let mut state = launched(&config);
    let last = state.bricks[55].clone();
    state.bricks = vec![last];
    state.score = 1000;
    state.ball.y = 226.0;

    let mut game = Game::from_snapshot(config, state, MemoryStore::default(), Pcg32::seed_from_u64(11));
    let events = game.step(&idle());

    let state = game.state();
    assert!(events.contains(&GameEvent::LevelComplete { level: 2 }));
    assert_eq!(state.level, 2);
    assert_eq!(state.bricks.len(), 60);
    assert_eq!(state.ball.speed, 5.5);
    assert!(!state.ball_launched);
    assert!(state.power_ups.is_empty());
    assert_eq!(state.high_score, 1010);
    assert_eq!(game.store().high_score(), 1010);
}

#[test]
fn restored_snapshot_replays_identically() {
    let config = GameConfig::default();
    let mut game = Game::new(config.clone(), MemoryStore::default(), Pcg32::seed_from_u64(2024));
    let press = InputIntent {
        action: true,
        ..Default::default()
    };
    game.step(&press);
    game.step(&press);

    let script: Vec<InputIntent> = (0..400)
        .map(|i| InputIntent {
            left: i % 120 < 40,
            right: i % 120 >= 80,
            ..Default::default()
        })
        .collect();
    for input in &script[..200] {
        game.step(input);
    }

    // Save state and RNG, continue both copies with the same inputs
    let snapshot = serde_json::to_string(game.state()).unwrap();
    let restored: GameState = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(&restored, game.state());

    let rng_a = Pcg32::seed_from_u64(5);
    let rng_json = serde_json::to_string(&rng_a).unwrap();
    let rng_b: Pcg32 = serde_json::from_str(&rng_json).unwrap();

    let mut a = Game::from_snapshot(config.clone(), restored.clone(), MemoryStore::default(), rng_a);
    let mut b = Game::from_snapshot(config, restored, MemoryStore::default(), rng_b);
    for input in &script[200..] {
        assert_eq!(a.step(input), b.step(input));
    }
    assert_eq!(a.state(), b.state());
}
