use std::ops::ControlFlow;

use glam::Vec2;
use neon_pinball::consts::*;
use neon_pinball::sim::GameEvent;
use neon_pinball::ui::HudUpdate;
use neon_pinball::{FixedClock, Game, Tuning, run};

/// Drop the ball straight into the drain and run one frame
fn drain_ball(game: &mut Game, now_ms: f64) -> Vec<GameEvent> {
    let ball = &mut game.state_mut().ball;
    ball.pos = Vec2::new(200.0, DRAIN_Y + 20.0);
    ball.vel = Vec2::ZERO;
    game.frame(now_ms).events
}

#[test]
fn test_autoplay_session_keeps_invariants() {
    let mut game = Game::new(2024);
    game.autoplay = true;
    game.start();

    let mut clock = FixedClock::new().limit(60 * 60 * 2);
    let mut last_score = 0;
    run(&mut game, &mut clock, |game, _frame| {
        let state = game.state();
        let (lmin, lmax) = state.left_flipper.angle_range();
        let (rmin, rmax) = state.right_flipper.angle_range();
        assert!((lmin..=lmax).contains(&state.left_flipper.angle));
        assert!((rmin..=rmax).contains(&state.right_flipper.angle));
        assert!(state.lives <= 3);
        assert!(state.score >= last_score, "score never decreases without a reset");
        last_score = state.score;
        if state.running {
            assert!(state.ball.pos.x - state.ball.radius >= LEFT_WALL_X);
            assert!(state.ball.pos.x + state.ball.radius <= RIGHT_WALL_X);
        }
        ControlFlow::Continue(())
    });
}

#[test]
fn test_same_seed_same_session() {
    let play = || {
        let mut game = Game::new(77);
        game.autoplay = true;
        game.start();
        let mut clock = FixedClock::new().limit(3_000);
        run(&mut game, &mut clock, |_, _| ControlFlow::Continue(()));
        let state = game.state();
        (state.score, state.lives, state.ball.pos)
    };
    assert_eq!(play(), play());
}

#[test]
fn test_three_drains_end_the_game() {
    let mut game = Game::new(5);
    game.start();
    game.state_mut().score = 420;

    let events = drain_ball(&mut game, 16.0);
    assert!(events.contains(&GameEvent::BallLost { lives_left: 2 }));
    assert_eq!(game.state().ball.pos, Vec2::new(BALL_START_X, BALL_START_Y));
    assert_eq!(game.state().ball.vel, Vec2::ZERO);

    drain_ball(&mut game, 32.0);
    let events = drain_ball(&mut game, 48.0);
    assert!(events.contains(&GameEvent::GameOver { score: 420 }));
    assert!(!game.state().running);
    assert_eq!(game.hud().overlay(), Some("GAME OVER! Final Score: 420"));
}

#[test]
fn test_reset_mid_game() {
    let mut game = Game::new(9);
    game.start();
    game.frame(16.0);
    {
        let state = game.state_mut();
        state.lives = 1;
        state.score = 500;
        state.bumpers[0].strike(16.0, 200.0);
        state.bumpers[6].strike(16.0, 200.0);
    }
    game.frame(24.0);

    game.reset();
    let frame = game.frame(32.0);

    let state = game.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.lives, 3);
    assert_eq!(state.level, 1);
    assert!(state.bumpers.iter().all(|b| !b.hit));
    assert!(!state.running);
    assert!(frame.hud.contains(&HudUpdate::Score(0)));
    assert!(frame.hud.contains(&HudUpdate::Lives(3)));
}

#[test]
fn test_launch_ignored_until_started() {
    let mut game = Game::new(3);
    game.key_down(" ");
    game.frame(16.0);
    assert!(!game.state().launched());

    game.start();
    game.key_down(" ");
    game.frame(32.0);
    assert!(game.state().launched());
}

#[test]
fn test_custom_tuning_flows_into_launch() {
    let tuning = Tuning::from_json(r#"{ "launch_speed": 10.0, "launch_spread": 0.0 }"#).unwrap();
    let mut game = Game::with_tuning(1, tuning);
    game.start();
    game.key_down(" ");
    let frame = game.frame(16.0);
    assert!(frame.events.contains(&GameEvent::Launched {
        vel: Vec2::new(0.0, -10.5)
    }));
}
