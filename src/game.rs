//! Frame loop driver
//!
//! [`Game`] owns the state and runs one tick + render + HUD sync per frame.
//! [`run`] is the explicit loop: it pulls timestamps from a [`FrameClock`]
//! until the clock stops or the sink breaks, handing every finished frame to
//! the sink. The browser
//! build drives [`Game::frame`] from `requestAnimationFrame` instead.

use std::ops::ControlFlow;

use crate::consts::FRAME_MS;
use crate::input::{Control, InputState, autopilot};
use crate::render::{DrawCmd, draw_frame};
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;
use crate::ui::{Hud, HudUpdate};

/// Source of frame timestamps (ms). `None` ends the loop.
pub trait FrameClock {
    fn next_frame(&mut self) -> Option<f64>;
}

/// Synthetic clock ticking at a fixed interval, optionally for a bounded
/// number of frames
#[derive(Debug, Clone)]
pub struct FixedClock {
    now_ms: f64,
    interval_ms: f64,
    remaining: Option<u64>,
}

impl FixedClock {
    /// A 60 Hz clock that never stops on its own
    pub fn new() -> Self {
        Self::with_interval(FRAME_MS)
    }

    pub fn with_interval(interval_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            interval_ms,
            remaining: None,
        }
    }

    /// Stop after `frames` frames
    pub fn limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for FixedClock {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.now_ms += self.interval_ms;
        Some(self.now_ms)
    }
}

/// Everything one frame produced
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub now_ms: f64,
    pub draw: Vec<DrawCmd>,
    pub hud: Vec<HudUpdate>,
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    input: InputState,
    hud: Hud,
    /// Demo mode: the autopilot plays instead of the keyboard
    pub autoplay: bool,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            input: InputState::new(),
            hud: Hud::new(),
            autoplay: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// "Start" button
    pub fn start(&mut self) {
        self.state.start();
    }

    /// "Reset" button. Held flipper keys stay held.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn key_down(&mut self, key: &str) -> Option<Control> {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> Option<Control> {
        self.input.key_up(key)
    }

    /// Release all held keys
    pub fn release_keys(&mut self) {
        self.input.clear();
    }

    /// Run one animation frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Frame {
        let input = if self.autoplay {
            // Keep the keyboard's one-shot launch from lingering
            self.input.take_tick_input();
            autopilot(&self.state)
        } else {
            self.input.take_tick_input()
        };

        tick(&mut self.state, &input, now_ms);

        Frame {
            now_ms,
            draw: draw_frame(&self.state),
            hud: self.hud.sync(&self.state),
            events: self.state.drain_events(),
        }
    }
}

/// Drive `game` until the clock runs out or `sink` returns `Break`.
/// Returns the number of frames run.
pub fn run<C, F>(game: &mut Game, clock: &mut C, mut sink: F) -> u64
where
    C: FrameClock,
    F: FnMut(&Game, &Frame) -> ControlFlow<()>,
{
    let mut frames = 0;
    while let Some(now_ms) = clock.next_frame() {
        let frame = game.frame(now_ms);
        frames += 1;
        if sink(game, &frame).is_break() {
            break;
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_limit() {
        let mut clock = FixedClock::with_interval(10.0).limit(3);
        assert_eq!(clock.next_frame(), Some(10.0));
        assert_eq!(clock.next_frame(), Some(20.0));
        assert_eq!(clock.next_frame(), Some(30.0));
        assert_eq!(clock.next_frame(), None);
    }

    #[test]
    fn test_run_counts_frames() {
        let mut game = Game::new(1);
        let mut clock = FixedClock::new().limit(5);
        let mut seen = 0;
        let frames = run(&mut game, &mut clock, |_, _| {
            seen += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(frames, 5);
        assert_eq!(seen, 5);
    }

    #[test]
    fn test_run_stops_when_sink_breaks() {
        let mut game = Game::new(1);
        game.start();
        game.state_mut().lives = 1;
        game.state_mut().ball.pos.y = 700.0;
        let mut clock = FixedClock::new().limit(100);
        let frames = run(&mut game, &mut clock, |_, frame| {
            if frame
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(frames, 1);
        assert!(game.state().is_game_over());
        assert!(clock.next_frame().is_some());
    }

    #[test]
    fn test_first_frame_publishes_hud() {
        let mut game = Game::new(1);
        let frame = game.frame(16.0);
        assert_eq!(frame.hud.len(), 3);
        assert!(!frame.draw.is_empty());
    }

    #[test]
    fn test_keyboard_launch() {
        let mut game = Game::new(1);
        game.start();
        game.key_down(" ");
        let frame = game.frame(16.0);
        assert!(game.state().launched());
        assert!(
            frame
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Launched { .. }))
        );
    }

    #[test]
    fn test_reset_keeps_held_flipper() {
        let mut game = Game::new(1);
        game.key_down("z");
        game.reset();
        game.frame(16.0);
        assert!(game.state().left_flipper.angle > 0.0);
        assert!(game.state().left_flipper.active);
    }
}
