//! Keyboard mapping
//!
//! `z` holds the left flipper, `m` the right, space launches. Held flippers
//! persist between frames; a launch press is consumed by the next tick.

use crate::sim::{FlipperSide, GameState, TickInput};

/// A game control bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Flipper(FlipperSide),
    Launch,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(Control::Launch),
            "z" | "Z" => Some(Control::Flipper(FlipperSide::Left)),
            "m" | "M" => Some(Control::Flipper(FlipperSide::Right)),
            _ => None,
        }
    }

    /// Whether the browser's default action (page scroll) should be suppressed
    pub fn prevents_default(self) -> bool {
        matches!(self, Control::Launch)
    }
}

/// Keyboard state accumulated between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    launch_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the control the key maps to, if any
    pub fn key_down(&mut self, key: &str) -> Option<Control> {
        let control = Control::from_key(key)?;
        match control {
            Control::Flipper(FlipperSide::Left) => self.left_held = true,
            Control::Flipper(FlipperSide::Right) => self.right_held = true,
            Control::Launch => self.launch_pending = true,
        }
        Some(control)
    }

    pub fn key_up(&mut self, key: &str) -> Option<Control> {
        let control = Control::from_key(key)?;
        match control {
            Control::Flipper(FlipperSide::Left) => self.left_held = false,
            Control::Flipper(FlipperSide::Right) => self.right_held = false,
            Control::Launch => {}
        }
        Some(control)
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build this frame's tick input, consuming the one-shot launch
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left_flipper: self.left_held,
            right_flipper: self.right_held,
            launch: self.launch_pending,
        };
        self.launch_pending = false;
        input
    }
}

/// Height below which the autopilot starts flipping
const AUTOPILOT_FLIP_Y: f32 = 470.0;

/// Demo-mode player: launches immediately and flips whichever flipper the
/// ball is dropping toward.
pub fn autopilot(state: &GameState) -> TickInput {
    let ball = &state.ball;
    let falling_low = ball.vel.y > 0.0 && ball.pos.y > AUTOPILOT_FLIP_Y;
    let mid_x = (state.left_flipper.pivot.x + state.right_flipper.pivot.x) / 2.0;
    TickInput {
        left_flipper: falling_low && ball.pos.x <= mid_x,
        right_flipper: falling_low && ball.pos.x > mid_x,
        launch: state.running && !state.launched(),
    }
}
