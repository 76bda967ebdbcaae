//! Neon Pinball - a small single-table pinball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, flippers, game state)
//! - `render`: Draw-command generation for a 2D canvas
//! - `ui`: HUD text fields and the game over overlay
//! - `input`: Keyboard mapping for flippers and launch
//! - `tuning`: Data-driven physics constants
//! - `game`: Frame loop driver

pub mod game;
pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::{FixedClock, FrameClock, Game, run};
pub use tuning::{Tuning, TuningError};

/// Table layout constants (canvas pixels, y grows downward)
pub mod consts {
    /// Canvas size
    pub const TABLE_WIDTH: f32 = 400.0;
    pub const TABLE_HEIGHT: f32 = 600.0;

    /// Side walls and ceiling
    pub const LEFT_WALL_X: f32 = 10.0;
    pub const RIGHT_WALL_X: f32 = 390.0;
    pub const TOP_WALL_Y: f32 = 0.0;
    /// Ball is lost once its top edge passes this line
    pub const DRAIN_Y: f32 = 600.0;

    /// Center barrier (horizontal band above the flippers)
    pub const BARRIER_Y: f32 = 550.0;
    pub const BARRIER_X_MIN: f32 = 100.0;
    pub const BARRIER_X_MAX: f32 = 300.0;
    /// Half-height of the band in which the barrier reacts
    pub const BARRIER_HALF_BAND: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_START_X: f32 = 200.0;
    pub const BALL_START_Y: f32 = 100.0;

    /// Flipper geometry
    pub const FLIPPER_LENGTH: f32 = 60.0;
    pub const FLIPPER_WIDTH: f32 = 10.0;
    pub const FLIPPER_PIVOT_Y: f32 = 520.0;
    pub const LEFT_FLIPPER_X: f32 = 120.0;
    pub const RIGHT_FLIPPER_X: f32 = 280.0;

    /// Bumper radius (all bumpers share it)
    pub const BUMPER_RADIUS: f32 = 15.0;

    /// Launch zone indicator rectangle (x, y, w, h)
    pub const LAUNCH_ZONE: (f32, f32, f32, f32) = (180.0, 20.0, 40.0, 80.0);

    /// Nominal frame interval for the synthetic clock (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
