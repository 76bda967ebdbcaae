//! Data-driven game balance
//!
//! Every physics constant the table uses lives here. Defaults reproduce the
//! classic feel; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Physics and scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to vy every frame
    pub gravity: f32,
    /// Velocity retention applied every frame (0-1)
    pub friction: f32,
    /// Restitution for side walls, ceiling and the center barrier
    pub wall_restitution: f32,
    /// Speed the ball leaves a bumper with
    pub bumper_kick_speed: f32,
    /// Speed the ball leaves a flipper with
    pub flipper_kick_speed: f32,
    /// Angle change per frame while a flipper is held
    pub flipper_flip_step: f32,
    /// Angle change per frame while a flipper falls back (magnitude)
    pub flipper_return_speed: f32,
    /// Maximum flipper deflection (magnitude, radians)
    pub flipper_max_angle: f32,
    /// Points for touching the center barrier
    pub barrier_points: u64,
    /// Points for touching a flipper
    pub flipper_points: u64,
    /// How long a struck bumper stays lit (ms)
    pub bumper_flash_ms: f64,
    /// Lives at the start of a game
    pub starting_lives: u32,
    /// Base upward launch speed
    pub launch_speed: f32,
    /// Extra launch speed per level
    pub launch_speed_per_level: f32,
    /// Launch vx is drawn uniformly from [-spread, spread]
    pub launch_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            friction: 0.98,
            wall_restitution: 0.8,
            bumper_kick_speed: 8.0,
            flipper_kick_speed: 12.0,
            flipper_flip_step: 0.15,
            flipper_return_speed: 0.15,
            flipper_max_angle: 0.4,
            barrier_points: 50,
            flipper_points: 25,
            bumper_flash_ms: 200.0,
            starting_lives: 3,
            launch_speed: 8.0,
            launch_speed_per_level: 0.5,
            launch_spread: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the table's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(TuningError::Invalid {
                field: "friction",
                reason: "must be within [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.wall_restitution) {
            return Err(TuningError::Invalid {
                field: "wall_restitution",
                reason: "must be within [0, 1]",
            });
        }
        if self.flipper_max_angle <= 0.0 {
            return Err(TuningError::Invalid {
                field: "flipper_max_angle",
                reason: "must be positive",
            });
        }
        if self.flipper_flip_step <= 0.0 {
            return Err(TuningError::Invalid {
                field: "flipper_flip_step",
                reason: "must be positive",
            });
        }
        if self.flipper_return_speed <= 0.0 {
            return Err(TuningError::Invalid {
                field: "flipper_return_speed",
                reason: "must be positive",
            });
        }
        if self.bumper_flash_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "bumper_flash_ms",
                reason: "must not be negative",
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.launch_spread < 0.0 {
            return Err(TuningError::Invalid {
                field: "launch_spread",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
