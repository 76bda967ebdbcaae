//! Canvas draw-command generation
//!
//! [`draw_frame`] is a pure function of the game state. The browser build
//! replays the commands on a `CanvasRenderingContext2d`; tests inspect them
//! directly.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Flipper, GameState};

/// Neon palette (CSS color strings)
pub mod palette {
    pub const BACKGROUND: &str = "#0f0c29";
    pub const WALL: &str = "#00d4ff";
    pub const BARRIER: &str = "#ff006e";
    pub const BUMPER: &str = "#00ff88";
    pub const BUMPER_LIT: &str = "#ffff00";
    pub const BUMPER_RING: &str = "#00d4ff";
    pub const BALL: &str = "#ff006e";
    pub const BALL_RING: &str = "#ffff00";
    pub const FLIPPER: &str = "#00d4ff";
    pub const FLIPPER_ACTIVE: &str = "#ffff00";
    pub const PIVOT: &str = "#00d4ff";
    pub const LAUNCH_ZONE: &str = "rgba(0, 212, 255, 0.5)";
}

/// Radius of the dot drawn at each flipper pivot
const PIVOT_RADIUS: f32 = 5.0;

/// A single 2D drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole canvas
    Clear { color: &'static str },
    /// Stroke a straight line
    Line {
        from: Vec2,
        to: Vec2,
        color: &'static str,
        width: f32,
        round_cap: bool,
    },
    /// Fill a circle, optionally outlining it
    Circle {
        center: Vec2,
        radius: f32,
        fill: &'static str,
        outline: Option<(&'static str, f32)>,
    },
    /// Stroke a dashed rectangle
    DashedRect {
        origin: Vec2,
        size: Vec2,
        color: &'static str,
        width: f32,
        dash: [f32; 2],
    },
}

/// Build the draw list for the current state
pub fn draw_frame(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(8 + state.bumpers.len() + 4);

    cmds.push(DrawCmd::Clear {
        color: palette::BACKGROUND,
    });

    // Side walls
    for x in [LEFT_WALL_X, RIGHT_WALL_X] {
        cmds.push(DrawCmd::Line {
            from: Vec2::new(x, TOP_WALL_Y),
            to: Vec2::new(x, DRAIN_Y),
            color: palette::WALL,
            width: 3.0,
            round_cap: false,
        });
    }

    // Center barrier
    cmds.push(DrawCmd::Line {
        from: Vec2::new(BARRIER_X_MIN, BARRIER_Y),
        to: Vec2::new(BARRIER_X_MAX, BARRIER_Y),
        color: palette::BARRIER,
        width: 4.0,
        round_cap: false,
    });

    for bumper in &state.bumpers {
        cmds.push(DrawCmd::Circle {
            center: bumper.pos,
            radius: bumper.radius,
            fill: if bumper.hit {
                palette::BUMPER_LIT
            } else {
                palette::BUMPER
            },
            outline: Some((palette::BUMPER_RING, 2.0)),
        });
    }

    cmds.push(DrawCmd::Circle {
        center: state.ball.pos,
        radius: state.ball.radius,
        fill: palette::BALL,
        outline: Some((palette::BALL_RING, 2.0)),
    });

    push_flipper(&mut cmds, &state.left_flipper);
    push_flipper(&mut cmds, &state.right_flipper);

    if state.running && !state.launched() {
        let (x, y, w, h) = LAUNCH_ZONE;
        cmds.push(DrawCmd::DashedRect {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color: palette::LAUNCH_ZONE,
            width: 2.0,
            dash: [5.0, 5.0],
        });
    }

    cmds
}

fn push_flipper(cmds: &mut Vec<DrawCmd>, flipper: &Flipper) {
    cmds.push(DrawCmd::Line {
        from: flipper.pivot,
        to: flipper.tip(),
        color: if flipper.active {
            palette::FLIPPER_ACTIVE
        } else {
            palette::FLIPPER
        },
        width: flipper.width,
        round_cap: true,
    });
    cmds.push(DrawCmd::Circle {
        center: flipper.pivot,
        radius: PIVOT_RADIUS,
        fill: palette::PIVOT,
        outline: None,
    });
}
