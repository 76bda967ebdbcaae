//! Collision detection and response
//!
//! Checks run in a fixed order every frame: side walls, ceiling, drain,
//! bumpers, center barrier, then the left and right flippers. Several
//! responses may fire in one frame; a later one simply overwrites the
//! velocity set by an earlier one.

use glam::Vec2;

use super::state::{Ball, Flipper, FlipperSide, GameEvent, GameState};
use crate::consts::*;

/// Closest-point result for a ball against a line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentContact {
    /// Closest point on the segment to the ball center
    pub point: Vec2,
    /// Distance from the ball center to `point`
    pub distance: f32,
}

/// Run every collision check against the current ball position
pub fn resolve_collisions(state: &mut GameState) {
    let restitution = state.tuning.wall_restitution;

    resolve_side_walls(&mut state.ball, restitution);
    resolve_ceiling(&mut state.ball, restitution);

    if ball_drained(&state.ball) {
        state.lose_ball();
    }

    resolve_bumpers(state);
    resolve_barrier(state);

    resolve_flipper(state, FlipperSide::Left);
    resolve_flipper(state, FlipperSide::Right);
}

/// Keep the ball between the side walls. Returns true on contact.
pub fn resolve_side_walls(ball: &mut Ball, restitution: f32) -> bool {
    let mut hit = false;
    if ball.pos.x - ball.radius < LEFT_WALL_X {
        ball.pos.x = LEFT_WALL_X + ball.radius;
        ball.vel.x = ball.vel.x.abs() * restitution;
        hit = true;
    }
    if ball.pos.x + ball.radius > RIGHT_WALL_X {
        ball.pos.x = RIGHT_WALL_X - ball.radius;
        ball.vel.x = -ball.vel.x.abs() * restitution;
        hit = true;
    }
    hit
}

/// Bounce the ball down off the ceiling. There is no floor.
pub fn resolve_ceiling(ball: &mut Ball, restitution: f32) -> bool {
    if ball.pos.y - ball.radius < TOP_WALL_Y {
        ball.pos.y = TOP_WALL_Y + ball.radius;
        ball.vel.y = ball.vel.y.abs() * restitution;
        return true;
    }
    false
}

/// Ball has fallen fully past the bottom of the table
#[inline]
pub fn ball_drained(ball: &Ball) -> bool {
    ball.pos.y - ball.radius > DRAIN_Y
}

/// Circle-circle overlap (strict)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Velocity of `speed` pointing from `origin` toward `target`.
///
/// Coincident points kick along +x.
pub fn kick_away(origin: Vec2, target: Vec2, speed: f32) -> Vec2 {
    (target - origin).try_normalize().unwrap_or(Vec2::X) * speed
}

fn resolve_bumpers(state: &mut GameState) {
    let now = state.now_ms;
    let flash_ms = state.tuning.bumper_flash_ms;
    let kick_speed = state.tuning.bumper_kick_speed;

    for (index, bumper) in state.bumpers.iter_mut().enumerate() {
        if circles_overlap(state.ball.pos, state.ball.radius, bumper.pos, bumper.radius) {
            state.score += bumper.points;
            bumper.strike(now, flash_ms);
            state.ball.vel = kick_away(bumper.pos, state.ball.pos, kick_speed);
            state.events.push(GameEvent::BumperHit {
                index,
                points: bumper.points,
            });
        }
    }
}

/// Ball center is inside the barrier's horizontal band and x-span (open bounds)
pub fn in_barrier_zone(pos: Vec2) -> bool {
    pos.y > BARRIER_Y - BARRIER_HALF_BAND
        && pos.y < BARRIER_Y + BARRIER_HALF_BAND
        && pos.x > BARRIER_X_MIN
        && pos.x < BARRIER_X_MAX
}

fn resolve_barrier(state: &mut GameState) {
    if !in_barrier_zone(state.ball.pos) {
        return;
    }
    state.ball.vel.y = -state.ball.vel.y.abs() * state.tuning.wall_restitution;
    let points = state.tuning.barrier_points;
    state.score += points;
    state.events.push(GameEvent::BarrierHit { points });
}

/// Closest point on segment `a`-`b` to `p`, via a clamped projection
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> SegmentContact {
    let seg = b - a;
    let len_sq = seg.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let point = a + seg * t;
    SegmentContact {
        point,
        distance: p.distance(point),
    }
}

/// Contact between the ball and a flipper, if they touch
pub fn flipper_contact(ball: &Ball, flipper: &Flipper) -> Option<SegmentContact> {
    let contact = closest_point_on_segment(ball.pos, flipper.pivot, flipper.tip());
    (contact.distance < ball.radius + flipper.width / 2.0).then_some(contact)
}

fn resolve_flipper(state: &mut GameState, side: FlipperSide) {
    let Some(contact) = flipper_contact(&state.ball, state.flipper(side)) else {
        return;
    };
    state.ball.vel = kick_away(contact.point, state.ball.pos, state.tuning.flipper_kick_speed);
    let points = state.tuning.flipper_points;
    state.score += points;
    state.events.push(GameEvent::FlipperHit { side, points });
}
