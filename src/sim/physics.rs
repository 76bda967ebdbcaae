//! Ball integration: gravity, friction, then position

use super::state::Ball;

/// Advance the ball by one frame.
///
/// Gravity is added to vy, both components are damped by friction, and the
/// damped velocity is added to the position.
#[inline]
pub fn integrate(ball: &mut Ball) {
    ball.vel.y += ball.gravity;
    ball.vel *= ball.friction;
    ball.pos += ball.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_integrate_from_rest() {
        let mut ball = Ball::new(&Tuning::default());
        integrate(&mut ball);
        // vy = (0 + 0.3) * 0.98
        assert!((ball.vel.y - 0.294).abs() < 1e-6);
        assert_eq!(ball.vel.x, 0.0);
        assert!((ball.pos.y - 100.294).abs() < 1e-4);
    }

    #[test]
    fn test_integrate_applies_friction_to_both_axes() {
        let mut ball = Ball::new(&Tuning::default());
        ball.vel = Vec2::new(10.0, -10.0);
        integrate(&mut ball);
        assert!((ball.vel.x - 9.8).abs() < 1e-5);
        assert!((ball.vel.y - (-9.7 * 0.98)).abs() < 1e-5);
        assert!((ball.pos.x - 209.8).abs() < 1e-4);
    }
}
