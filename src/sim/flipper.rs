//! Flipper actuation
//!
//! A held flipper swings toward its max angle by `flip_step` per frame; a
//! released one falls back toward rest by its signed `return_speed`. The angle
//! is clamped into the side's legal range afterwards.

use super::state::{Flipper, GameState};

/// Advance one flipper by a frame
pub fn update_flipper(flipper: &mut Flipper) {
    let sign = flipper.side.sign();
    // Deflection measured in the side's own direction (always >= 0 when legal)
    let deflection = flipper.angle * sign;

    if flipper.active && deflection < flipper.max_angle.abs() {
        flipper.angle += flipper.flip_step * sign;
    } else if !flipper.active && deflection > 0.0 {
        flipper.angle -= flipper.return_speed;
    }

    flipper.clamp_angle();
}

/// Advance both flippers
pub fn update_flippers(state: &mut GameState) {
    update_flipper(&mut state.left_flipper);
    update_flipper(&mut state.right_flipper);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FlipperSide;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_left_flipper_swings_up_and_clamps() {
        let mut flipper = Flipper::new(FlipperSide::Left, &Tuning::default());
        flipper.active = true;
        update_flipper(&mut flipper);
        assert!((flipper.angle - 0.15).abs() < 1e-6);
        update_flipper(&mut flipper);
        update_flipper(&mut flipper);
        assert_eq!(flipper.angle, 0.4);
        // Held at max
        update_flipper(&mut flipper);
        assert_eq!(flipper.angle, 0.4);
    }

    #[test]
    fn test_right_flipper_swings_negative() {
        let mut flipper = Flipper::new(FlipperSide::Right, &Tuning::default());
        flipper.active = true;
        for _ in 0..5 {
            update_flipper(&mut flipper);
        }
        assert_eq!(flipper.angle, -0.4);
    }

    #[test]
    fn test_release_returns_to_rest() {
        for side in [FlipperSide::Left, FlipperSide::Right] {
            let mut flipper = Flipper::new(side, &Tuning::default());
            flipper.active = true;
            for _ in 0..3 {
                update_flipper(&mut flipper);
            }
            flipper.active = false;
            update_flipper(&mut flipper);
            assert!(flipper.angle.abs() < 0.4, "{side:?} should start falling back");
            for _ in 0..3 {
                update_flipper(&mut flipper);
            }
            assert_eq!(flipper.angle, 0.0, "{side:?} should rest at 0");
        }
    }

    #[test]
    fn test_slow_return_speed() {
        let tuning = Tuning {
            flipper_return_speed: 0.05,
            ..Tuning::default()
        };
        let mut flipper = Flipper::new(FlipperSide::Right, &tuning);
        flipper.angle = -0.4;
        update_flipper(&mut flipper);
        assert!((flipper.angle + 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_idle_flipper_stays_at_rest() {
        let mut state = GameState::new(1);
        update_flippers(&mut state);
        assert_eq!(state.left_flipper.angle, 0.0);
        assert_eq!(state.right_flipper.angle, 0.0);
    }

    proptest! {
        #[test]
        fn prop_angle_stays_in_range(presses in prop::collection::vec(any::<(bool, bool)>(), 1..200)) {
            let mut state = GameState::new(3);
            for (left, right) in presses {
                state.left_flipper.active = left;
                state.right_flipper.active = right;
                update_flippers(&mut state);
                prop_assert!((0.0..=0.4).contains(&state.left_flipper.angle));
                prop_assert!((-0.4..=0.0).contains(&state.right_flipper.angle));
            }
        }
    }
}
