//! Per-frame simulation tick
//!
//! One call advances the table by one animation frame.

use super::collision::resolve_collisions;
use super::flipper::update_flippers;
use super::physics::integrate;
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left flipper held
    pub left_flipper: bool,
    /// Right flipper held
    pub right_flipper: bool,
    /// Launch pressed since the last tick
    pub launch: bool,
}

/// Advance the game state by one frame.
///
/// `now_ms` is the host frame clock. Bumper lights expire against it even
/// while the game is stopped; physics and collisions only run while the game
/// is running. Flippers always follow their inputs.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.now_ms = now_ms;
    state.expire_bumper_hits();

    state.left_flipper.active = input.left_flipper;
    state.right_flipper.active = input.right_flipper;

    if input.launch {
        state.launch();
    }

    if state.running {
        integrate(&mut state.ball);
        resolve_collisions(state);
    }

    update_flippers(state);
}
