//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per animation frame, driven by a host clock
//! - Seeded RNG only
//! - Fixed collision order
//! - No rendering or platform dependencies

pub mod collision;
pub mod flipper;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{SegmentContact, closest_point_on_segment, flipper_contact, resolve_collisions};
pub use flipper::{update_flipper, update_flippers};
pub use physics::integrate;
pub use state::{Ball, Bumper, Flipper, FlipperSide, GameEvent, GameState, TABLE_WALLS, Wall};
pub use tick::{TickInput, tick};
