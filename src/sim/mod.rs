//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One synchronous state transition per tick
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, distance_to_apple};
pub use collision::{CollisionKind, check_collision, eats_apple, hits_wall};
pub use state::{Direction, GameEvent, GameState, Position, Snake, Snapshot};
pub use tick::{TickInput, advance, tick};
