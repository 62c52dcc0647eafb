//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Triggers dispatched one at a time, in time order
//! - Seeded RNG only
//! - Stable iteration order (obstacle insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod field;
pub mod snapshot;
pub mod state;
pub mod symbol;
pub mod tick;

pub use clock::{GameClock, Trigger};
pub use field::{Lane, Obstacle, ObstacleField};
pub use snapshot::Snapshot;
pub use state::{GameEvent, GamePhase, GameSession, PlayerState};
pub use symbol::{Outcome, Symbol, resolve, rotate_symbol};
