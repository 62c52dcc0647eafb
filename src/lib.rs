//! Lane Clash - a three-lane rock/paper/scissors arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacles, scoring, phases, clock)
//! - `settings`: Session configuration and variant presets
//! - `error`: Error taxonomy for malformed inputs and config

pub mod error;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::{MissPolicy, Settings, TiePolicy, Variant};

/// Game configuration constants
pub mod consts {
    /// Width of one lane in field units (field is 0..100 wide)
    pub const LANE_WIDTH: f32 = 33.33;
    /// Offset from a lane's left edge to its center
    pub const LANE_CENTER_OFFSET: f32 = 16.67;

    /// Horizontal spawn coordinate (center of the field)
    pub const SPAWN_X: f32 = 50.0;
    /// Vertical edge where obstacles enter
    pub const SPAWN_EDGE: f32 = 0.0;
    /// Vertical edge at the player's row
    pub const PLAYER_EDGE: f32 = 100.0;

    /// Vertical position at which an obstacle in the player's lane collides
    pub const ARRIVAL_THRESHOLD: f32 = 90.0;
    /// Fraction of the remaining horizontal distance closed per advance
    pub const EASE_FRACTION: f32 = 0.1;

    /// Trigger cadences (milliseconds)
    pub const SPAWN_PERIOD_MS: u64 = 3000;
    pub const ADVANCE_PERIOD_MS: u64 = 100;
    pub const RAMP_PERIOD_MS: u64 = 10_000;

    /// Speed factor at session start, and per-ramp increment
    pub const INITIAL_SPEED: f32 = 1.0;
    pub const SPEED_INCREMENT: f32 = 0.1;

    /// Points per resolution outcome
    pub const WIN_POINTS: u64 = 2;
    pub const TIE_POINTS: u64 = 1;

    /// Letters an obstacle may carry
    pub const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
}

/// Horizontal center coordinate of the lane at `index` (0, 1 or 2)
#[inline]
pub fn lane_center(index: usize) -> f32 {
    index as f32 * consts::LANE_WIDTH + consts::LANE_CENTER_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers() {
        assert!((lane_center(0) - 16.67).abs() < 1e-4);
        assert!((lane_center(1) - 50.0).abs() < 1e-4);
        assert!((lane_center(2) - 83.33).abs() < 1e-4);
    }
}
