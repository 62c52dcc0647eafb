//! Idle/demo mode - picks a lane from a snapshot
//!
//! Every obstacle that reaches the edge unclaimed is a miss, so the pilot
//! chases whichever obstacle will arrive first and only uses the matchup to
//! break ties between obstacles arriving together.

use super::field::Lane;
use super::snapshot::Snapshot;
use super::symbol::{Outcome, resolve};

/// Obstacles within this vertical distance count as arriving together
const ARRIVAL_WINDOW: f32 = 2.0;

fn preference(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Win => 2,
        Outcome::Tie => 1,
        Outcome::Lose => 0,
    }
}

/// Lane the player should be in right now, if any obstacle is in flight
pub fn pick_lane(snapshot: &Snapshot) -> Option<Lane> {
    if snapshot.is_over() {
        return None;
    }
    let symbol = snapshot.symbol?;

    let front = snapshot
        .obstacles
        .iter()
        .map(|o| o.pos.y)
        .max_by(|a, b| a.total_cmp(b))?;

    snapshot
        .obstacles
        .iter()
        .filter(|o| front - o.pos.y <= ARRIVAL_WINDOW)
        .max_by(|a, b| {
            let pa = preference(resolve(symbol, a.symbol));
            let pb = preference(resolve(symbol, b.symbol));
            // Stay put when nothing is better
            let stay_a = a.target_lane == snapshot.lane;
            let stay_b = b.target_lane == snapshot.lane;
            pa.cmp(&pb)
                .then(stay_a.cmp(&stay_b))
                .then(a.pos.y.total_cmp(&b.pos.y))
        })
        .map(|o| o.target_lane)
}
