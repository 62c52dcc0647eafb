//! Periodic trigger scheduling
//!
//! The clock never mutates game state. It converts elapsed time into logical
//! triggers, yielded in the order they fired, that the session dispatches one
//! at a time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One logical timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Spawn,
    Advance,
    Ramp,
}

impl Trigger {
    /// Tie-break when several timers fire on the same millisecond
    fn rank(self) -> u8 {
        match self {
            Trigger::Spawn => 0,
            Trigger::Advance => 1,
            Trigger::Ramp => 2,
        }
    }
}

/// A single fixed-period timer
#[derive(Debug, Clone)]
struct Periodic {
    period_ms: u64,
    elapsed_ms: u64,
}

impl Periodic {
    fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Milliseconds until the next firing (always at least 1)
    fn due_in(&self) -> u64 {
        self.period_ms - self.elapsed_ms
    }

    fn pass(&mut self, ms: u64) {
        self.elapsed_ms = (self.elapsed_ms + ms % self.period_ms) % self.period_ms;
    }
}

/// Three independent timers driving spawn, advance and speed ramp
///
/// Elapsed time is fed in with `advance`; firings are then pulled one at a
/// time with `next_trigger`, so a caller that stops pulling (session over)
/// never pays for the rest of a long window.
#[derive(Debug, Clone)]
pub struct GameClock {
    spawn: Periodic,
    advance: Periodic,
    ramp: Periodic,
    /// Whole milliseconds fed in but not yet consumed by firings
    pending_ms: u64,
    /// Sub-millisecond remainder carried between ticks
    carry_us: u64,
    running: bool,
}

impl GameClock {
    pub fn new(settings: &Settings) -> Self {
        Self {
            spawn: Periodic::new(settings.spawn_period_ms),
            advance: Periodic::new(settings.advance_period_ms),
            ramp: Periodic::new(settings.ramp_period_ms),
            pending_ms: 0,
            carry_us: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop all timers and drop any pending partial periods and queued firings
    pub fn cancel(&mut self) {
        self.running = false;
        self.spawn.elapsed_ms = 0;
        self.advance.elapsed_ms = 0;
        self.ramp.elapsed_ms = 0;
        self.pending_ms = 0;
        self.carry_us = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed `elapsed` into the timers; drain firings with `next_trigger`
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.running {
            return;
        }
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let total_us = self.carry_us.saturating_add(elapsed_us);
        self.carry_us = total_us % 1000;
        self.pending_ms = self.pending_ms.saturating_add(total_us / 1000);
    }

    /// Earliest firing within the fed window, ties broken spawn, advance, ramp
    pub fn next_trigger(&mut self) -> Option<Trigger> {
        if !self.running {
            return None;
        }
        let (due, trigger) = [
            (self.spawn.due_in(), Trigger::Spawn),
            (self.advance.due_in(), Trigger::Advance),
            (self.ramp.due_in(), Trigger::Ramp),
        ]
        .into_iter()
        .min_by_key(|&(due, trigger)| (due, trigger.rank()))?;

        if due > self.pending_ms {
            // Nothing else fires in this window; bank the remainder
            let rest = std::mem::take(&mut self.pending_ms);
            self.spawn.pass(rest);
            self.advance.pass(rest);
            self.ramp.pass(rest);
            return None;
        }
        self.pending_ms -= due;
        self.spawn.pass(due);
        self.advance.pass(due);
        self.ramp.pass(due);
        Some(trigger)
    }
}
