//! Read-only view handed to renderers

use serde::{Deserialize, Serialize};

use super::field::{Lane, Obstacle};
use super::state::GamePhase;
use super::symbol::Symbol;

/// Owned copy of the session state taken after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    /// Triggers still live (false after game over or shutdown)
    pub active: bool,
    pub lane: Lane,
    pub symbol: Option<Symbol>,
    pub score: u64,
    pub lives: u8,
    pub letters: Vec<char>,
    pub speed: f32,
    /// Advance ticks processed so far
    pub ticks: u64,
    /// In-flight obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
}

impl Snapshot {
    /// Letters joined for the game-over screen ("A, B, C")
    pub fn letters_display(&self) -> String {
        self.letters
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Obstacles heading for `lane`, nearest to the player first
    pub fn incoming(&self, lane: Lane) -> impl Iterator<Item = &Obstacle> {
        let mut in_lane: Vec<&Obstacle> = self
            .obstacles
            .iter()
            .filter(|o| o.target_lane == lane)
            .collect();
        in_lane.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));
        in_lane.into_iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameSession;

    #[test]
    fn test_snapshot_is_detached() {
        let mut session = GameSession::new(3, Settings::default());
        session.choose_symbol(Symbol::Rock);
        session.inject_obstacle('Z', Symbol::Paper, Lane::Left).unwrap();

        let mut snap = session.snapshot();
        snap.obstacles.clear();
        snap.score = 1000;

        let fresh = session.snapshot();
        assert_eq!(fresh.obstacles.len(), 1);
        assert_eq!(fresh.score, 0);
    }

    #[test]
    fn test_letters_display_and_json() {
        let mut session = GameSession::new(3, Settings::default());
        session.choose_symbol(Symbol::Rock);
        let mut snap = session.snapshot();
        snap.letters = vec!['A', 'B', 'C'];
        assert_eq!(snap.letters_display(), "A, B, C");

        let json = snap.to_json().unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Playing);
        assert_eq!(back.letters, snap.letters);
    }

    #[test]
    fn test_incoming_orders_nearest_first() {
        let mut session = GameSession::new(3, Settings::default());
        session.choose_symbol(Symbol::Rock);
        session.inject_obstacle('A', Symbol::Paper, Lane::Left).unwrap();
        session.dispatch(crate::sim::Trigger::Advance);
        session.inject_obstacle('B', Symbol::Paper, Lane::Left).unwrap();
        session.inject_obstacle('C', Symbol::Paper, Lane::Right).unwrap();

        let snap = session.snapshot();
        let letters: Vec<char> = snap.incoming(Lane::Left).map(|o| o.letter).collect();
        assert_eq!(letters, vec!['A', 'B']);
    }
}
