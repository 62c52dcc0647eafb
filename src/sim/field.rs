//! Lanes and the in-flight obstacle collection

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::symbol::Symbol;
use crate::consts::*;
use crate::error::GameError;
use crate::lane_center;

/// One of the three lanes, ordered left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Lane, GameError> {
        Lane::ALL
            .get(index)
            .copied()
            .ok_or_else(|| GameError::invalid("lane index", index))
    }

    /// Horizontal center coordinate of this lane
    pub fn center(self) -> f32 {
        lane_center(self.index())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Center => "center",
            Lane::Right => "right",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Lane {
        Lane::ALL[rng.random_range(0..Lane::ALL.len())]
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Lane::Left),
            "center" | "centre" | "c" => Ok(Lane::Center),
            "right" | "r" => Ok(Lane::Right),
            _ => Err(GameError::invalid("lane", s)),
        }
    }
}

/// A falling matchup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Reward token, uppercase ASCII
    pub letter: char,
    pub symbol: Symbol,
    pub target_lane: Lane,
    /// x = horizontal offset (eases toward lane center), y = vertical progress
    pub pos: Vec2,
}

impl Obstacle {
    pub fn horizontal(&self) -> f32 {
        self.pos.x
    }

    pub fn vertical(&self) -> f32 {
        self.pos.y
    }

    /// Reached the player edge
    pub fn at_edge(&self) -> bool {
        self.pos.y >= PLAYER_EDGE
    }

    fn step(&mut self, speed: f32, ease_fraction: f32) {
        self.pos.y = (self.pos.y + speed).min(PLAYER_EDGE);
        let target = self.target_lane.center();
        self.pos.x += (target - self.pos.x) * ease_fraction;
    }
}

/// Owns every in-flight obstacle, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn an obstacle with a random letter, symbol and target lane
    pub fn spawn(&mut self, rng: &mut impl Rng) -> Obstacle {
        let letter = LETTERS[rng.random_range(0..LETTERS.len())] as char;
        let symbol = Symbol::random(rng);
        let lane = Lane::random(rng);
        self.spawn_with(letter, symbol, lane)
    }

    /// Spawn a specific obstacle at the spawn edge
    pub fn spawn_with(&mut self, letter: char, symbol: Symbol, target_lane: Lane) -> Obstacle {
        let obstacle = Obstacle {
            id: self.next_id.max(1),
            letter,
            symbol,
            target_lane,
            pos: Vec2::new(SPAWN_X, SPAWN_EDGE),
        };
        self.next_id = obstacle.id + 1;
        self.obstacles.push(obstacle);
        obstacle
    }

    /// Move every obstacle one step toward the player
    pub fn advance(&mut self, speed: f32, ease_fraction: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.step(speed, ease_fraction);
        }
    }

    /// Remove by id; `None` if it was already gone
    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(index))
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Ids in insertion order (stable evaluation order)
    pub fn ids(&self) -> Vec<u32> {
        self.obstacles.iter().map(|o| o.id).collect()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_lane_index_roundtrip_and_bounds() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_index(lane.index()), Ok(lane));
        }
        assert!(matches!(
            Lane::from_index(3),
            Err(GameError::InvalidArgument { what: "lane index", .. })
        ));
        assert!("middle".parse::<Lane>().is_err());
        assert_eq!("Right".parse::<Lane>(), Ok(Lane::Right));
    }

    #[test]
    fn test_spawn_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        for _ in 0..50 {
            let o = field.spawn(&mut rng);
            assert!(o.letter.is_ascii_uppercase());
            assert_eq!(o.pos, Vec2::new(SPAWN_X, SPAWN_EDGE));
        }
        assert_eq!(field.len(), 50);

        // Ids are unique and increasing
        let ids = field.ids();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_advance_moves_down_and_eases() {
        let mut field = ObstacleField::new();
        let o = field.spawn_with('A', Symbol::Rock, Lane::Left);

        field.advance(2.0, EASE_FRACTION);
        let moved = field.get(o.id).unwrap();
        assert_eq!(moved.vertical(), 2.0);
        let expected_x = SPAWN_X + (Lane::Left.center() - SPAWN_X) * EASE_FRACTION;
        assert!((moved.horizontal() - expected_x).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_clamped_to_edge() {
        let mut field = ObstacleField::new();
        let o = field.spawn_with('B', Symbol::Paper, Lane::Right);
        for _ in 0..30 {
            field.advance(7.5, EASE_FRACTION);
        }
        let o = field.get(o.id).unwrap();
        assert_eq!(o.vertical(), PLAYER_EDGE);
        assert!(o.at_edge());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut field = ObstacleField::new();
        let a = field.spawn_with('A', Symbol::Rock, Lane::Left);
        let b = field.spawn_with('B', Symbol::Rock, Lane::Right);

        assert_eq!(field.remove(a.id).map(|o| o.letter), Some('A'));
        assert_eq!(field.remove(a.id), None);
        assert_eq!(field.ids(), vec![b.id]);
    }
}
