//! Rock/paper/scissors symbols and matchup resolution

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Rock,
    Paper,
    Scissors,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Rock, Symbol::Paper, Symbol::Scissors];

    /// The symbol this one defeats
    pub fn beats(self) -> Symbol {
        match self {
            Symbol::Rock => Symbol::Scissors,
            Symbol::Paper => Symbol::Rock,
            Symbol::Scissors => Symbol::Paper,
        }
    }

    /// The two symbols that are not `self`, in declaration order
    pub fn others(self) -> [Symbol; 2] {
        match self {
            Symbol::Rock => [Symbol::Paper, Symbol::Scissors],
            Symbol::Paper => [Symbol::Rock, Symbol::Scissors],
            Symbol::Scissors => [Symbol::Rock, Symbol::Paper],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Rock => "rock",
            Symbol::Paper => "paper",
            Symbol::Scissors => "scissors",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Symbol {
        Symbol::ALL[rng.random_range(0..Symbol::ALL.len())]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" | "r" => Ok(Symbol::Rock),
            "paper" | "p" => Ok(Symbol::Paper),
            "scissors" | "s" => Ok(Symbol::Scissors),
            _ => Err(GameError::invalid("symbol", s)),
        }
    }
}

/// Result of a matchup, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Tie,
    Win,
    Lose,
}

/// Resolve the player's symbol against an obstacle's symbol
pub fn resolve(player: Symbol, obstacle: Symbol) -> Outcome {
    if player == obstacle {
        Outcome::Tie
    } else if obstacle.beats() == player {
        Outcome::Lose
    } else {
        Outcome::Win
    }
}

/// Pick uniformly between the two symbols other than `current`
pub fn rotate_symbol(current: Symbol, rng: &mut impl Rng) -> Symbol {
    let others = current.others();
    others[rng.random_range(0..others.len())]
}
