//! Session state and player inputs
//!
//! `GameSession` is the single owner of the obstacle field, the player and the
//! phase. Hosts mutate it only through `choose_symbol`, `set_lane`, `tick` and
//! `dispatch`, and read it only through `snapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::field::{Lane, ObstacleField};
use super::snapshot::Snapshot;
use super::symbol::{Outcome, Symbol};
use crate::error::GameError;
use crate::settings::Settings;

/// Top-level session phase; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick a starting symbol
    SelectingSymbol,
    /// Active gameplay
    Playing,
    /// Lives exhausted (terminal)
    GameOver,
}

/// Something the host may want to react to (sound, flash, log line)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { phase: GamePhase },
    Spawned { id: u32, letter: char, symbol: Symbol, lane: Lane },
    Resolved { id: u32, outcome: Outcome, points: u64 },
    Missed { id: u32 },
    SpeedRamped { speed: f32 },
    GameOver { score: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub lane: Lane,
    /// `None` only while selecting
    pub symbol: Option<Symbol>,
    pub score: u64,
    pub lives: u8,
    pub letters: Vec<char>,
}

impl PlayerState {
    pub fn new(lives: u8) -> Self {
        Self {
            lane: Lane::default(),
            symbol: None,
            score: 0,
            lives,
            letters: Vec::new(),
        }
    }

    /// Lose one life; returns true when none remain
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

pub struct GameSession {
    pub(crate) settings: Settings,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) player: PlayerState,
    pub(crate) field: ObstacleField,
    pub(crate) clock: GameClock,
    pub(crate) speed: f32,
    /// Advance ticks processed while playing
    pub(crate) advance_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new session with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::SelectingSymbol,
            player: PlayerState::new(settings.starting_lives),
            field: ObstacleField::new(),
            clock: GameClock::new(&settings),
            speed: settings.initial_speed,
            advance_ticks: 0,
            events: Vec::new(),
            settings,
        }
    }

    /// Pick the starting symbol and begin play (ignored outside selection)
    pub fn choose_symbol(&mut self, symbol: Symbol) {
        if self.phase != GamePhase::SelectingSymbol {
            log::debug!("choose_symbol({}) ignored in {:?}", symbol, self.phase);
            return;
        }
        self.player.symbol = Some(symbol);
        self.clock.start();
        self.set_phase(GamePhase::Playing);
    }

    /// Move the player (ignored outside play)
    pub fn set_lane(&mut self, lane: Lane) {
        if !self.is_active() {
            return;
        }
        self.player.lane = lane;
    }

    /// Place a specific obstacle at the spawn edge (scripted waves, tutorials)
    pub fn inject_obstacle(
        &mut self,
        letter: char,
        symbol: Symbol,
        lane: Lane,
    ) -> Result<Option<u32>, GameError> {
        if !letter.is_ascii_uppercase() {
            return Err(GameError::invalid("letter", letter));
        }
        if !self.is_active() {
            return Ok(None);
        }
        let obstacle = self.field.spawn_with(letter, symbol, lane);
        self.events.push(GameEvent::Spawned {
            id: obstacle.id,
            letter,
            symbol,
            lane,
        });
        Ok(Some(obstacle.id))
    }

    /// Tear down all triggers (host unmounted); later ticks are no-ops
    pub fn shutdown(&mut self) {
        if self.clock.is_running() {
            log::info!("Session shut down in {:?}", self.phase);
        }
        self.clock.cancel();
    }

    /// Playing with live triggers
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing && self.clock.is_running()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            active: self.is_active(),
            lane: self.player.lane,
            symbol: self.player.symbol,
            score: self.player.score,
            lives: self.player.lives,
            letters: self.player.letters.clone(),
            speed: self.speed,
            ticks: self.advance_ticks,
            obstacles: self.field.iter().copied().collect(),
        }
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged { phase });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_selecting() {
        let session = GameSession::new(1, Settings::default());
        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::SelectingSymbol);
        assert_eq!(snap.symbol, None);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.lane, Lane::Center);
        assert!(snap.obstacles.is_empty());
    }

    #[test]
    fn test_choose_symbol_once() {
        let mut session = GameSession::new(1, Settings::default());
        session.choose_symbol(Symbol::Rock);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.is_active());

        // Second choice is ignored
        session.choose_symbol(Symbol::Paper);
        assert_eq!(session.snapshot().symbol, Some(Symbol::Rock));

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged { phase: GamePhase::Playing }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_set_lane_only_while_playing() {
        let mut session = GameSession::new(1, Settings::default());
        session.set_lane(Lane::Left);
        assert_eq!(session.snapshot().lane, Lane::Center);

        session.choose_symbol(Symbol::Scissors);
        session.set_lane(Lane::Left);
        assert_eq!(session.snapshot().lane, Lane::Left);

        session.shutdown();
        session.set_lane(Lane::Right);
        assert_eq!(session.snapshot().lane, Lane::Left);
    }

    #[test]
    fn test_shutdown_visible_in_snapshot() {
        let mut session = GameSession::new(1, Settings::default());
        assert!(!session.snapshot().active);

        session.choose_symbol(Symbol::Rock);
        assert!(session.snapshot().active);

        session.shutdown();
        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(!snap.active);
    }

    #[test]
    fn test_inject_validates_letter() {
        let mut session = GameSession::new(1, Settings::default());
        session.choose_symbol(Symbol::Rock);
        assert!(matches!(
            session.inject_obstacle('a', Symbol::Rock, Lane::Left),
            Err(GameError::InvalidArgument { what: "letter", .. })
        ));
        assert!(session.inject_obstacle('Q', Symbol::Rock, Lane::Left).unwrap().is_some());
    }

    #[test]
    fn test_inject_ignored_before_play() {
        let mut session = GameSession::new(1, Settings::default());
        assert_eq!(session.inject_obstacle('Q', Symbol::Rock, Lane::Left), Ok(None));
        assert!(session.snapshot().obstacles.is_empty());
    }

    #[test]
    fn test_player_lives_saturate() {
        let mut player = PlayerState::new(1);
        assert!(player.lose_life());
        assert!(player.lose_life());
        assert_eq!(player.lives, 0);
    }
}
