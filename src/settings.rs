//! Session settings and variant presets
//!
//! Loaded from an optional JSON file; every field falls back to the preset default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Single life; any loss or miss ends the run
    Classic,
    /// Three lives; losses and misses each cost one
    #[default]
    Lives,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Lives => "Lives",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "simple" => Some(Variant::Classic),
            "lives" => Some(Variant::Lives),
            _ => None,
        }
    }

    pub fn starting_lives(&self) -> u8 {
        match self {
            Variant::Classic => 1,
            Variant::Lives => 3,
        }
    }

    pub fn miss_policy(&self) -> MissPolicy {
        match self {
            Variant::Classic => MissPolicy::EndGame,
            Variant::Lives => MissPolicy::LoseLife,
        }
    }

    pub fn tie_policy(&self) -> TiePolicy {
        match self {
            Variant::Classic => TiePolicy::AwardLetter,
            Variant::Lives => TiePolicy::PointsOnly,
        }
    }
}

/// What happens when an obstacle reaches the player edge unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissPolicy {
    EndGame,
    LoseLife,
}

/// What a tie awards beyond its point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiePolicy {
    /// +1, letter collected and symbol rotated, like a win
    AwardLetter,
    /// +1 only; letters and symbol untouched
    PointsOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    pub starting_lives: u8,
    pub miss_policy: MissPolicy,
    pub tie_policy: TiePolicy,

    // === Cadence ===
    pub spawn_period_ms: u64,
    pub advance_period_ms: u64,
    pub ramp_period_ms: u64,

    // === Kinematics ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub arrival_threshold: f32,
    pub ease_fraction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl Settings {
    /// Create settings from a variant (applies the variant's policies)
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            starting_lives: variant.starting_lives(),
            miss_policy: variant.miss_policy(),
            tie_policy: variant.tie_policy(),

            spawn_period_ms: SPAWN_PERIOD_MS,
            advance_period_ms: ADVANCE_PERIOD_MS,
            ramp_period_ms: RAMP_PERIOD_MS,

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            arrival_threshold: ARRIVAL_THRESHOLD,
            ease_fraction: EASE_FRACTION,
        }
    }

    /// Switch variant, resetting the policies it governs
    pub fn apply_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.starting_lives = variant.starting_lives();
        self.miss_policy = variant.miss_policy();
        self.tie_policy = variant.tie_policy();
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_lives == 0 {
            return Err(GameError::invalid("starting_lives", self.starting_lives));
        }
        for (what, period) in [
            ("spawn_period_ms", self.spawn_period_ms),
            ("advance_period_ms", self.advance_period_ms),
            ("ramp_period_ms", self.ramp_period_ms),
        ] {
            if period == 0 {
                return Err(GameError::invalid(what, period));
            }
        }
        if !(self.initial_speed >= 1.0) || !self.initial_speed.is_finite() {
            return Err(GameError::invalid("initial_speed", self.initial_speed));
        }
        if !(self.speed_increment >= 0.0) || !self.speed_increment.is_finite() {
            return Err(GameError::invalid("speed_increment", self.speed_increment));
        }
        if !(SPAWN_EDGE..PLAYER_EDGE).contains(&self.arrival_threshold) {
            return Err(GameError::invalid("arrival_threshold", self.arrival_threshold));
        }
        if !(self.ease_fraction > 0.0 && self.ease_fraction <= 1.0) {
            return Err(GameError::invalid("ease_fraction", self.ease_fraction));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {} ({})", path.display(), settings.variant.as_str());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_presets() {
        let classic = Settings::from_variant(Variant::Classic);
        assert_eq!(classic.starting_lives, 1);
        assert_eq!(classic.miss_policy, MissPolicy::EndGame);
        assert_eq!(classic.tie_policy, TiePolicy::AwardLetter);

        let lives = Settings::default();
        assert_eq!(lives.variant, Variant::Lives);
        assert_eq!(lives.starting_lives, 3);
        assert_eq!(lives.miss_policy, MissPolicy::LoseLife);
        assert_eq!(lives.tie_policy, TiePolicy::PointsOnly);
        assert!(lives.validate().is_ok());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("CLASSIC"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("lives"), Some(Variant::Lives));
        assert_eq!(Variant::from_str("hard"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "spawn_period_ms": 1500 }"#).unwrap();
        assert_eq!(settings.spawn_period_ms, 1500);
        assert_eq!(settings.advance_period_ms, ADVANCE_PERIOD_MS);
        assert_eq!(settings.starting_lives, 3);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "advance_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument { what: "advance_period_ms", .. }));

        let err = Settings::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument { what: "starting_lives", .. }));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }
}
