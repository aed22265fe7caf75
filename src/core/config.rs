//! Match configuration
//!
//! Everything an orchestrator needs to set up a match. Loadable from TOML;
//! every field has a default so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::{Difficulty, StageInfo};
use crate::core::error::{Result, SmashError};
use crate::roster::Companion;

/// One fighter slot in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    /// Roster name, matched case-insensitively
    pub character: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Built-in companion name, if any
    #[serde(default)]
    pub companion: Option<String>,
    /// Human slots get no AI controller; their input is injected
    #[serde(default)]
    pub is_human: bool,
}

impl Entrant {
    pub fn cpu(character: &str, difficulty: Difficulty) -> Self {
        Self {
            character: character.to_string(),
            difficulty,
            companion: None,
            is_human: false,
        }
    }

    pub fn with_companion(mut self, companion: &str) -> Self {
        self.companion = Some(companion.to_string());
        self
    }

    /// Resolve the companion name; no companion gives neutral multipliers
    pub fn resolve_companion(&self) -> Result<Companion> {
        match &self.companion {
            None => Ok(Companion::default()),
            Some(name) => {
                let companion = Companion::by_name(name).ok_or_else(|| {
                    SmashError::InvalidConfig(format!("unknown companion '{}'", name))
                })?;
                companion.validate()?;
                Ok(companion)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Lives per fighter
    pub starting_stocks: u32,

    /// Time between a KO and the respawn (ms)
    pub respawn_delay_ms: f32,

    /// Invincibility granted on respawn (ms)
    ///
    /// Should comfortably exceed one heavy swing so a camper at the spawn
    /// point cannot chain a fresh stock.
    pub respawn_invincibility_ms: f32,

    /// Hard stop for the match (ms); 0 disables the limit
    pub time_limit_ms: f32,

    /// Fixed simulation step (ms)
    pub frame_ms: f32,

    /// Master seed; every system derives its own stream from it
    pub seed: u64,

    pub stage: StageInfo,

    pub entrants: Vec<Entrant>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_stocks: 3,
            respawn_delay_ms: 1500.0,
            respawn_invincibility_ms: 2000.0,
            time_limit_ms: 180_000.0,
            frame_ms: 1000.0 / 60.0,
            seed: 42,
            stage: StageInfo::default(),
            entrants: vec![
                Entrant::cpu("Rust", Difficulty::Normal),
                Entrant::cpu("Python", Difficulty::Normal),
            ],
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: MatchConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_stocks == 0 {
            return Err(SmashError::InvalidConfig("starting_stocks must be at least 1".into()));
        }
        if self.respawn_delay_ms < 0.0 || self.respawn_invincibility_ms < 0.0 {
            return Err(SmashError::InvalidConfig(
                "respawn timings must be non-negative".into(),
            ));
        }
        if self.time_limit_ms < 0.0 {
            return Err(SmashError::InvalidConfig("time_limit_ms must be non-negative".into()));
        }
        if !(self.frame_ms > 0.0 && self.frame_ms <= 100.0) {
            return Err(SmashError::InvalidConfig(format!(
                "frame_ms ({}) must be in (0, 100]",
                self.frame_ms
            )));
        }
        self.stage.validate()?;

        if self.entrants.len() < 2 {
            return Err(SmashError::InvalidConfig(format!(
                "a match needs at least 2 entrants, got {}",
                self.entrants.len()
            )));
        }
        for entrant in &self.entrants {
            entrant.resolve_companion()?;
        }
        Ok(())
    }
}
