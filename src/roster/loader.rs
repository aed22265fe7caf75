//! Roster loading
//!
//! Loads character tables from `data/roster.toml`, or falls back to the
//! built-in roster compiled into the crate.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SmashError};
use crate::roster::character::{Archetype, CharacterStats, DamageType, SpecialMove};

/// The set of selectable characters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub characters: Vec<CharacterStats>,
}

impl Roster {
    /// Find a character by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&CharacterStats> {
        self.characters
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Like `get`, but unknown names are an error
    pub fn require(&self, name: &str) -> Result<&CharacterStats> {
        self.get(name)
            .ok_or_else(|| SmashError::UnknownCharacter(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.characters.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Parse and validate a roster from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let roster: Roster = toml::from_str(contents)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> Result<()> {
        if self.characters.is_empty() {
            return Err(SmashError::InvalidConfig("roster has no characters".into()));
        }
        for stats in &self.characters {
            stats.validate()?;
        }
        Ok(())
    }

    /// Built-in roster
    #[rustfmt::skip]
    pub fn builtin() -> Self {
        Self {
            characters: vec![
                character("Rust", Archetype::Defender, 0.95, 9.0, 12.0, 0.95, 0.9,
                    special("Borrow Checker", DamageType::Logic, false, 14.0, 120.0, 3500.0, 400.0)),
                character("C", Archetype::Attacker, 1.1, 10.0, 6.0, 0.2, 0.3,
                    special("Segfault", DamageType::Physical, false, 18.0, 90.0, 3000.0, 350.0)),
                character("C++", Archetype::Attacker, 1.0, 10.5, 9.0, 0.4, 0.4,
                    special("Template Explosion", DamageType::Physical, false, 20.0, 100.0, 4000.0, 500.0)),
                character("Python", Archetype::Mage, 0.9, 7.0, 16.0, 0.7, 0.6,
                    special("Import Antigravity", DamageType::Logic, true, 8.0, 150.0, 2500.0, 450.0)),
                character("JavaScript", Archetype::Trickster, 1.15, 7.5, 11.0, 0.5, 0.2,
                    special("Callback Hell", DamageType::Logic, false, 12.0, 160.0, 3000.0, 400.0)),
                character("Go", Archetype::Speedster, 1.3, 7.0, 8.0, 0.8, 0.7,
                    special("Goroutine Rush", DamageType::Physical, false, 12.0, 140.0, 2500.0, 300.0)),
                character("Haskell", Archetype::Mage, 0.85, 6.5, 18.0, 0.85, 0.95,
                    special("Monad Transform", DamageType::Logic, false, 16.0, 130.0, 4000.0, 500.0)),
                character("Java", Archetype::Defender, 0.9, 8.5, 10.0, 0.75, 0.7,
                    special("Garbage Collect", DamageType::Physical, true, 10.0, 110.0, 3500.0, 450.0)),
            ],
        }
    }
}

fn character(
    name: &str,
    archetype: Archetype,
    speed: f32,
    power: f32,
    logic: f32,
    memory_management: f32,
    robustness: f32,
    special: SpecialMove,
) -> CharacterStats {
    CharacterStats {
        name: name.to_string(),
        archetype,
        speed,
        power,
        logic,
        memory_management,
        robustness,
        special,
    }
}

fn special(
    name: &str,
    damage_type: DamageType,
    utility: bool,
    base_power: f32,
    range: f32,
    cooldown_ms: f32,
    duration_ms: f32,
) -> SpecialMove {
    SpecialMove {
        name: name.to_string(),
        damage_type,
        utility,
        base_power,
        range,
        cooldown_ms,
        duration_ms,
    }
}

/// Load a roster from a TOML file
pub fn load_roster(path: impl AsRef<Path>) -> Result<Roster> {
    let contents = fs::read_to_string(path.as_ref())?;
    Roster::from_toml_str(&contents)
}
