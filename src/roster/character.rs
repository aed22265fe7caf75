//! Character statistics tables
//!
//! These are read-only inputs to the combat formulas. The core never
//! changes them during a match.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SmashError};

/// Character archetype tag, drives AI personality defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Attacker,
    Defender,
    Trickster,
    Mage,
    Speedster,
    #[default]
    Balanced,
}

impl Archetype {
    pub fn all() -> &'static [Archetype] {
        &[
            Archetype::Attacker,
            Archetype::Defender,
            Archetype::Trickster,
            Archetype::Mage,
            Archetype::Speedster,
            Archetype::Balanced,
        ]
    }
}

/// Which stat feeds a special move's bonus damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    #[default]
    Physical,
    Logic,
}

/// A character's signature special move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialMove {
    pub name: String,
    pub damage_type: DamageType,
    /// Utility moves double as recovery tools
    #[serde(default)]
    pub utility: bool,
    pub base_power: f32,
    /// Reach in pixels before the attack-range multiplier
    pub range: f32,
    pub cooldown_ms: f32,
    pub duration_ms: f32,
}

impl Default for SpecialMove {
    fn default() -> Self {
        Self {
            name: "Hello World".to_string(),
            damage_type: DamageType::Physical,
            utility: false,
            base_power: 10.0,
            range: 120.0,
            cooldown_ms: 3000.0,
            duration_ms: 400.0,
        }
    }
}

/// Complete stat block for one playable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub name: String,
    #[serde(default)]
    pub archetype: Archetype,
    /// Movement multiplier (1.0 = baseline)
    pub speed: f32,
    /// Base damage of a light attack
    pub power: f32,
    /// Feeds logic-type special moves
    pub logic: f32,
    /// 0.0 to 1.0, raises the stack-overflow threshold
    pub memory_management: f32,
    /// 0.0 to 1.0, lowers the bug-mode trigger chance
    pub robustness: f32,
    #[serde(default)]
    pub special: SpecialMove,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            name: "Pseudocode".to_string(),
            archetype: Archetype::Balanced,
            speed: 1.0,
            power: 8.0,
            logic: 10.0,
            memory_management: 0.5,
            robustness: 0.5,
            special: SpecialMove::default(),
        }
    }
}

impl CharacterStats {
    /// Check that every rating lies in its documented range
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.memory_management) {
            return Err(SmashError::InvalidConfig(format!(
                "{}: memory_management ({}) must be within 0..=1",
                self.name, self.memory_management
            )));
        }
        if !(0.0..=1.0).contains(&self.robustness) {
            return Err(SmashError::InvalidConfig(format!(
                "{}: robustness ({}) must be within 0..=1",
                self.name, self.robustness
            )));
        }
        if self.speed <= 0.0 || self.power < 0.0 || self.logic < 0.0 {
            return Err(SmashError::InvalidConfig(format!(
                "{}: speed must be positive and power/logic non-negative",
                self.name
            )));
        }
        if self.special.cooldown_ms < 0.0 || self.special.duration_ms < 0.0 || self.special.range < 0.0 {
            return Err(SmashError::InvalidConfig(format!(
                "{}: special move timings and range must be non-negative",
                self.name
            )));
        }
        Ok(())
    }
}
