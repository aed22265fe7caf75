//! Equippable companions
//!
//! A companion rides along with a fighter and bends three of its numbers:
//! how long skills take, how hard logic specials hit, and how far attacks
//! reach. Some companions also carry a sub-ability on its own cooldown.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SmashError};

/// Sub-ability granted by a companion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionAbility {
    /// Snap back to the last safe grounded position
    Rewind,
    /// Brief invincibility
    Firewall,
}

impl CompanionAbility {
    pub fn cooldown_ms(&self) -> f32 {
        match self {
            CompanionAbility::Rewind => 8000.0,
            CompanionAbility::Firewall => 10000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    /// Scales attack and special cooldowns and durations (lower is faster)
    #[serde(default = "one")]
    pub skill_delay: f32,
    /// Scales the stat bonus of logic-type specials
    #[serde(default = "one")]
    pub logic_attack: f32,
    /// Scales attack and special reach
    #[serde(default = "one")]
    pub attack_range: f32,
    #[serde(default)]
    pub ability: Option<CompanionAbility>,
}

fn one() -> f32 {
    1.0
}

impl Default for Companion {
    fn default() -> Self {
        Self {
            name: "None".to_string(),
            skill_delay: 1.0,
            logic_attack: 1.0,
            attack_range: 1.0,
            ability: None,
        }
    }
}

impl Companion {
    pub fn linter() -> Self {
        Self {
            name: "Linter".to_string(),
            skill_delay: 0.85,
            ..Default::default()
        }
    }

    pub fn compiler() -> Self {
        Self {
            name: "Compiler".to_string(),
            logic_attack: 1.3,
            ..Default::default()
        }
    }

    pub fn profiler() -> Self {
        Self {
            name: "Profiler".to_string(),
            attack_range: 1.2,
            ..Default::default()
        }
    }

    pub fn debugger() -> Self {
        Self {
            name: "Debugger".to_string(),
            ability: Some(CompanionAbility::Rewind),
            ..Default::default()
        }
    }

    pub fn sandbox() -> Self {
        Self {
            name: "Sandbox".to_string(),
            skill_delay: 1.1,
            ability: Some(CompanionAbility::Firewall),
            ..Default::default()
        }
    }

    /// Look up one of the built-in companions by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linter" => Some(Self::linter()),
            "compiler" => Some(Self::compiler()),
            "profiler" => Some(Self::profiler()),
            "debugger" => Some(Self::debugger()),
            "sandbox" => Some(Self::sandbox()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.skill_delay <= 0.0 || self.logic_attack <= 0.0 || self.attack_range <= 0.0 {
            return Err(SmashError::InvalidConfig(format!(
                "{}: companion multipliers must be positive",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_companion_is_neutral() {
        let c = Companion::default();
        assert_eq!(c.skill_delay, 1.0);
        assert_eq!(c.logic_attack, 1.0);
        assert_eq!(c.attack_range, 1.0);
        assert!(c.ability.is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Companion::by_name("DEBUGGER").unwrap().ability, Some(CompanionAbility::Rewind));
        assert!(Companion::by_name("stack exchange").is_none());
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let mut c = Companion::linter();
        c.skill_delay = 0.0;
        assert!(matches!(c.validate(), Err(SmashError::InvalidConfig(_))));
        assert!(Companion::sandbox().validate().is_ok());
    }
}
