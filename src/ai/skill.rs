//! Difficulty tiers and the skill vector they map to
//!
//! Every rating is 0.0 to 1.0. Skill-gated rolls never fire at 0.0 and
//! always fire at 1.0.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
    Master,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Easy,
            Difficulty::Normal,
            Difficulty::Hard,
            Difficulty::Expert,
            Difficulty::Master,
        ]
    }

    /// Parse a tier name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiSkill {
    /// Shorter decision interval
    pub reaction_speed: f32,
    /// Less aim noise, landing prediction
    pub movement_precision: f32,
    /// Attacks from the edge of reach
    pub spacing_skill: f32,
    /// Longer and more frequent combos
    pub combo_ability: f32,
    /// Reads and avoids incoming attacks
    pub dodge_skill: f32,
    /// Chases fighters off the stage
    pub edgeguard_skill: f32,
    /// Gets back to the stage, uses directional influence
    pub recovery_skill: f32,
    /// Fewer input errors
    pub input_accuracy: f32,
    /// Works around its own debuffs and stun pressure
    pub adaptation_rate: f32,
}

impl Default for AiSkill {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Normal)
    }
}

impl AiSkill {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => Self {
                reaction_speed: 0.1,
                movement_precision: 0.2,
                spacing_skill: 0.1,
                combo_ability: 0.05,
                dodge_skill: 0.05,
                edgeguard_skill: 0.0,
                recovery_skill: 0.25,
                input_accuracy: 0.6,
                adaptation_rate: 0.0,
            },
            Difficulty::Easy => Self {
                reaction_speed: 0.3,
                movement_precision: 0.35,
                spacing_skill: 0.25,
                combo_ability: 0.2,
                dodge_skill: 0.15,
                edgeguard_skill: 0.1,
                recovery_skill: 0.4,
                input_accuracy: 0.75,
                adaptation_rate: 0.1,
            },
            Difficulty::Normal => Self {
                reaction_speed: 0.5,
                movement_precision: 0.55,
                spacing_skill: 0.45,
                combo_ability: 0.4,
                dodge_skill: 0.35,
                edgeguard_skill: 0.35,
                recovery_skill: 0.6,
                input_accuracy: 0.85,
                adaptation_rate: 0.3,
            },
            Difficulty::Hard => Self {
                reaction_speed: 0.7,
                movement_precision: 0.7,
                spacing_skill: 0.65,
                combo_ability: 0.6,
                dodge_skill: 0.55,
                edgeguard_skill: 0.55,
                recovery_skill: 0.75,
                input_accuracy: 0.92,
                adaptation_rate: 0.5,
            },
            Difficulty::Expert => Self {
                reaction_speed: 0.85,
                movement_precision: 0.85,
                spacing_skill: 0.8,
                combo_ability: 0.8,
                dodge_skill: 0.7,
                edgeguard_skill: 0.75,
                recovery_skill: 0.9,
                input_accuracy: 0.97,
                adaptation_rate: 0.75,
            },
            Difficulty::Master => Self {
                reaction_speed: 0.95,
                movement_precision: 0.95,
                spacing_skill: 0.95,
                combo_ability: 0.95,
                dodge_skill: 0.85,
                edgeguard_skill: 0.9,
                recovery_skill: 1.0,
                input_accuracy: 0.99,
                adaptation_rate: 0.9,
            },
        }
    }

    /// Every rating set to the same value, clamped to 0..=1
    pub fn uniform(value: f32) -> Self {
        let v = value.clamp(0.0, 1.0);
        Self {
            reaction_speed: v,
            movement_precision: v,
            spacing_skill: v,
            combo_ability: v,
            dodge_skill: v,
            edgeguard_skill: v,
            recovery_skill: v,
            input_accuracy: v,
            adaptation_rate: v,
        }
    }

    pub fn ratings(&self) -> [f32; 9] {
        [
            self.reaction_speed,
            self.movement_precision,
            self.spacing_skill,
            self.combo_ability,
            self.dodge_skill,
            self.edgeguard_skill,
            self.recovery_skill,
            self.input_accuracy,
            self.adaptation_rate,
        ]
    }

    /// Clamp every rating into 0..=1
    pub fn clamped(mut self) -> Self {
        for field in [
            &mut self.reaction_speed,
            &mut self.movement_precision,
            &mut self.spacing_skill,
            &mut self.combo_ability,
            &mut self.dodge_skill,
            &mut self.edgeguard_skill,
            &mut self.recovery_skill,
            &mut self.input_accuracy,
            &mut self.adaptation_rate,
        ] {
            *field = field.clamp(0.0, 1.0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tiers_in_range() {
        for tier in Difficulty::all() {
            let skill = AiSkill::for_difficulty(*tier);
            for rating in skill.ratings() {
                assert!((0.0..=1.0).contains(&rating), "{:?} has rating {}", tier, rating);
            }
        }
    }

    #[test]
    fn test_higher_tiers_never_worse() {
        let tiers = Difficulty::all();
        for pair in tiers.windows(2) {
            let low = AiSkill::for_difficulty(pair[0]).ratings();
            let high = AiSkill::for_difficulty(pair[1]).ratings();
            for (l, h) in low.iter().zip(high.iter()) {
                assert!(h >= l, "{:?} should not be worse than {:?}", pair[1], pair[0]);
            }
        }
    }

    #[test]
    fn test_uniform_clamps() {
        let skill = AiSkill::uniform(3.0);
        assert!(skill.ratings().iter().all(|r| *r == 1.0));
    }

    #[test]
    fn test_clamped() {
        let mut skill = AiSkill::uniform(0.5);
        skill.dodge_skill = -2.0;
        assert_eq!(skill.clamped().dodge_skill, 0.0);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(Difficulty::from_name("Expert"), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_name("nightmare"), None);
        assert!(Difficulty::Master > Difficulty::Beginner);
    }
}
