//! Per-frame intents
//!
//! Humans and CPU controllers both produce a `FighterInput`. Debuffs are
//! applied to the intent before the fighter acts on it.

use serde::{Deserialize, Serialize};

use crate::fighter::attack::AttackType;

/// Knockback damping toward a point during hitstun
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalInfluence {
    pub center_x: f32,
    /// 0.0 to 1.0
    pub strength: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FighterInput {
    /// -1.0 (left) to 1.0 (right)
    pub horizontal: f32,
    pub jump: bool,
    pub attack: Option<AttackType>,
    pub special: bool,
    pub sub_ability: bool,
    pub directional_influence: Option<DirectionalInfluence>,
}

impl FighterInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn moving(horizontal: f32) -> Self {
        Self {
            horizontal: horizontal.clamp(-1.0, 1.0),
            ..Default::default()
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_attack(mut self, attack: AttackType) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_special(mut self) -> Self {
        self.special = true;
        self
    }

    pub fn is_idle(&self) -> bool {
        self.horizontal == 0.0
            && !self.jump
            && self.attack.is_none()
            && !self.special
            && !self.sub_ability
    }
}

/// Which parts of an input actually took effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    pub moved: bool,
    pub jumped: bool,
    pub attacked: bool,
    pub special: bool,
    pub sub_ability: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let input = FighterInput::moving(3.0).with_jump().with_attack(AttackType::Heavy);
        assert_eq!(input.horizontal, 1.0);
        assert!(input.jump);
        assert_eq!(input.attack, Some(AttackType::Heavy));
        assert!(!input.is_idle());
        assert!(FighterInput::none().is_idle());
    }
}
