//! Attack types and damage output

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::fighter::constants::{
    ATTACK_COOLDOWNS_MS, ATTACK_DURATIONS_MS, DAMAGE_MULTIPLIERS, KNOCKBACK_MULTIPLIERS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttackType {
    #[default]
    Light,
    Medium,
    Heavy,
}

impl AttackType {
    pub fn all() -> &'static [AttackType] {
        &[AttackType::Light, AttackType::Medium, AttackType::Heavy]
    }

    fn index(&self) -> usize {
        match self {
            AttackType::Light => 0,
            AttackType::Medium => 1,
            AttackType::Heavy => 2,
        }
    }

    /// Cooldown before the next swing, before the skill-delay multiplier
    pub fn cooldown_ms(&self) -> f32 {
        ATTACK_COOLDOWNS_MS[self.index()]
    }

    /// How long the swing's hitbox stays live
    pub fn duration_ms(&self) -> f32 {
        ATTACK_DURATIONS_MS[self.index()]
    }

    pub fn damage_multiplier(&self) -> f32 {
        DAMAGE_MULTIPLIERS[self.index()]
    }

    pub fn knockback_multiplier(&self) -> f32 {
        KNOCKBACK_MULTIPLIERS[self.index()]
    }
}

/// What the fighter's live hitbox belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strike {
    Normal(AttackType),
    Special,
}

impl Strike {
    pub fn is_special(&self) -> bool {
        matches!(self, Strike::Special)
    }
}

/// Damage and unscaled knockback produced by a strike
///
/// The victim's damage percentage is applied later, in `take_damage`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageOutput {
    pub amount: f32,
    pub knockback: Vec2,
}
