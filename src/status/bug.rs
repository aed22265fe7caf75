//! Bug mode: a timed bundle of debuffs rolled on taking damage

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::rng::roll;
use crate::core::types::TimeMs;
use crate::status::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BugEffect {
    ReversedControls,
    DisabledJump,
    RandomizedAttack,
    SlowedMovement,
    /// Rendering hint only
    VisualGlitch,
}

impl BugEffect {
    pub fn all() -> &'static [BugEffect] {
        &[
            BugEffect::ReversedControls,
            BugEffect::DisabledJump,
            BugEffect::RandomizedAttack,
            BugEffect::SlowedMovement,
            BugEffect::VisualGlitch,
        ]
    }

    pub fn affects_gameplay(&self) -> bool {
        !matches!(self, BugEffect::VisualGlitch)
    }
}

/// Invariant: `effects` is empty exactly when `is_active` is false
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugState {
    is_active: bool,
    remaining: TimeMs,
    effects: Vec<BugEffect>,
    trigger_chance: f32,
}

impl Default for BugState {
    fn default() -> Self {
        Self::for_robustness(0.5)
    }
}

impl BugState {
    pub fn for_robustness(robustness: f32) -> Self {
        Self {
            is_active: false,
            remaining: 0.0,
            effects: Vec::new(),
            trigger_chance: trigger_chance(robustness),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn remaining(&self) -> TimeMs {
        self.remaining
    }

    pub fn effects(&self) -> &[BugEffect] {
        &self.effects
    }

    pub fn has_effect(&self, effect: BugEffect) -> bool {
        self.effects.contains(&effect)
    }

    pub fn trigger_chance(&self) -> f32 {
        self.trigger_chance
    }

    /// Roll for a new or additional effect after a hit
    ///
    /// Returns the effect that was added, if any.
    pub fn on_take_damage(&mut self, rng: &mut impl Rng) -> Option<BugEffect> {
        if self.is_active {
            self.remaining = (self.remaining + BUG_EXTENSION_MS).min(MAX_BUG_DURATION_MS);
            if self.effects.len() >= MAX_BUG_EFFECTS || !roll(rng, EXTRA_EFFECT_CHANCE) {
                return None;
            }
            let candidates: Vec<BugEffect> = BugEffect::all()
                .iter()
                .copied()
                .filter(|e| !self.effects.contains(e))
                .collect();
            let effect = *candidates.choose(rng)?;
            self.effects.push(effect);
            return Some(effect);
        }

        if !roll(rng, self.trigger_chance) {
            return None;
        }
        let effect = *BugEffect::all().choose(rng)?;
        self.is_active = true;
        self.remaining = BUG_DURATION_MS;
        self.effects = vec![effect];
        Some(effect)
    }

    pub fn update(&mut self, delta: TimeMs) {
        if !self.is_active {
            return;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.is_active = false;
        self.remaining = 0.0;
        self.effects.clear();
    }
}

/// Chance to bug out on a hit; fragile characters bug out more often
///
/// Always strictly inside (0, 1).
pub fn trigger_chance(robustness: f32) -> f32 {
    (BASE_BUG_CHANCE * (1.5 - robustness.clamp(0.0, 1.0))).clamp(MIN_BUG_CHANCE, MAX_BUG_CHANCE)
}
