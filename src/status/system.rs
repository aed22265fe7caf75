//! StatusEffectSystem: per-fighter stun and debuff tables
//!
//! Owns every `StackOverflowState` and `BugState`. Other systems only read
//! them through the query methods. Fighters that were never registered
//! degrade to "no status" answers.

use ahash::AHashMap;
use rand::Rng;

use crate::core::rng::{seeded, GameRng};
use crate::core::types::{FighterId, TimeMs};
use crate::fighter::{AttackType, FighterInput};
use crate::roster::CharacterStats;
use crate::status::bug::{BugEffect, BugState};
use crate::status::constants::SLOWED_MOVEMENT_FACTOR;
use crate::status::stack_overflow::StackOverflowState;

#[derive(Debug, Clone)]
pub struct StatusEffectSystem {
    overflow: AHashMap<FighterId, StackOverflowState>,
    bugs: AHashMap<FighterId, BugState>,
    rng: GameRng,
}

impl Default for StatusEffectSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusEffectSystem {
    /// Create with the default seed
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            overflow: AHashMap::new(),
            bugs: AHashMap::new(),
            rng: seeded(seed),
        }
    }

    pub fn register(&mut self, id: FighterId, stats: &CharacterStats) {
        self.overflow
            .insert(id, StackOverflowState::for_memory_management(stats.memory_management));
        self.bugs.insert(id, BugState::for_robustness(stats.robustness));
    }

    pub fn unregister(&mut self, id: FighterId) {
        self.overflow.remove(&id);
        self.bugs.remove(&id);
    }

    pub fn is_registered(&self, id: FighterId) -> bool {
        self.overflow.contains_key(&id)
    }

    /// Rate-limit an attack attempt; false when the attack is rejected
    ///
    /// Unregistered fighters are not rate limited.
    pub fn on_attack(&mut self, id: FighterId, time: TimeMs) -> bool {
        let Some(state) = self.overflow.get_mut(&id) else {
            return true;
        };
        let was_stunned = state.is_stunned;
        let allowed = state.record_attack(time);
        if !was_stunned && state.is_stunned {
            tracing::debug!(
                "{} stack overflow: stunned for {:.0}ms (threshold {})",
                id,
                state.stun_duration,
                state.threshold
            );
        }
        allowed
    }

    /// Roll bug mode after a hit; returns the effect that was added
    pub fn on_take_damage(&mut self, id: FighterId) -> Option<BugEffect> {
        let state = self.bugs.get_mut(&id)?;
        let was_active = state.is_active();
        let effect = state.on_take_damage(&mut self.rng)?;
        if was_active {
            tracing::debug!("{} bug mode worsened: {:?}", id, effect);
        } else {
            tracing::debug!("{} entered bug mode: {:?}", id, effect);
        }
        Some(effect)
    }

    pub fn update(&mut self, id: FighterId, delta: TimeMs) {
        if let Some(state) = self.overflow.get_mut(&id) {
            state.update(delta);
        }
        if let Some(state) = self.bugs.get_mut(&id) {
            let was_active = state.is_active();
            state.update(delta);
            if was_active && !state.is_active() {
                tracing::debug!("{} bug mode cleared", id);
            }
        }
    }

    pub fn update_all(&mut self, delta: TimeMs) {
        let mut ids: Vec<FighterId> = self.overflow.keys().copied().collect();
        ids.sort();
        for id in ids {
            self.update(id, delta);
        }
    }

    /// Reset both mechanics, used on respawn
    pub fn clear_effects(&mut self, id: FighterId) {
        if let Some(state) = self.overflow.get_mut(&id) {
            state.clear();
        }
        if let Some(state) = self.bugs.get_mut(&id) {
            state.clear();
        }
    }

    // ===== QUERIES =====

    pub fn is_stunned(&self, id: FighterId) -> bool {
        self.overflow.get(&id).map(|s| s.is_stunned).unwrap_or(false)
    }

    pub fn stun_remaining(&self, id: FighterId) -> TimeMs {
        self.overflow.get(&id).map(|s| s.stun_timer).unwrap_or(0.0)
    }

    pub fn attack_count(&self, id: FighterId) -> u32 {
        self.overflow.get(&id).map(|s| s.attack_count).unwrap_or(0)
    }

    pub fn threshold(&self, id: FighterId) -> u32 {
        self.overflow.get(&id).map(|s| s.threshold).unwrap_or(0)
    }

    pub fn is_bugged(&self, id: FighterId) -> bool {
        self.bugs.get(&id).map(|s| s.is_active()).unwrap_or(false)
    }

    pub fn active_effects(&self, id: FighterId) -> Vec<BugEffect> {
        self.bugs
            .get(&id)
            .map(|s| s.effects().to_vec())
            .unwrap_or_default()
    }

    pub fn has_effect(&self, id: FighterId, effect: BugEffect) -> bool {
        self.bugs.get(&id).map(|s| s.has_effect(effect)).unwrap_or(false)
    }

    /// Renderer hint: draw this fighter glitched
    pub fn render_glitched(&self, id: FighterId) -> bool {
        self.has_effect(id, BugEffect::VisualGlitch)
    }

    pub fn bug_state(&self, id: FighterId) -> Option<&BugState> {
        self.bugs.get(&id)
    }

    pub fn overflow_state(&self, id: FighterId) -> Option<&StackOverflowState> {
        self.overflow.get(&id)
    }

    // ===== INPUT GATING =====

    /// Apply the fighter's stun and debuffs to an intent
    pub fn filter_input(&mut self, id: FighterId, input: FighterInput) -> FighterInput {
        let mut filtered = input;

        if self.is_stunned(id) {
            filtered.attack = None;
            filtered.special = false;
            filtered.sub_ability = false;
        }

        let Some(bug) = self.bugs.get(&id) else {
            return filtered;
        };
        if !bug.is_active() {
            return filtered;
        }

        for effect in bug.effects() {
            match effect {
                BugEffect::ReversedControls => filtered.horizontal = -filtered.horizontal,
                BugEffect::DisabledJump => filtered.jump = false,
                BugEffect::RandomizedAttack => {
                    if filtered.attack.is_some() {
                        let all = AttackType::all();
                        filtered.attack = Some(all[self.rng.gen_range(0..all.len())]);
                    }
                }
                BugEffect::SlowedMovement => filtered.horizontal *= SLOWED_MOVEMENT_FACTOR,
                BugEffect::VisualGlitch => {}
            }
        }
        filtered
    }
}
