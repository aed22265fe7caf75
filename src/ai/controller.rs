//! AiController: one per CPU fighter
//!
//! Reads the arena, never mutates it. `update` returns an intent that the
//! orchestrator runs through `StatusEffectSystem::filter_input` before
//! handing it to `Fighter::apply_input`.

use rand::Rng;

use crate::ai::behavior::{AiBehavior, AiState, InputError};
use crate::ai::constants::*;
use crate::ai::decision::{choose_behavior, DecisionContext};
use crate::ai::execution::{directional_influence, error_input, execute, prepare, ExecutionContext};
use crate::ai::personality::AiPersonality;
use crate::ai::skill::{AiSkill, Difficulty};
use crate::ai::stage::StageInfo;
use crate::ai::targeting::select_target;
use crate::arena::FighterArena;
use crate::core::rng::{roll, seeded, signed_unit, GameRng};
use crate::core::types::{FighterId, TimeMs};
use crate::fighter::FighterInput;
use crate::roster::Archetype;
use crate::status::{BugEffect, StatusEffectSystem};

#[derive(Debug, Clone)]
pub struct AiController {
    pub fighter_id: FighterId,
    pub skill: AiSkill,
    pub personality: AiPersonality,
    state: AiState,
    rng: GameRng,
    last_decision_at: Option<TimeMs>,
}

impl AiController {
    pub fn new(fighter_id: FighterId, difficulty: Difficulty, archetype: Archetype, seed: u64) -> Self {
        Self::with_skill(
            fighter_id,
            AiSkill::for_difficulty(difficulty),
            AiPersonality::for_archetype(archetype),
            seed,
        )
    }

    pub fn with_skill(
        fighter_id: FighterId,
        skill: AiSkill,
        personality: AiPersonality,
        seed: u64,
    ) -> Self {
        Self {
            fighter_id,
            skill: skill.clamped(),
            personality,
            state: AiState::new(),
            rng: seeded(seed),
            last_decision_at: None,
        }
    }

    pub fn state(&self) -> &AiState {
        &self.state
    }

    pub fn behavior(&self) -> AiBehavior {
        self.state.behavior
    }

    pub fn target(&self) -> Option<FighterId> {
        self.state.target
    }

    pub fn last_decision_at(&self) -> Option<TimeMs> {
        self.last_decision_at
    }

    /// Drop all behavior state, e.g. when the fighter is knocked out
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Run one frame: re-decide when the timer is up, then execute
    pub fn update(
        &mut self,
        time: TimeMs,
        delta: TimeMs,
        arena: &FighterArena,
        stage: &StageInfo,
        status: &StatusEffectSystem,
    ) -> FighterInput {
        let Some(me) = arena.get(self.fighter_id) else {
            return FighterInput::none();
        };
        if !me.is_active() {
            self.state.reset();
            return FighterInput::none();
        }

        self.state.tick(delta.max(0.0));
        if self.state.decision_timer <= 0.0 {
            self.decide(arena, stage, status);
            self.last_decision_at = Some(time);
        }

        if me.in_hitstun() {
            return FighterInput {
                directional_influence: directional_influence(me, stage, &self.skill),
                ..FighterInput::none()
            };
        }

        let target = self
            .state
            .target
            .and_then(|id| arena.get(id))
            .filter(|t| t.is_active());
        let ctx = ExecutionContext {
            me,
            target,
            stage,
            skill: &self.skill,
        };

        let mut input = if self.state.has_input_error() {
            error_input(&mut self.state, &ctx)
        } else {
            execute(&mut self.state, &ctx, &mut self.rng)
        };
        if self.state.compensate_reversal {
            input.horizontal = -input.horizontal;
        }
        input
    }

    /// Pick a target and behavior now, and make the per-decision rolls
    pub fn decide(
        &mut self,
        arena: &FighterArena,
        stage: &StageInfo,
        status: &StatusEffectSystem,
    ) -> AiBehavior {
        let Some(me) = arena.get(self.fighter_id) else {
            return self.state.behavior;
        };
        self.state.decision_timer = decision_interval(self.skill.reaction_speed);
        self.state.target = select_target(me, arena);
        let target = self.state.target.and_then(|id| arena.get(id));

        let ctx = DecisionContext {
            me,
            target,
            stage,
            skill: &self.skill,
            personality: &self.personality,
            stunned: status.is_stunned(self.fighter_id),
        };
        let behavior = choose_behavior(&ctx, &mut self.rng);
        let entered = behavior != self.state.behavior;
        if entered {
            tracing::trace!(
                "{} AI {:?} -> {:?} (target {:?})",
                self.fighter_id,
                self.state.behavior,
                behavior,
                self.state.target
            );
            self.state.enter(behavior);
        }
        prepare(&mut self.state, &self.skill, entered, &mut self.rng);

        self.state.aim_offset =
            signed_unit(&mut self.rng) * (1.0 - self.skill.movement_precision) * AIM_NOISE;

        if !roll(&mut self.rng, self.skill.input_accuracy) {
            let errors = InputError::all();
            self.state.input_error = Some(errors[self.rng.gen_range(0..errors.len())]);
            self.state.error_timer = INPUT_ERROR_MS;
        }

        self.state.compensate_reversal = status.has_effect(self.fighter_id, BugEffect::ReversedControls)
            && roll(&mut self.rng, self.skill.adaptation_rate);

        let threshold = status.threshold(self.fighter_id);
        self.state.pacing_attacks = threshold > 0
            && status.attack_count(self.fighter_id) + OVERFLOW_PACING_MARGIN >= threshold
            && roll(&mut self.rng, self.skill.adaptation_rate);

        behavior
    }
}
