//! Behavior selection, evaluated once per decision tick
//!
//! Priority order: recover, defend, edgeguard, special, then distance bands.

use rand::Rng;

use crate::ai::behavior::AiBehavior;
use crate::ai::constants::*;
use crate::ai::personality::AiPersonality;
use crate::ai::skill::AiSkill;
use crate::ai::stage::StageInfo;
use crate::core::rng::roll;
use crate::fighter::Fighter;

/// Everything a decision looks at
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub me: &'a Fighter,
    pub target: Option<&'a Fighter>,
    pub stage: &'a StageInfo,
    pub skill: &'a AiSkill,
    pub personality: &'a AiPersonality,
    /// Own fighter is stunned by a stack overflow
    pub stunned: bool,
}

pub fn needs_recovery(me: &Fighter, stage: &StageInfo) -> bool {
    stage.is_off_stage(me.position) || stage.is_below_stage(me.position, RECOVER_FALL_THRESHOLD)
}

/// Distance the AI likes to fight from
pub fn optimal_range(me: &Fighter) -> f32 {
    me.attack_range() * OPTIMAL_RANGE_FACTOR
}

/// Chance to open with the special move against a target at `target_damage`
pub fn special_chance(personality: &AiPersonality, target_damage: f32, utility: bool) -> f32 {
    let damage_bias = (target_damage / SPECIAL_DAMAGE_DIVISOR).min(SPECIAL_DAMAGE_BIAS_CAP);
    let utility_bias = if utility { SPECIAL_UTILITY_BIAS } else { 0.0 };
    (personality.special_usage * SPECIAL_USAGE_WEIGHT + damage_bias + utility_bias).clamp(0.0, 1.0)
}

pub fn choose_behavior(ctx: &DecisionContext<'_>, rng: &mut impl Rng) -> AiBehavior {
    let me = ctx.me;

    if needs_recovery(me, ctx.stage) {
        return AiBehavior::Recover;
    }

    let Some(target) = ctx.target else {
        return AiBehavior::Idle;
    };
    let distance = me.position.distance(&target.position);

    // A failed dodge read is the only way out of this branch, so an
    // unskilled AI never picks Defend against a live swing.
    let threatened = target.is_attacking() && distance <= DEFEND_PROXIMITY;
    if threatened && roll(rng, ctx.skill.dodge_skill) {
        return AiBehavior::Defend;
    }

    if ctx.skill.edgeguard_skill > EDGEGUARD_SKILL_FLOOR
        && ctx.stage.is_off_stage(target.position)
        && target.velocity.y > 0.0
        && me.is_grounded()
    {
        return AiBehavior::Edgeguard;
    }

    if !ctx.stunned
        && me.can_use_special()
        && distance <= me.special_range()
        && roll(
            rng,
            special_chance(ctx.personality, target.damage(), me.stats.special.utility),
        )
    {
        return AiBehavior::Special;
    }

    let optimal = optimal_range(me);
    if distance <= optimal + SPACING_MARGIN {
        if !ctx.stunned && roll(rng, ctx.personality.aggression) {
            AiBehavior::Attack
        } else if me.damage() > RETREAT_DAMAGE || ctx.stunned {
            AiBehavior::Retreat
        } else if threatened {
            // Trade instead of dodging
            AiBehavior::Attack
        } else {
            AiBehavior::Defend
        }
    } else if distance <= MEDIUM_RANGE {
        if distance <= optimal + SPACING_MARGIN + ctx.skill.spacing_skill * SPACING_HOLD_BAND {
            AiBehavior::Idle
        } else {
            AiBehavior::Chase
        }
    } else {
        AiBehavior::Chase
    }
}
