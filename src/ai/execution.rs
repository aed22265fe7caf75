//! Per-frame behavior execution
//!
//! Each behavior turns the current situation into a `FighterInput`. Some
//! behaviors end themselves (timeouts, finished combos) by switching the
//! state back to `Idle`.

use rand::Rng;

use crate::ai::behavior::{AiBehavior, AiState, InputError};
use crate::ai::constants::*;
use crate::ai::skill::AiSkill;
use crate::ai::stage::StageInfo;
use crate::core::rng::roll;
use crate::fighter::{AttackType, DirectionalInfluence, Fighter, FighterInput};
use crate::roster::CompanionAbility;

/// Fraction of reach the AI closes to before swinging, at spacing 0 and 1
const ATTACK_BAND_BASE: f32 = 0.6;
const ATTACK_BAND_SPACING: f32 = 0.35;
const REWIND_RECOVERY_SKILL: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub me: &'a Fighter,
    pub target: Option<&'a Fighter>,
    pub stage: &'a StageInfo,
    pub skill: &'a AiSkill,
}

impl ExecutionContext<'_> {
    /// -1 or 1 toward the target; current facing when there is none
    fn toward_target(&self) -> f32 {
        match self.target {
            Some(t) if t.position.x < self.me.position.x => -1.0,
            Some(_) => 1.0,
            None => self.me.facing.sign(),
        }
    }
}

/// Rolls made once per decision for the behavior just chosen
pub fn prepare(state: &mut AiState, skill: &AiSkill, entered: bool, rng: &mut impl Rng) {
    match state.behavior {
        AiBehavior::Attack if entered => {
            let length = if roll(rng, skill.combo_ability) {
                rng.gen_range(2..=4)
            } else {
                1
            };
            state.combo_counter = length;
            state.combo_length = length;
        }
        AiBehavior::Defend if entered => {
            state.dodge_jump_pending = roll(rng, skill.dodge_skill * DODGE_JUMP_FACTOR);
        }
        AiBehavior::Recover => {
            if roll(rng, (1.0 - skill.recovery_skill) * WRONG_DIRECTION_CHANCE) {
                state.wrong_direction_timer = WRONG_DIRECTION_MS;
            }
        }
        _ => {}
    }
}

pub fn execute(state: &mut AiState, ctx: &ExecutionContext<'_>, rng: &mut impl Rng) -> FighterInput {
    match state.behavior {
        AiBehavior::Idle => FighterInput::none(),
        AiBehavior::Chase => chase(state, ctx),
        AiBehavior::Attack => attack(state, ctx, rng),
        AiBehavior::Defend => defend(state, ctx),
        AiBehavior::Retreat => retreat(state, ctx),
        AiBehavior::Special => special(state, ctx),
        AiBehavior::Recover => recover(state, ctx, rng),
        AiBehavior::Edgeguard => edgeguard(state, ctx),
    }
}

/// Substitute input while an input error is active
pub fn error_input(state: &mut AiState, ctx: &ExecutionContext<'_>) -> FighterInput {
    match state.input_error {
        Some(InputError::WrongDirection) => {
            let dir = if state.last_direction != 0.0 {
                -state.last_direction
            } else {
                -ctx.toward_target()
            };
            FighterInput::moving(dir)
        }
        Some(InputError::MistimedAttack) => {
            // One bad swing, then stand there for the rest of the window
            state.input_error = Some(InputError::Hesitate);
            FighterInput::none().with_attack(AttackType::Light)
        }
        Some(InputError::Hesitate) | None => FighterInput::none(),
    }
}

/// Knockback damping toward center stage while in hitstun
pub fn directional_influence(
    me: &Fighter,
    stage: &StageInfo,
    skill: &AiSkill,
) -> Option<DirectionalInfluence> {
    if !me.in_hitstun() || skill.recovery_skill <= DI_SKILL_THRESHOLD {
        return None;
    }
    Some(DirectionalInfluence {
        center_x: stage.center_x(),
        strength: skill.recovery_skill * DI_MAX_STRENGTH,
    })
}

/// Attack type for the next hit of a combo
fn combo_attack(state: &AiState, target_damage: f32) -> AttackType {
    if state.combo_length <= 1 {
        return if target_damage >= KILL_PERCENT {
            AttackType::Heavy
        } else {
            AttackType::Light
        };
    }
    if state.combo_counter == 1 {
        AttackType::Heavy
    } else if state.combo_counter == state.combo_length {
        AttackType::Light
    } else {
        AttackType::Medium
    }
}

fn chase(state: &mut AiState, ctx: &ExecutionContext<'_>) -> FighterInput {
    let Some(target) = ctx.target else {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    };
    let me = ctx.me;

    let mut aim_x = target.position.x;
    if ctx.skill.movement_precision > PREDICTION_PRECISION
        && !target.is_grounded()
        && target.velocity.y > 0.0
    {
        aim_x += target.velocity.x * PREDICTION_LOOKAHEAD_S;
    }
    aim_x += state.aim_offset;

    let dx = aim_x - me.position.x;
    let mut dir = if dx.abs() > ARRIVE_TOLERANCE { dx.signum() } else { 0.0 };

    // Don't follow someone off the stage
    if dir != 0.0
        && ctx.stage.is_off_stage(target.position)
        && ctx.stage.distance_to_edge_ahead(me.position.x, dir) < EDGE_MARGIN
    {
        dir = 0.0;
    }
    if dir != 0.0 {
        state.last_direction = dir;
    }

    let mut input = FighterInput::moving(dir);
    if me.is_grounded() && target.position.y < me.position.y - JUMP_HEIGHT_TRIGGER {
        input.jump = true;
    }
    input
}

fn attack(state: &mut AiState, ctx: &ExecutionContext<'_>, rng: &mut impl Rng) -> FighterInput {
    let Some(target) = ctx.target else {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    };
    let me = ctx.me;
    let toward = ctx.toward_target();
    let distance = me.position.distance(&target.position);
    let band = me.attack_range() * (ATTACK_BAND_BASE + ATTACK_BAND_SPACING * ctx.skill.spacing_skill);

    if distance > band {
        state.last_direction = toward;
        return FighterInput::moving(toward);
    }
    if me.facing.sign() != toward {
        return FighterInput::moving(toward * FACE_NUDGE);
    }
    if state.pacing_attacks {
        return FighterInput::none();
    }
    if state.combo_counter == 0 {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    }

    let chance = ATTACK_BASE_CHANCE + (1.0 - ATTACK_BASE_CHANCE) * ctx.skill.combo_ability;
    if me.can_attack() && !me.is_attacking() && roll(rng, chance) {
        let attack_type = combo_attack(state, target.damage());
        state.combo_counter -= 1;
        return FighterInput::none().with_attack(attack_type);
    }
    FighterInput::none()
}

fn defend(state: &mut AiState, ctx: &ExecutionContext<'_>) -> FighterInput {
    if state.action_timer >= defend_duration(ctx.skill.reaction_speed) {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    }
    let me = ctx.me;
    let away = -ctx.toward_target();

    let mut input = FighterInput::moving(away);
    if ctx.stage.distance_to_edge_ahead(me.position.x, away) < EDGE_MARGIN {
        input.horizontal = 0.0;
    }
    if state.dodge_jump_pending && me.is_grounded() {
        input.jump = true;
        state.dodge_jump_pending = false;
    }
    input
}

fn retreat(state: &mut AiState, ctx: &ExecutionContext<'_>) -> FighterInput {
    if ctx.target.is_none() {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    }
    let me = ctx.me;
    let away = -ctx.toward_target();

    if ctx.stage.distance_to_edge_ahead(me.position.x, away) < EDGE_MARGIN {
        // Cornered: jump over the opponent
        let mut input = FighterInput::moving(-away);
        input.jump = me.is_grounded();
        state.last_direction = -away;
        return input;
    }
    state.last_direction = away;
    FighterInput::moving(away)
}

fn special(state: &mut AiState, ctx: &ExecutionContext<'_>) -> FighterInput {
    let me = ctx.me;
    if !me.can_use_special() {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    }
    let toward = ctx.toward_target();
    if me.facing.sign() != toward {
        FighterInput::moving(toward * FACE_NUDGE).with_special()
    } else {
        FighterInput::none().with_special()
    }
}

fn recover(state: &mut AiState, ctx: &ExecutionContext<'_>, rng: &mut impl Rng) -> FighterInput {
    let me = ctx.me;
    let stage = ctx.stage;
    let skill = ctx.skill;

    let dx = stage.center_x() - me.position.x;
    let center_dir = if dx.abs() > ARRIVE_TOLERANCE { dx.signum() } else { 0.0 };
    let dir = if state.wrong_direction_timer > 0.0 {
        -center_dir
    } else {
        center_dir
    };
    state.last_direction = dir;
    let mut input = FighterInput::moving(dir);

    if me.is_grounded() || me.velocity.y <= 0.0 {
        return input;
    }

    // Falling from here on
    let depth = me.position.y - stage.ground_y;
    if me.air_jumps_remaining() > 0 {
        let reserve = skill.recovery_skill >= RESERVE_JUMP_SKILL;
        if !reserve || depth > RESERVE_JUMP_DEPTH {
            input.jump = true;
        }
        return input;
    }

    if me.stats.special.utility && me.can_use_special() && roll(rng, skill.recovery_skill) {
        input.special = true;
        return input;
    }

    if depth > UTILITY_RECOVERY_DEPTH
        && skill.recovery_skill >= REWIND_RECOVERY_SKILL
        && me.companion.ability == Some(CompanionAbility::Rewind)
        && me.has_sub_ability_ready()
        && roll(rng, skill.recovery_skill)
    {
        input.sub_ability = true;
    }
    input
}

fn edgeguard(state: &mut AiState, ctx: &ExecutionContext<'_>) -> FighterInput {
    if state.action_timer >= EDGEGUARD_TIMEOUT_MS {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    }
    let Some(target) = ctx.target else {
        state.enter(AiBehavior::Idle);
        return FighterInput::none();
    };
    let me = ctx.me;
    let stage = ctx.stage;

    let edge = stage.nearest_edge(target.position.x);
    let post = if edge <= stage.center_x() {
        edge + EDGE_MARGIN
    } else {
        edge - EDGE_MARGIN
    };
    let dx = post - me.position.x;
    if dx.abs() > ARRIVE_TOLERANCE {
        state.last_direction = dx.signum();
        return FighterInput::moving(dx.signum());
    }

    let toward = ctx.toward_target();
    if me.facing.sign() != toward {
        return FighterInput::moving(toward * FACE_NUDGE);
    }
    let distance = me.position.distance(&target.position);
    if distance <= me.attack_range() && me.can_attack() && !state.pacing_attacks {
        return FighterInput::none().with_attack(AttackType::Heavy);
    }
    FighterInput::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;
    use crate::core::types::{Facing, FighterId, Vec2};
    use crate::roster::{CharacterStats, Companion};

    fn grounded(id: u32, x: f32) -> Fighter {
        let mut f = Fighter::cpu(FighterId(id), CharacterStats::default(), Vec2::new(x, 600.0));
        f.set_grounded(true);
        f
    }

    fn state_in(behavior: AiBehavior) -> AiState {
        let mut state = AiState::new();
        state.enter(behavior);
        state
    }

    #[test]
    fn test_chase_moves_toward_target() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let me = grounded(0, 400.0);
        let target = grounded(1, 800.0);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Chase);
        let input = chase(&mut state, &ctx);
        assert_eq!(input.horizontal, 1.0);
        assert!(!input.jump);
    }

    #[test]
    fn test_chase_jumps_at_high_target() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let me = grounded(0, 400.0);
        let mut target = grounded(1, 500.0);
        target.position.y = 400.0;
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Chase);
        assert!(chase(&mut state, &ctx).jump);
    }

    #[test]
    fn test_chase_stops_at_edge_for_off_stage_target() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let me = grounded(0, 1060.0);
        let mut target = grounded(1, 1200.0);
        target.set_grounded(false);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Chase);
        assert_eq!(chase(&mut state, &ctx).horizontal, 0.0);
    }

    #[test]
    fn test_attack_combo_runs_out() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let me = grounded(0, 600.0);
        let target = grounded(1, 630.0);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut rng = seeded(5);
        let mut state = state_in(AiBehavior::Attack);
        state.combo_counter = 1;
        state.combo_length = 1;

        let input = attack(&mut state, &ctx, &mut rng);
        assert_eq!(input.attack, Some(AttackType::Light));
        assert_eq!(state.combo_counter, 0);

        attack(&mut state, &ctx, &mut rng);
        assert_eq!(state.behavior, AiBehavior::Idle);
    }

    #[test]
    fn test_attack_turns_before_swinging() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let mut me = grounded(0, 600.0);
        me.facing = Facing::Right;
        let target = grounded(1, 570.0);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Attack);
        state.combo_counter = 2;
        state.combo_length = 2;
        let input = attack(&mut state, &ctx, &mut seeded(1));
        assert!(input.horizontal < 0.0);
        assert_eq!(input.attack, None);
    }

    #[test]
    fn test_combo_attack_ladder() {
        let mut state = AiState::new();
        state.combo_length = 3;
        state.combo_counter = 3;
        assert_eq!(combo_attack(&state, 0.0), AttackType::Light);
        state.combo_counter = 2;
        assert_eq!(combo_attack(&state, 0.0), AttackType::Medium);
        state.combo_counter = 1;
        assert_eq!(combo_attack(&state, 0.0), AttackType::Heavy);

        state.combo_length = 1;
        assert_eq!(combo_attack(&state, 150.0), AttackType::Heavy);
    }

    #[test]
    fn test_prepare_attack_combo_length() {
        let mut rng = seeded(2);
        for _ in 0..20 {
            let mut state = state_in(AiBehavior::Attack);
            prepare(&mut state, &AiSkill::uniform(1.0), true, &mut rng);
            assert!((2..=4).contains(&state.combo_counter));

            let mut state = state_in(AiBehavior::Attack);
            prepare(&mut state, &AiSkill::uniform(0.0), true, &mut rng);
            assert_eq!(state.combo_counter, 1);
        }
    }

    #[test]
    fn test_defend_moves_away_then_times_out() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(0.0);
        let me = grounded(0, 600.0);
        let target = grounded(1, 650.0);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Defend);
        assert_eq!(defend(&mut state, &ctx).horizontal, -1.0);

        state.action_timer = DEFEND_BASE_MS;
        defend(&mut state, &ctx);
        assert_eq!(state.behavior, AiBehavior::Idle);
    }

    #[test]
    fn test_retreat_jumps_over_when_cornered() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(0.5);
        let me = grounded(0, 220.0);
        let target = grounded(1, 300.0);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Retreat);
        let input = retreat(&mut state, &ctx);
        assert_eq!(input.horizontal, 1.0);
        assert!(input.jump);
    }

    #[test]
    fn test_recover_heads_to_center_and_jumps() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(0.0);
        let mut me = grounded(0, 100.0);
        me.set_grounded(false);
        me.velocity = Vec2::new(0.0, 100.0);
        let ctx = ExecutionContext {
            me: &me,
            target: None,
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Recover);
        let input = recover(&mut state, &ctx, &mut seeded(0));
        assert_eq!(input.horizontal, 1.0);
        assert!(input.jump);
    }

    #[test]
    fn test_skilled_recover_saves_air_jump() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let mut me = grounded(0, 100.0);
        me.set_grounded(false);
        me.velocity = Vec2::new(0.0, 100.0);
        me.position.y = 560.0;
        let ctx = ExecutionContext {
            me: &me,
            target: None,
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Recover);
        assert!(!recover(&mut state, &ctx, &mut seeded(0)).jump);

        me.position.y = 700.0;
        let ctx = ExecutionContext {
            me: &me,
            target: None,
            stage: &stage,
            skill: &skill,
        };
        assert!(recover(&mut state, &ctx, &mut seeded(0)).jump);
    }

    #[test]
    fn test_recover_wrong_direction() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(0.0);
        let mut me = grounded(0, 100.0);
        me.set_grounded(false);
        let ctx = ExecutionContext {
            me: &me,
            target: None,
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Recover);
        state.wrong_direction_timer = 100.0;
        assert_eq!(recover(&mut state, &ctx, &mut seeded(0)).horizontal, -1.0);
    }

    #[test]
    fn test_recover_rewind_when_out_of_jumps() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let stats = CharacterStats::default();
        let mut me = Fighter::new(
            FighterId(0),
            stats,
            Companion::debugger(),
            false,
            0,
            3,
            Vec2::new(100.0, 800.0),
        );
        me.set_grounded(false);
        assert!(me.jump());
        me.velocity = Vec2::new(0.0, 200.0);
        let ctx = ExecutionContext {
            me: &me,
            target: None,
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Recover);
        assert!(recover(&mut state, &ctx, &mut seeded(0)).sub_ability);
    }

    #[test]
    fn test_edgeguard_walks_to_edge_then_times_out() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(1.0);
        let me = grounded(0, 800.0);
        let mut target = grounded(1, 1150.0);
        target.set_grounded(false);
        let ctx = ExecutionContext {
            me: &me,
            target: Some(&target),
            stage: &stage,
            skill: &skill,
        };
        let mut state = state_in(AiBehavior::Edgeguard);
        assert_eq!(edgeguard(&mut state, &ctx).horizontal, 1.0);

        state.action_timer = EDGEGUARD_TIMEOUT_MS;
        edgeguard(&mut state, &ctx);
        assert_eq!(state.behavior, AiBehavior::Idle);
    }

    #[test]
    fn test_directional_influence_gated_by_skill() {
        let stage = StageInfo::default();
        let mut me = grounded(0, 600.0);
        me.take_damage(10.0, 100.0, -50.0);
        assert!(directional_influence(&me, &stage, &AiSkill::uniform(0.2)).is_none());
        let di = directional_influence(&me, &stage, &AiSkill::uniform(1.0)).unwrap();
        assert_eq!(di.center_x, stage.center_x());
        assert!((di.strength - DI_MAX_STRENGTH).abs() < 1e-6);
    }

    #[test]
    fn test_mistimed_attack_fires_once() {
        let stage = StageInfo::default();
        let skill = AiSkill::uniform(0.5);
        let me = grounded(0, 600.0);
        let ctx = ExecutionContext {
            me: &me,
            target: None,
            stage: &stage,
            skill: &skill,
        };
        let mut state = AiState::new();
        state.input_error = Some(InputError::MistimedAttack);
        state.error_timer = INPUT_ERROR_MS;
        assert_eq!(error_input(&mut state, &ctx).attack, Some(AttackType::Light));
        assert_eq!(error_input(&mut state, &ctx).attack, None);
    }
}
