//! Fighter: physical state, cooldowns and the attack/movement state machine
//!
//! The orchestrator owns physics integration and collision. The fighter
//! owns everything that depends on its own timers: swings, specials,
//! hitstun, invincibility and cooldowns. All action methods fail silently
//! when their preconditions do not hold.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::{Facing, FighterId, TimeMs, Vec2};
use crate::fighter::attack::{AttackType, DamageOutput, Strike};
use crate::fighter::constants::*;
use crate::fighter::events::{CombatEventLog, CombatEventType};
use crate::fighter::input::{FighterInput, InputOutcome};
use crate::fighter::state::FighterState;
use crate::roster::{CharacterStats, Companion, CompanionAbility, DamageType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    // Identity
    pub id: FighterId,
    pub stats: CharacterStats,
    pub companion: Companion,
    pub is_human: bool,
    pub player_index: u32,

    // Physical state (integrated by the orchestrator)
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    grounded: bool,

    // Combat state
    state: FighterState,
    damage: f32,
    stocks: u32,
    starting_stocks: u32,
    knocked_out: bool,
    current_attack: Option<AttackType>,
    is_attacking: bool,
    special_active: bool,
    attack_cooldown: TimeMs,
    special_cooldown: TimeMs,
    sub_ability_cooldown: TimeMs,
    attack_timer: TimeMs,
    special_timer: TimeMs,
    hitstun_timer: TimeMs,
    invincibility_timer: TimeMs,
    knockback_timer: TimeMs,
    /// Targets already struck by the current swing
    hit_targets: BTreeSet<FighterId>,

    // Jumping
    air_jumps: u32,
    air_jump_available: bool,
    last_safe_position: Vec2,

    move_input: bool,
    clock: TimeMs,
    #[serde(skip)]
    events: CombatEventLog,
}

impl Fighter {
    pub fn new(
        id: FighterId,
        stats: CharacterStats,
        companion: Companion,
        is_human: bool,
        player_index: u32,
        starting_stocks: u32,
        spawn: Vec2,
    ) -> Self {
        Self {
            id,
            stats,
            companion,
            is_human,
            player_index,
            position: spawn,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            grounded: false,
            state: FighterState::AirborneFalling,
            damage: 0.0,
            stocks: starting_stocks,
            starting_stocks,
            knocked_out: false,
            current_attack: None,
            is_attacking: false,
            special_active: false,
            attack_cooldown: 0.0,
            special_cooldown: 0.0,
            sub_ability_cooldown: 0.0,
            attack_timer: 0.0,
            special_timer: 0.0,
            hitstun_timer: 0.0,
            invincibility_timer: 0.0,
            knockback_timer: 0.0,
            hit_targets: BTreeSet::new(),
            air_jumps: MAX_AIR_JUMPS,
            air_jump_available: true,
            last_safe_position: spawn,
            move_input: false,
            clock: 0.0,
            events: CombatEventLog::new(),
        }
    }

    /// CPU fighter with no companion and default stocks, used heavily in tests
    pub fn cpu(id: FighterId, stats: CharacterStats, spawn: Vec2) -> Self {
        Self::new(id, stats, Companion::default(), false, id.0, DEFAULT_STOCKS, spawn)
    }

    // ===== QUERIES =====

    pub fn state(&self) -> FighterState {
        self.state
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn stocks(&self) -> u32 {
        self.stocks
    }

    pub fn starting_stocks(&self) -> u32 {
        self.starting_stocks
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// A normal swing's hitbox is live
    pub fn is_swinging(&self) -> bool {
        self.is_attacking
    }

    /// Any hitbox (swing or special) is live
    pub fn is_attacking(&self) -> bool {
        self.is_attacking || self.special_active
    }

    pub fn is_special_active(&self) -> bool {
        self.special_active
    }

    pub fn current_attack(&self) -> Option<AttackType> {
        self.current_attack
    }

    pub fn current_strike(&self) -> Option<Strike> {
        if self.special_active {
            Some(Strike::Special)
        } else if self.is_attacking {
            self.current_attack.map(Strike::Normal)
        } else {
            None
        }
    }

    pub fn in_hitstun(&self) -> bool {
        self.hitstun_timer > 0.0
    }

    pub fn hitstun_remaining(&self) -> TimeMs {
        self.hitstun_timer
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    pub fn invincibility_remaining(&self) -> TimeMs {
        self.invincibility_timer
    }

    /// Inside the window after a hit where knockback carries the fighter
    pub fn is_launched(&self) -> bool {
        self.knockback_timer > 0.0
    }

    pub fn attack_cooldown(&self) -> TimeMs {
        self.attack_cooldown
    }

    pub fn special_cooldown(&self) -> TimeMs {
        self.special_cooldown
    }

    pub fn sub_ability_cooldown(&self) -> TimeMs {
        self.sub_ability_cooldown
    }

    pub fn air_jumps_remaining(&self) -> u32 {
        self.air_jumps
    }

    pub fn air_jump_available(&self) -> bool {
        self.air_jump_available
    }

    pub fn last_safe_position(&self) -> Vec2 {
        self.last_safe_position
    }

    /// Out of stocks
    pub fn is_eliminated(&self) -> bool {
        self.stocks == 0
    }

    /// Knocked out and waiting for a respawn
    pub fn is_knocked_out(&self) -> bool {
        self.knocked_out
    }

    /// On stage and able to take part in combat
    pub fn is_active(&self) -> bool {
        !self.knocked_out && self.stocks > 0
    }

    pub fn attack_range(&self) -> f32 {
        BASE_ATTACK_RANGE * self.companion.attack_range
    }

    pub fn special_range(&self) -> f32 {
        self.stats.special.range * self.companion.attack_range
    }

    pub fn can_attack(&self) -> bool {
        self.is_active() && self.attack_cooldown <= 0.0 && !self.in_hitstun()
    }

    pub fn can_use_special(&self) -> bool {
        self.is_active()
            && self.special_cooldown <= 0.0
            && !self.in_hitstun()
            && !self.is_attacking()
    }

    pub fn has_sub_ability_ready(&self) -> bool {
        self.companion.ability.is_some() && self.sub_ability_cooldown <= 0.0
    }

    pub fn has_hit(&self, target: FighterId) -> bool {
        self.hit_targets.contains(&target)
    }

    // ===== PER-FRAME =====

    /// Advance every timer and re-derive the visible state
    pub fn update(&mut self, delta: TimeMs) {
        let delta = delta.max(0.0);
        self.clock += delta;

        self.attack_cooldown = (self.attack_cooldown - delta).max(0.0);
        self.special_cooldown = (self.special_cooldown - delta).max(0.0);
        self.sub_ability_cooldown = (self.sub_ability_cooldown - delta).max(0.0);
        self.invincibility_timer = (self.invincibility_timer - delta).max(0.0);
        self.hitstun_timer = (self.hitstun_timer - delta).max(0.0);
        self.knockback_timer = (self.knockback_timer - delta).max(0.0);

        if self.is_attacking {
            self.attack_timer -= delta;
            if self.attack_timer <= 0.0 {
                self.end_swing();
            }
        }

        if self.special_active {
            self.special_timer -= delta;
            if self.special_timer <= 0.0 {
                self.special_active = false;
                self.special_timer = 0.0;
                self.hit_targets.clear();
            }
        }

        if self.grounded && !self.move_input && !self.is_launched() {
            // Friction tuned per 60Hz frame
            self.velocity.x *= GROUND_FRICTION.powf(delta / (1000.0 / 60.0));
            if self.velocity.x.abs() < WALK_EPSILON {
                self.velocity.x = 0.0;
            }
        }
        self.move_input = false;

        self.refresh_state();
    }

    fn refresh_state(&mut self) {
        self.state = if self.in_hitstun() {
            FighterState::Hitstun
        } else if self.special_active {
            FighterState::Special
        } else if self.is_attacking {
            FighterState::Attacking
        } else {
            FighterState::from_physics(self.grounded, self.velocity.x, self.velocity.y, WALK_EPSILON)
        };
    }

    /// Orchestrator notification that the fighter touched or left the ground
    pub fn set_grounded(&mut self, grounded: bool) {
        if grounded && !self.grounded {
            self.air_jumps = MAX_AIR_JUMPS;
            self.air_jump_available = true;
            self.last_safe_position = self.position;
        }
        self.grounded = grounded;
        self.refresh_state();
    }

    // ===== MOVEMENT =====

    /// Accelerate horizontally; `direction` is clamped to -1..=1
    pub fn move_horizontal(&mut self, direction: f32, delta: TimeMs) -> bool {
        if !self.is_active() || self.in_hitstun() || self.is_attacking() {
            return false;
        }
        let direction = direction.clamp(-1.0, 1.0);
        if direction == 0.0 {
            return false;
        }

        let control = if self.grounded { 1.0 } else { AIR_CONTROL };
        let max_speed = MAX_RUN_SPEED * self.stats.speed;
        let accel = GROUND_ACCEL * control * self.stats.speed * direction * (delta / 1000.0);

        let mut vx = self.velocity.x + accel;
        if vx.abs() > max_speed {
            // Never add speed past the cap, but keep momentum we already had
            vx = vx.signum() * max_speed.max(self.velocity.x.abs());
        }
        self.velocity.x = vx;
        self.move_input = true;
        self.face(direction);
        true
    }

    pub fn face(&mut self, direction: f32) {
        if let Some(facing) = Facing::from_direction(direction) {
            self.facing = facing;
        }
    }

    /// Grounded jump, or spend one air jump; false when nothing happened
    pub fn jump(&mut self) -> bool {
        if !self.is_active() || self.in_hitstun() {
            return false;
        }

        if self.grounded {
            self.velocity.y = -JUMP_FORCE;
            self.grounded = false;
            self.air_jumps = MAX_AIR_JUMPS;
            self.air_jump_available = self.air_jumps > 0;
            self.refresh_state();
            return true;
        }

        if self.air_jumps > 0 {
            self.velocity.y = -JUMP_FORCE * AIR_JUMP_FACTOR;
            self.air_jumps -= 1;
            self.air_jump_available = self.air_jumps > 0;
            self.refresh_state();
            return true;
        }

        false
    }

    // ===== ATTACKS =====

    /// Start a swing; no effect while on cooldown or in hitstun
    pub fn attack(&mut self, attack_type: AttackType) -> bool {
        if !self.can_attack() || self.special_active {
            return false;
        }

        let delay = self.companion.skill_delay;
        self.current_attack = Some(attack_type);
        self.is_attacking = true;
        self.attack_timer = attack_type.duration_ms() * delay;
        self.attack_cooldown = attack_type.cooldown_ms() * delay;
        self.hit_targets.clear();
        self.refresh_state();
        true
    }

    fn end_swing(&mut self) {
        self.is_attacking = false;
        self.attack_timer = 0.0;
        self.hit_targets.clear();
    }

    /// Stop any live hitbox immediately; cooldowns keep running
    pub fn cancel_attack(&mut self) {
        self.end_swing();
        self.special_active = false;
        self.special_timer = 0.0;
        self.refresh_state();
    }

    pub fn use_special(&mut self) -> bool {
        if !self.can_use_special() {
            return false;
        }

        let delay = self.companion.skill_delay;
        let special = &self.stats.special;
        self.special_active = true;
        self.special_timer = special.duration_ms * delay;
        self.special_cooldown = special.cooldown_ms * delay;
        self.hit_targets.clear();

        let forward = self.facing.sign();
        if special.utility {
            self.velocity = Vec2::new(forward * UTILITY_BOOST_X, -UTILITY_BOOST_Y);
            self.grounded = false;
        } else {
            self.velocity.x = forward * SPECIAL_LUNGE_SPEED;
        }

        tracing::trace!("{} used special {}", self.id, special.name);
        self.events.push(
            CombatEventType::SpecialUsed {
                fighter: self.id,
                name: special.name.clone(),
            },
            self.clock,
        );
        self.refresh_state();
        true
    }

    pub fn use_sub_ability(&mut self) -> bool {
        if !self.is_active() || self.in_hitstun() || self.sub_ability_cooldown > 0.0 {
            return false;
        }
        let Some(ability) = self.companion.ability else {
            return false;
        };

        match ability {
            CompanionAbility::Rewind => {
                self.position = self.last_safe_position;
                self.velocity = Vec2::ZERO;
            }
            CompanionAbility::Firewall => {
                self.grant_invincibility(FIREWALL_DURATION_MS);
            }
        }
        self.sub_ability_cooldown = ability.cooldown_ms() * self.companion.skill_delay;
        self.events.push(
            CombatEventType::SubAbilityUsed {
                fighter: self.id,
                ability,
            },
            self.clock,
        );
        true
    }

    pub fn mark_hit(&mut self, target: FighterId) {
        self.hit_targets.insert(target);
    }

    /// Damage and unscaled knockback of the current strike
    ///
    /// The victim's damage percentage is applied once, in `take_damage`.
    pub fn calculate_damage(&self, is_special: bool) -> DamageOutput {
        let forward = self.facing.sign();

        if is_special {
            let special = &self.stats.special;
            let bonus = match special.damage_type {
                DamageType::Physical => self.stats.power * SPECIAL_STAT_SCALE,
                DamageType::Logic => {
                    self.stats.logic * SPECIAL_STAT_SCALE * self.companion.logic_attack
                }
            };
            return DamageOutput {
                amount: special.base_power + bonus,
                knockback: Vec2::new(forward * SPECIAL_KNOCKBACK_X, -SPECIAL_KNOCKBACK_Y),
            };
        }

        let attack = self.current_attack.unwrap_or_default();
        let kb = attack.knockback_multiplier();
        DamageOutput {
            amount: self.stats.power * attack.damage_multiplier(),
            knockback: Vec2::new(forward * BASE_KNOCKBACK_X * kb, -BASE_KNOCKBACK_Y * kb),
        }
    }

    // ===== DAMAGE =====

    /// Apply a hit; no-op while invincible or off stage
    ///
    /// Knockback scales with the damage held before this hit, hitstun with
    /// the damage after it.
    pub fn take_damage(&mut self, amount: f32, knockback_x: f32, knockback_y: f32) -> bool {
        if !self.is_active() || self.is_invincible() {
            return false;
        }

        let scale = knockback_scale(self.damage);
        self.damage += amount.max(0.0);
        self.hitstun_timer = hitstun_duration(self.damage);
        self.knockback_timer = KNOCKBACK_WINDOW_MS;

        self.velocity = Vec2::new(knockback_x * scale, knockback_y * scale);
        if self.velocity.y < 0.0 {
            self.grounded = false;
        }

        self.end_swing();
        self.special_active = false;
        self.special_timer = 0.0;
        self.refresh_state();
        true
    }

    /// Damp horizontal knockback that points away from `center_x`
    pub fn apply_directional_influence(&mut self, center_x: f32, strength: f32, delta: TimeMs) {
        if !self.in_hitstun() {
            return;
        }
        let toward_center = center_x - self.position.x;
        if self.velocity.x * toward_center >= 0.0 {
            return;
        }
        let damping = (strength.clamp(0.0, 1.0) * delta / 100.0).min(1.0);
        self.velocity.x *= 1.0 - damping;
    }

    pub fn grant_invincibility(&mut self, duration: TimeMs) {
        self.invincibility_timer = self.invincibility_timer.max(duration);
    }

    // ===== LIFECYCLE =====

    /// Remove one stock after crossing a blast zone; true when that was the last
    pub fn lose_stock(&mut self) -> bool {
        if self.stocks == 0 {
            return false;
        }
        self.stocks -= 1;
        self.knocked_out = true;
        self.clear_transient();
        self.velocity = Vec2::ZERO;
        tracing::debug!("{} lost a stock ({} left)", self.id, self.stocks);
        self.stocks == 0
    }

    /// Put the fighter back at a spawn point; the caller grants invincibility
    pub fn respawn(&mut self, x: f32, y: f32) {
        if self.stocks == 0 {
            return;
        }
        self.damage = 0.0;
        self.clear_transient();
        self.knocked_out = false;
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::ZERO;
        self.grounded = false;
        self.air_jumps = MAX_AIR_JUMPS;
        self.air_jump_available = true;
        self.last_safe_position = self.position;
        self.attack_cooldown = 0.0;
        self.special_cooldown = 0.0;

        tracing::debug!("{} respawned at ({:.0}, {:.0})", self.id, x, y);
        self.events.push(CombatEventType::Respawned { fighter: self.id }, self.clock);
        self.refresh_state();
    }

    fn clear_transient(&mut self) {
        self.end_swing();
        self.current_attack = None;
        self.special_active = false;
        self.special_timer = 0.0;
        self.hitstun_timer = 0.0;
        self.knockback_timer = 0.0;
        self.invincibility_timer = 0.0;
        self.move_input = false;
    }

    /// Force the damage accumulator (clamped at zero)
    pub fn set_damage(&mut self, damage: f32) {
        self.damage = damage.max(0.0);
    }

    // ===== INPUT =====

    /// Act on a (possibly debuffed) intent for this frame
    pub fn apply_input(&mut self, input: &FighterInput, delta: TimeMs) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        if !self.is_active() {
            return outcome;
        }

        if let Some(di) = input.directional_influence {
            self.apply_directional_influence(di.center_x, di.strength, delta);
        }
        if input.horizontal != 0.0 {
            outcome.moved = self.move_horizontal(input.horizontal, delta);
        }
        if input.jump {
            outcome.jumped = self.jump();
        }
        if input.sub_ability {
            outcome.sub_ability = self.use_sub_ability();
        }
        if input.special {
            outcome.special = self.use_special();
        }
        if let Some(attack) = input.attack {
            if !outcome.special {
                outcome.attacked = self.attack(attack);
            }
        }
        outcome
    }

    /// Drain events raised by this fighter since the last call
    pub fn take_events(&mut self) -> CombatEventLog {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> Fighter {
        let mut f = Fighter::cpu(FighterId(0), CharacterStats::default(), Vec2::new(0.0, 0.0));
        f.set_grounded(true);
        f
    }

    #[test]
    fn test_new_fighter_has_full_stocks() {
        let f = fighter();
        assert_eq!(f.stocks(), DEFAULT_STOCKS);
        assert_eq!(f.damage(), 0.0);
        assert!(f.is_active());
        assert_eq!(f.state(), FighterState::Idle);
    }

    #[test]
    fn test_take_damage_scales_knockback_and_hitstun() {
        let mut f = fighter();
        f.set_damage(50.0);
        assert!(f.take_damage(10.0, -100.0, -50.0));
        assert_eq!(f.damage(), 60.0);
        assert!((f.velocity.x - -150.0).abs() < 0.001);
        assert!((f.velocity.y - -75.0).abs() < 0.001);
        assert_eq!(f.hitstun_remaining(), 220.0);
        assert_eq!(f.state(), FighterState::Hitstun);
    }

    #[test]
    fn test_invincible_ignores_damage() {
        let mut f = fighter();
        f.grant_invincibility(1000.0);
        assert!(!f.take_damage(20.0, 100.0, -100.0));
        assert_eq!(f.damage(), 0.0);
        assert!(!f.in_hitstun());
    }

    #[test]
    fn test_negative_damage_never_lowers_accumulator() {
        let mut f = fighter();
        f.take_damage(-30.0, 0.0, 0.0);
        assert_eq!(f.damage(), 0.0);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut f = fighter();
        assert!(f.attack(AttackType::Light));
        assert!(f.is_attacking());
        assert_eq!(f.state(), FighterState::Attacking);
        assert!(!f.attack(AttackType::Heavy), "Cooldown should block a second swing");
        assert_eq!(f.current_attack(), Some(AttackType::Light));

        f.update(300.0);
        assert!(!f.is_attacking());
        assert!(f.attack(AttackType::Heavy));
    }

    #[test]
    fn test_swing_ends_and_clears_hit_set() {
        let mut f = fighter();
        f.attack(AttackType::Medium);
        f.mark_hit(FighterId(1));
        assert!(f.has_hit(FighterId(1)));

        f.update(100.0);
        assert!(f.is_attacking(), "Medium swing lasts 250ms");
        f.update(200.0);
        assert!(!f.is_attacking());
        assert!(!f.has_hit(FighterId(1)));
    }

    #[test]
    fn test_new_swing_clears_previous_hits() {
        let mut f = fighter();
        f.attack(AttackType::Light);
        f.mark_hit(FighterId(2));
        f.update(ATTACK_COOLDOWNS_MS[0] - 1.0);
        f.mark_hit(FighterId(2));
        f.update(1.0);
        assert!(f.attack(AttackType::Light));
        assert!(!f.has_hit(FighterId(2)));
    }

    #[test]
    fn test_skill_delay_scales_swing() {
        let mut f = fighter();
        f.companion = Companion::linter();
        f.attack(AttackType::Heavy);
        assert!((f.attack_cooldown() - 800.0 * 0.85).abs() < 0.01);
    }

    #[test]
    fn test_hitstun_blocks_actions() {
        let mut f = fighter();
        f.take_damage(10.0, 0.0, 0.0);
        assert!(!f.attack(AttackType::Light));
        assert!(!f.jump());
        assert!(!f.move_horizontal(1.0, 16.0));
        assert!(!f.use_special());

        f.update(500.0);
        assert!(!f.in_hitstun());
        assert!(f.attack(AttackType::Light));
    }

    #[test]
    fn test_hit_cancels_swing() {
        let mut f = fighter();
        f.attack(AttackType::Heavy);
        f.take_damage(5.0, 10.0, 0.0);
        assert!(!f.is_attacking());
    }

    #[test]
    fn test_movement_blocked_while_attacking() {
        let mut f = fighter();
        f.attack(AttackType::Light);
        assert!(!f.move_horizontal(1.0, 16.0));
    }

    #[test]
    fn test_movement_accelerates_and_faces() {
        let mut f = fighter();
        assert!(f.move_horizontal(-1.0, 100.0));
        assert!(f.velocity.x < 0.0);
        assert_eq!(f.facing, Facing::Left);

        for _ in 0..50 {
            f.move_horizontal(-1.0, 100.0);
        }
        assert!(f.velocity.x.abs() <= MAX_RUN_SPEED * f.stats.speed + 0.01);
    }

    #[test]
    fn test_air_control_is_weaker() {
        let mut ground = fighter();
        let mut air = fighter();
        air.set_grounded(false);
        ground.move_horizontal(1.0, 50.0);
        air.move_horizontal(1.0, 50.0);
        assert!(air.velocity.x < ground.velocity.x);
    }

    #[test]
    fn test_double_jump_then_exhausted() {
        let mut f = fighter();
        assert!(f.jump(), "Ground jump");
        assert!(!f.is_grounded());
        assert!(f.air_jump_available());
        assert!(f.jump(), "Air jump");
        assert!(!f.air_jump_available());
        assert!(!f.jump(), "No jumps left");
    }

    #[test]
    fn test_air_jump_weaker_than_ground_jump() {
        let mut f = fighter();
        f.jump();
        let ground_vy = f.velocity.y;
        f.jump();
        assert!(f.velocity.y > ground_vy);
    }

    #[test]
    fn test_landing_resets_jumps_and_checkpoint() {
        let mut f = fighter();
        f.jump();
        f.jump();
        assert_eq!(f.air_jumps_remaining(), 0);

        f.position = Vec2::new(120.0, 0.0);
        f.set_grounded(true);
        assert_eq!(f.air_jumps_remaining(), MAX_AIR_JUMPS);
        assert!(f.air_jump_available());
        assert_eq!(f.last_safe_position(), Vec2::new(120.0, 0.0));
    }

    #[test]
    fn test_calculate_damage_tables() {
        let mut f = fighter();
        f.attack(AttackType::Heavy);
        let out = f.calculate_damage(false);
        assert!((out.amount - f.stats.power * 2.2).abs() < 0.001);
        assert!((out.knockback.x - BASE_KNOCKBACK_X * 1.8).abs() < 0.001);
        assert!(out.knockback.y < 0.0, "Knockback launches upward");
    }

    #[test]
    fn test_special_damage_by_type() {
        let mut f = fighter();
        f.stats.special.damage_type = DamageType::Physical;
        let physical = f.calculate_damage(true).amount;
        assert!((physical - (f.stats.special.base_power + f.stats.power * 0.5)).abs() < 0.001);

        f.stats.special.damage_type = DamageType::Logic;
        f.companion = Companion::compiler();
        let logic = f.calculate_damage(true).amount;
        let expected = f.stats.special.base_power + f.stats.logic * 0.5 * 1.3;
        assert!((logic - expected).abs() < 0.001);
    }

    #[test]
    fn test_special_knockback_larger_and_forward() {
        let mut f = fighter();
        f.facing = Facing::Left;
        let special = f.calculate_damage(true).knockback;
        let light = f.calculate_damage(false).knockback;
        assert!(special.x < 0.0);
        assert!(special.length() > light.length());
    }

    #[test]
    fn test_use_special_sets_cooldown_and_event() {
        let mut f = fighter();
        assert!(f.use_special());
        assert!(f.is_attacking());
        assert_eq!(f.current_strike(), Some(Strike::Special));
        assert_eq!(f.state(), FighterState::Special);
        assert!(!f.use_special());

        let events = f.take_events();
        assert_eq!(events.count_matching(|e| matches!(e, CombatEventType::SpecialUsed { .. })), 1);

        f.update(f.stats.special.duration_ms);
        assert!(!f.is_special_active());
        assert!(f.special_cooldown() > 0.0);
    }

    #[test]
    fn test_utility_special_launches_upward() {
        let mut f = fighter();
        f.stats.special.utility = true;
        f.use_special();
        assert!(f.velocity.y < 0.0);
        assert!(!f.is_grounded());
    }

    #[test]
    fn test_rewind_returns_to_safe_position() {
        let mut f = fighter();
        f.companion = Companion::debugger();
        f.position = Vec2::new(50.0, 0.0);
        f.set_grounded(false);
        f.set_grounded(true);
        f.position = Vec2::new(900.0, 400.0);
        f.velocity = Vec2::new(300.0, 300.0);

        assert!(f.use_sub_ability());
        assert_eq!(f.position, Vec2::new(50.0, 0.0));
        assert_eq!(f.velocity, Vec2::ZERO);
        assert!(!f.use_sub_ability(), "On cooldown");
    }

    #[test]
    fn test_firewall_grants_invincibility() {
        let mut f = fighter();
        f.companion = Companion::sandbox();
        assert!(f.use_sub_ability());
        assert!(f.is_invincible());
    }

    #[test]
    fn test_no_companion_no_sub_ability() {
        let mut f = fighter();
        assert!(!f.use_sub_ability());
    }

    #[test]
    fn test_lose_stock_and_respawn() {
        let mut f = fighter();
        f.set_damage(120.0);
        f.attack(AttackType::Light);
        f.mark_hit(FighterId(3));

        assert!(!f.lose_stock());
        assert!(f.is_knocked_out());
        assert!(!f.is_active());
        assert!(!f.take_damage(10.0, 0.0, 0.0), "Knocked out fighters take no damage");

        f.respawn(400.0, -200.0);
        assert!(f.is_active());
        assert_eq!(f.damage(), 0.0);
        assert_eq!(f.position, Vec2::new(400.0, -200.0));
        assert!(!f.is_attacking());
        assert!(!f.has_hit(FighterId(3)));
        assert_eq!(f.stocks(), DEFAULT_STOCKS - 1);
    }

    #[test]
    fn test_elimination() {
        let mut f = fighter();
        assert!(!f.lose_stock());
        assert!(!f.lose_stock());
        assert!(f.lose_stock());
        assert!(f.is_eliminated());
        assert!(!f.lose_stock(), "Stocks never go below zero");
        assert_eq!(f.stocks(), 0);

        f.respawn(0.0, 0.0);
        assert!(!f.is_active(), "Eliminated fighters stay out");
    }

    #[test]
    fn test_directional_influence_damps_outward_velocity() {
        let mut f = fighter();
        f.position = Vec2::new(200.0, 0.0);
        f.take_damage(10.0, 400.0, -100.0);
        let before = f.velocity.x;
        f.apply_directional_influence(0.0, 0.5, 16.0);
        assert!(f.velocity.x < before);
        assert!(f.velocity.x > 0.0);

        // Already moving toward center: untouched
        let mut g = fighter();
        g.position = Vec2::new(200.0, 0.0);
        g.take_damage(10.0, -400.0, -100.0);
        let before = g.velocity.x;
        g.apply_directional_influence(0.0, 0.5, 16.0);
        assert_eq!(g.velocity.x, before);
    }

    #[test]
    fn test_directional_influence_needs_hitstun() {
        let mut f = fighter();
        f.position = Vec2::new(200.0, 0.0);
        f.velocity.x = 300.0;
        f.apply_directional_influence(0.0, 1.0, 16.0);
        assert_eq!(f.velocity.x, 300.0);
    }

    #[test]
    fn test_friction_stops_idle_fighter() {
        let mut f = fighter();
        f.velocity.x = 200.0;
        for _ in 0..120 {
            f.update(16.0);
        }
        assert_eq!(f.velocity.x, 0.0);
        assert_eq!(f.state(), FighterState::Idle);
    }

    #[test]
    fn test_apply_input_prefers_special_over_attack() {
        let mut f = fighter();
        let input = FighterInput::none().with_special().with_attack(AttackType::Light);
        let outcome = f.apply_input(&input, 16.0);
        assert!(outcome.special);
        assert!(!outcome.attacked);
    }

    #[test]
    fn test_invincibility_expires() {
        let mut f = fighter();
        f.grant_invincibility(100.0);
        f.update(60.0);
        assert!(f.is_invincible());
        f.update(60.0);
        assert!(!f.is_invincible());
    }
}
