//! HeadlessMatch: a complete frame loop over the combat core
//!
//! Each frame: intents -> physics -> hits -> combos -> blast zones ->
//! timers -> end check. No rendering or device input; human slots take
//! injected intents.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::ai::AiController;
use crate::arena::FighterArena;
use crate::core::config::MatchConfig;
use crate::core::error::Result;
use crate::core::rng::derive_seed;
use crate::core::types::{FighterId, TimeMs};
use crate::fighter::{CombatEventLog, CombatEventType, FighterInput};
use crate::roster::Roster;
use crate::score::ScoreSystem;
use crate::simulation::constants::*;
use crate::simulation::hits::{find_hits, strike_reaches};
use crate::simulation::physics::step_fighter;
use crate::simulation::summary::MatchSummary;
use crate::status::StatusEffectSystem;

const STATUS_SEED_STREAM: u64 = 0;
const AI_SEED_STREAM: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Ready,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingRespawn {
    pub fighter: FighterId,
    pub remaining: TimeMs,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ComboTracker {
    hits: u32,
    last_hit: TimeMs,
}

#[derive(Debug, Clone)]
pub struct HeadlessMatch {
    pub config: MatchConfig,
    pub arena: FighterArena,
    pub status: StatusEffectSystem,
    pub scores: ScoreSystem,
    controllers: Vec<AiController>,
    human_inputs: AHashMap<FighterId, FighterInput>,
    pending_respawns: Vec<PendingRespawn>,
    combos: AHashMap<FighterId, ComboTracker>,
    eliminations: Vec<FighterId>,
    time: TimeMs,
    frame: u64,
    phase: MatchPhase,
    log: CombatEventLog,
}

impl HeadlessMatch {
    /// Build a match from a validated config and a roster
    pub fn new(config: MatchConfig, roster: &Roster) -> Result<Self> {
        config.validate()?;

        let stage = config.stage;
        let count = config.entrants.len();
        let mut arena = FighterArena::new();
        let mut status = StatusEffectSystem::with_seed(derive_seed(config.seed, STATUS_SEED_STREAM));
        let mut scores = ScoreSystem::new();
        let mut controllers = Vec::new();

        for (index, entrant) in config.entrants.iter().enumerate() {
            let stats = roster.require(&entrant.character)?.clone();
            let companion = entrant.resolve_companion()?;
            let archetype = stats.archetype;
            let spawn = stage.spawn_point(index, count);

            let id = arena.spawn(
                stats,
                companion,
                entrant.is_human,
                config.starting_stocks,
                spawn,
            );
            if let Some(fighter) = arena.get_mut(id) {
                fighter.set_grounded(true);
                // Face the middle of the stage
                fighter.face(stage.center_x() - spawn.x);
                status.register(id, &fighter.stats);
            }
            scores.register(id);

            if !entrant.is_human {
                controllers.push(AiController::new(
                    id,
                    entrant.difficulty,
                    archetype,
                    derive_seed(config.seed, AI_SEED_STREAM + id.0 as u64),
                ));
            }
        }

        Ok(Self {
            config,
            arena,
            status,
            scores,
            controllers,
            human_inputs: AHashMap::new(),
            pending_respawns: Vec::new(),
            combos: AHashMap::new(),
            eliminations: Vec::new(),
            time: 0.0,
            frame: 0,
            phase: MatchPhase::Ready,
            log: CombatEventLog::new(),
        })
    }

    /// Build a match against the built-in roster
    pub fn from_config(config: MatchConfig) -> Result<Self> {
        Self::new(config, &Roster::builtin())
    }

    pub fn start(&mut self) {
        if self.phase != MatchPhase::Ready {
            return;
        }
        self.phase = MatchPhase::Active;
        tracing::info!(
            "Match started: {} fighters, {} stocks, seed {}",
            self.arena.len(),
            self.config.starting_stocks,
            self.config.seed
        );
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::Finished
    }

    pub fn time(&self) -> TimeMs {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Every event raised so far
    pub fn log(&self) -> &CombatEventLog {
        &self.log
    }

    pub fn controllers(&self) -> &[AiController] {
        &self.controllers
    }

    pub fn controller(&self, id: FighterId) -> Option<&AiController> {
        self.controllers.iter().find(|c| c.fighter_id == id)
    }

    /// Fighters in the order they ran out of stocks
    pub fn eliminations(&self) -> &[FighterId] {
        &self.eliminations
    }

    pub fn pending_respawns(&self) -> &[PendingRespawn] {
        &self.pending_respawns
    }

    /// Intent for a human slot, consumed by the next frame
    pub fn set_human_input(&mut self, id: FighterId, input: FighterInput) {
        if self.arena.get(id).is_some_and(|f| f.is_human) {
            self.human_inputs.insert(id, input);
        }
    }

    /// Advance one fixed frame; returns the events it raised
    pub fn run_frame(&mut self) -> CombatEventLog {
        let mut events = CombatEventLog::new();
        if self.phase == MatchPhase::Ready {
            self.start();
        }
        if self.is_finished() {
            return events;
        }
        let delta = self.config.frame_ms;

        // ===== PHASE 1: INTENTS =====
        self.phase_intents(delta);

        // ===== PHASE 2: PHYSICS =====
        self.phase_physics(delta);

        // ===== PHASE 3: HITS =====
        self.phase_hits(&mut events);

        // ===== PHASE 4: COMBOS =====
        self.phase_combos(&mut events, false);

        // ===== PHASE 5: BLAST ZONES =====
        self.phase_blast_zones(&mut events);

        // ===== PHASE 6: TIMERS =====
        self.phase_timers(delta, &mut events);

        // ===== PHASE 7: POST-FRAME =====
        self.phase_post_frame(delta, &mut events);

        self.log.extend(events.clone());
        events
    }

    /// Run frames until the match finishes
    pub fn run_to_end(&mut self) -> MatchSummary {
        while !self.is_finished() {
            self.run_frame();
        }
        self.summary()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary::from_match(self)
    }

    fn phase_intents(&mut self, delta: TimeMs) {
        let stage = self.config.stage;
        let mut intents: Vec<(FighterId, FighterInput)> = Vec::new();

        for controller in &mut self.controllers {
            let input = controller.update(self.time, delta, &self.arena, &stage, &self.status);
            intents.push((controller.fighter_id, input));
        }
        let mut humans: Vec<(FighterId, FighterInput)> = self.human_inputs.drain().collect();
        humans.sort_by_key(|(id, _)| *id);
        intents.extend(humans);

        for (id, input) in intents {
            let filtered = self.status.filter_input(id, input);
            if let Some(fighter) = self.arena.get_mut(id) {
                fighter.apply_input(&filtered, delta);
            }
        }
    }

    fn phase_physics(&mut self, delta: TimeMs) {
        let stage = self.config.stage;
        for fighter in self.arena.iter_mut() {
            step_fighter(fighter, &stage, delta);
        }
    }

    fn phase_hits(&mut self, events: &mut CombatEventLog) {
        for (attacker_id, victim_id) in find_hits(&self.arena) {
            let Some((attacker, victim)) = self.arena.pair_mut(attacker_id, victim_id) else {
                continue;
            };
            // An earlier hit this frame may have cancelled either swing
            if !strike_reaches(attacker, victim) {
                continue;
            }

            let was_stunned = self.status.is_stunned(attacker_id);
            if !self.status.on_attack(attacker_id, self.time) {
                attacker.cancel_attack();
                events.push(CombatEventType::AttackRejected { fighter: attacker_id }, self.time);
                if !was_stunned && self.status.is_stunned(attacker_id) {
                    events.push(CombatEventType::StackOverflow { fighter: attacker_id }, self.time);
                }
                continue;
            }

            attacker.mark_hit(victim_id);
            let special = attacker.is_special_active();
            let output = attacker.calculate_damage(special);
            if !victim.take_damage(output.amount, output.knockback.x, output.knockback.y) {
                continue;
            }

            self.scores
                .record_damage(attacker_id, victim_id, output.amount, self.time);
            events.push(
                CombatEventType::Hit {
                    attacker: attacker_id,
                    victim: victim_id,
                    damage: output.amount,
                    knockback: output.knockback,
                    special,
                },
                self.time,
            );
            if let Some(effect) = self.status.on_take_damage(victim_id) {
                events.push(
                    CombatEventType::BugTriggered {
                        fighter: victim_id,
                        effect,
                    },
                    self.time,
                );
            }
            self.register_combo_hit(attacker_id, events);
        }
    }

    fn register_combo_hit(&mut self, attacker: FighterId, events: &mut CombatEventLog) {
        let now = self.time;
        let lapsed = self
            .combos
            .get(&attacker)
            .is_some_and(|c| now - c.last_hit > COMBO_WINDOW_MS);
        if lapsed {
            if let Some(done) = self.combos.remove(&attacker) {
                self.close_combo(attacker, done, events);
            }
        }
        let tracker = self.combos.entry(attacker).or_insert(ComboTracker {
            hits: 0,
            last_hit: now,
        });
        tracker.hits += 1;
        tracker.last_hit = now;
    }

    fn close_combo(&mut self, attacker: FighterId, combo: ComboTracker, events: &mut CombatEventLog) {
        if combo.hits >= MIN_COMBO_HITS {
            self.scores.add_combo_bonus(attacker, combo.hits);
            events.push(
                CombatEventType::ComboEnded {
                    fighter: attacker,
                    hits: combo.hits,
                },
                self.time,
            );
        }
    }

    /// Close combos whose window lapsed, or all of them when `flush`
    fn phase_combos(&mut self, events: &mut CombatEventLog, flush: bool) {
        let now = self.time;
        let mut closing: Vec<FighterId> = self
            .combos
            .iter()
            .filter(|(_, c)| flush || now - c.last_hit > COMBO_WINDOW_MS)
            .map(|(id, _)| *id)
            .collect();
        closing.sort();
        for id in closing {
            if let Some(combo) = self.combos.remove(&id) {
                self.close_combo(id, combo, events);
            }
        }
    }

    fn phase_blast_zones(&mut self, events: &mut CombatEventLog) {
        let stage = self.config.stage;
        let out: Vec<FighterId> = self
            .arena
            .active()
            .filter(|f| stage.outside_blast_zone(f.position))
            .map(|f| f.id)
            .collect();

        for victim in out {
            let killer = self.scores.last_attacker(victim, self.time);
            let eliminated = match self.arena.get_mut(victim) {
                Some(fighter) => fighter.lose_stock(),
                None => continue,
            };
            self.scores.record_ko(victim, killer, self.time);
            self.status.clear_effects(victim);
            if let Some(controller) = self.controllers.iter_mut().find(|c| c.fighter_id == victim) {
                controller.reset();
            }
            tracing::debug!("{} knocked out by {:?}", victim, killer);
            events.push(CombatEventType::Knockout { victim, killer }, self.time);

            if eliminated {
                tracing::info!("{} eliminated", victim);
                self.eliminations.push(victim);
                events.push(CombatEventType::Eliminated { fighter: victim }, self.time);
            } else {
                self.pending_respawns.push(PendingRespawn {
                    fighter: victim,
                    remaining: self.config.respawn_delay_ms,
                });
            }
        }
    }

    fn phase_timers(&mut self, delta: TimeMs, events: &mut CombatEventLog) {
        for fighter in self.arena.iter_mut() {
            fighter.update(delta);
        }
        self.status.update_all(delta);

        let stage = self.config.stage;
        let count = self.arena.len();
        let invincibility = self.config.respawn_invincibility_ms;
        let mut ready = Vec::new();
        self.pending_respawns.retain_mut(|pending| {
            pending.remaining -= delta;
            if pending.remaining <= 0.0 {
                ready.push(pending.fighter);
                false
            } else {
                true
            }
        });
        for id in ready {
            if let Some(fighter) = self.arena.get_mut(id) {
                let spawn = stage.spawn_point(id.index(), count);
                fighter.respawn(spawn.x, spawn.y - RESPAWN_HEIGHT);
                fighter.grant_invincibility(invincibility);
            }
        }

        for fighter in self.arena.iter_mut() {
            let mut raised = fighter.take_events();
            for event in raised.drain() {
                events.push(event.event_type, self.time);
            }
        }
    }

    fn phase_post_frame(&mut self, delta: TimeMs, events: &mut CombatEventLog) {
        self.time += delta;
        self.frame += 1;

        let last_one_standing = self.arena.remaining() <= 1;
        let timed_out = self.config.time_limit_ms > 0.0 && self.time >= self.config.time_limit_ms;
        if last_one_standing || timed_out {
            self.phase_combos(events, true);
            self.phase = MatchPhase::Finished;
            events.push(CombatEventType::MatchEnded, self.time);
            tracing::info!(
                "Match ended at {:.0}ms after {} frames ({})",
                self.time,
                self.frame,
                if timed_out && !last_one_standing {
                    "time limit"
                } else {
                    "last fighter standing"
                }
            );
        }
    }

    /// Whether the match stopped on the clock with several fighters left
    pub fn timed_out(&self) -> bool {
        self.is_finished() && self.arena.remaining() > 1
    }
}
