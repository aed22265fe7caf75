//! ScoreSystem: attribution-based scoring
//!
//! Four categories per fighter:
//! - push: elimination credit
//! - stage: damage dealt
//! - commit: assists, from damage on a victim someone else finished
//! - bonus: combos

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{FighterId, TimeMs};
use crate::score::constants::*;
use crate::score::ledger::{DamageLedger, DamageRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub push: f32,
    pub stage: f32,
    pub commit: f32,
    pub bonus: f32,
}

impl ScoreBreakdown {
    /// Push dominates; the other categories are intermediate signals
    pub fn total(&self) -> u64 {
        let raw = self.push
            + self.stage * STAGE_WEIGHT
            + self.commit * COMMIT_WEIGHT
            + self.bonus;
        raw.floor().max(0.0) as u64
    }
}

/// Credit handed out by a single KO
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KoCredit {
    pub killer: Option<FighterId>,
    pub assists: Vec<(FighterId, f32)>,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSystem {
    breakdowns: AHashMap<FighterId, ScoreBreakdown>,
    ledgers: AHashMap<FighterId, DamageLedger>,
}

impl ScoreSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a fighter appear in standings before it scores anything
    pub fn register(&mut self, id: FighterId) {
        self.breakdowns.entry(id).or_default();
    }

    pub fn record_damage(&mut self, attacker: FighterId, victim: FighterId, amount: f32, now: TimeMs) {
        if attacker == victim || !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.breakdowns.entry(attacker).or_default().stage += amount * STAGE_MULTIPLIER;
        self.ledgers.entry(victim).or_default().push(DamageRecord {
            attacker,
            amount,
            time: now,
        });
    }

    /// Attribute a KO, then clear the victim's ledger
    pub fn record_ko(&mut self, victim: FighterId, killer: Option<FighterId>, now: TimeMs) -> KoCredit {
        let killer = killer.filter(|k| *k != victim);
        let mut credit = KoCredit {
            killer,
            assists: Vec::new(),
        };

        if let Some(k) = killer {
            self.breakdowns.entry(k).or_default().push += PUSH_AWARD;
        }

        if let Some(ledger) = self.ledgers.get_mut(&victim) {
            ledger.prune(now, LEDGER_WINDOW_MS);
            for (attacker, total) in ledger.contributions() {
                if Some(attacker) == killer || attacker == victim {
                    continue;
                }
                let award = COMMIT_MULTIPLIER * total;
                self.breakdowns.entry(attacker).or_default().commit += award;
                credit.assists.push((attacker, award));
            }
            ledger.clear();
        }

        tracing::debug!(
            "KO on {} credited to {:?} with {} assist(s)",
            victim,
            killer,
            credit.assists.len()
        );
        credit
    }

    pub fn add_combo_bonus(&mut self, fighter: FighterId, combo_count: u32) {
        self.breakdowns.entry(fighter).or_default().bonus += COMBO_BONUS * combo_count as f32;
    }

    pub fn get_total_score(&self, fighter: FighterId) -> u64 {
        self.get_score_breakdown(fighter).total()
    }

    pub fn get_score_breakdown(&self, fighter: FighterId) -> ScoreBreakdown {
        self.breakdowns.get(&fighter).copied().unwrap_or_default()
    }

    /// Unexpired damage records against `victim`
    pub fn ledger_for(&mut self, victim: FighterId, now: TimeMs) -> Vec<DamageRecord> {
        match self.ledgers.get_mut(&victim) {
            Some(ledger) => {
                ledger.prune(now, LEDGER_WINDOW_MS);
                ledger.records().to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Most recent attacker on `victim` still inside the ledger window
    pub fn last_attacker(&mut self, victim: FighterId, now: TimeMs) -> Option<FighterId> {
        let ledger = self.ledgers.get_mut(&victim)?;
        ledger.prune(now, LEDGER_WINDOW_MS);
        ledger.last_attacker()
    }

    /// Fighters by total score, highest first; ties broken by id
    pub fn standings(&self) -> Vec<(FighterId, u64)> {
        let mut rows: Vec<(FighterId, u64)> = self
            .breakdowns
            .iter()
            .map(|(id, b)| (*id, b.total()))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }

    pub fn reset(&mut self) {
        self.breakdowns.clear();
        self.ledgers.clear();
    }
}
