//! End-of-match report

use serde::{Deserialize, Serialize};

use crate::core::types::{FighterId, TimeMs};
use crate::fighter::CombatEventType;
use crate::score::ScoreBreakdown;
use crate::simulation::headless::HeadlessMatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterResult {
    pub id: FighterId,
    pub character: String,
    pub is_human: bool,
    /// 1 is first place
    pub placement: u32,
    pub stocks: u32,
    pub damage: f32,
    pub score: u64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub duration_ms: TimeMs,
    pub frames: u64,
    /// Only set when exactly one fighter still has stocks
    pub winner: Option<FighterId>,
    pub timed_out: bool,
    pub total_hits: usize,
    pub total_knockouts: usize,
    /// Ordered by placement
    pub results: Vec<FighterResult>,
}

impl MatchSummary {
    /// Placements: survivors first (more stocks, then higher score), then
    /// the eliminated in reverse elimination order
    pub fn from_match(m: &HeadlessMatch) -> Self {
        let mut survivors: Vec<FighterId> = m
            .arena
            .iter()
            .filter(|f| !f.is_eliminated())
            .map(|f| f.id)
            .collect();
        survivors.sort_by(|a, b| {
            let (fa, fb) = (m.arena.get(*a), m.arena.get(*b));
            let stocks_a = fa.map_or(0, |f| f.stocks());
            let stocks_b = fb.map_or(0, |f| f.stocks());
            stocks_b
                .cmp(&stocks_a)
                .then(m.scores.get_total_score(*b).cmp(&m.scores.get_total_score(*a)))
                .then(a.cmp(b))
        });

        let order = survivors
            .iter()
            .copied()
            .chain(m.eliminations().iter().rev().copied());

        let results: Vec<FighterResult> = order
            .enumerate()
            .filter_map(|(rank, id)| {
                let fighter = m.arena.get(id)?;
                Some(FighterResult {
                    id,
                    character: fighter.stats.name.clone(),
                    is_human: fighter.is_human,
                    placement: rank as u32 + 1,
                    stocks: fighter.stocks(),
                    damage: fighter.damage(),
                    score: m.scores.get_total_score(id),
                    breakdown: m.scores.get_score_breakdown(id),
                })
            })
            .collect();

        let winner = if survivors.len() == 1 {
            Some(survivors[0])
        } else {
            None
        };

        Self {
            seed: m.config.seed,
            duration_ms: m.time(),
            frames: m.frame(),
            winner,
            timed_out: m.timed_out(),
            total_hits: m
                .log()
                .count_matching(|e| matches!(e, CombatEventType::Hit { .. })),
            total_knockouts: m
                .log()
                .count_matching(|e| matches!(e, CombatEventType::Knockout { .. })),
            results,
        }
    }

    pub fn result_for(&self, id: FighterId) -> Option<&FighterResult> {
        self.results.iter().find(|r| r.id == id)
    }
}
