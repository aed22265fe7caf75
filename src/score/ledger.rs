//! Time-windowed damage ledger, one per victim

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{FighterId, TimeMs};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageRecord {
    pub attacker: FighterId,
    pub amount: f32,
    pub time: TimeMs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DamageLedger {
    records: Vec<DamageRecord>,
}

impl DamageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DamageRecord) {
        self.records.push(record);
    }

    /// Drop records older than `window` at time `now`
    pub fn prune(&mut self, now: TimeMs, window: TimeMs) {
        self.records.retain(|r| now - r.time <= window);
    }

    pub fn records(&self) -> &[DamageRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Summed damage per attacker, ordered by attacker id
    pub fn contributions(&self) -> BTreeMap<FighterId, f32> {
        let mut totals = BTreeMap::new();
        for record in &self.records {
            *totals.entry(record.attacker).or_insert(0.0) += record.amount;
        }
        totals
    }

    /// Most recent attacker, if any
    pub fn last_attacker(&self) -> Option<FighterId> {
        self.records
            .iter()
            .max_by(|a, b| a.time.total_cmp(&b.time))
            .map(|r| r.attacker)
    }
}
