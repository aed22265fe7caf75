//! Typed combat events consumed by the orchestrator
//!
//! Rendering and audio layers react to these instead of being called from
//! inside combat methods.

use serde::{Deserialize, Serialize};

use crate::core::types::{FighterId, TimeMs, Vec2};
use crate::roster::CompanionAbility;
use crate::status::BugEffect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventType {
    Hit {
        attacker: FighterId,
        victim: FighterId,
        damage: f32,
        knockback: Vec2,
        special: bool,
    },
    AttackRejected { fighter: FighterId },
    StackOverflow { fighter: FighterId },
    BugTriggered { fighter: FighterId, effect: BugEffect },
    Knockout { victim: FighterId, killer: Option<FighterId> },
    Eliminated { fighter: FighterId },
    SpecialUsed { fighter: FighterId, name: String },
    SubAbilityUsed { fighter: FighterId, ability: CompanionAbility },
    Respawned { fighter: FighterId },
    ComboEnded { fighter: FighterId, hits: u32 },
    MatchEnded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    pub time: TimeMs,
    pub event_type: CombatEventType,
}

/// Log of events raised during one or more frames
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatEventLog {
    pub events: Vec<CombatEvent>,
}

impl CombatEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: CombatEventType, time: TimeMs) {
        self.events.push(CombatEvent { time, event_type });
    }

    pub fn extend(&mut self, other: CombatEventLog) {
        self.events.extend(other.events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }

    /// Move every event out, leaving the log empty
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count_matching(&self, predicate: impl Fn(&CombatEventType) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(&e.event_type)).count()
    }
}
