//! Fighter arena
//!
//! Fighters live in a flat vector addressed by `FighterId` slot. Status,
//! score and AI tables key off the same ids, so no system holds a
//! reference into another.

use serde::{Deserialize, Serialize};

use crate::core::types::{FighterId, Vec2};
use crate::fighter::Fighter;
use crate::roster::{CharacterStats, Companion};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FighterArena {
    fighters: Vec<Fighter>,
}

impl FighterArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fighter in the next free slot
    pub fn spawn(
        &mut self,
        stats: CharacterStats,
        companion: Companion,
        is_human: bool,
        starting_stocks: u32,
        position: Vec2,
    ) -> FighterId {
        let id = FighterId(self.fighters.len() as u32);
        self.fighters.push(Fighter::new(
            id,
            stats,
            companion,
            is_human,
            id.0,
            starting_stocks,
            position,
        ));
        id
    }

    pub fn get(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.get(id.index())
    }

    pub fn get_mut(&mut self, id: FighterId) -> Option<&mut Fighter> {
        self.fighters.get_mut(id.index())
    }

    /// Two distinct fighters mutably at once
    pub fn pair_mut(&mut self, a: FighterId, b: FighterId) -> Option<(&mut Fighter, &mut Fighter)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.fighters.len() || ib >= self.fighters.len() {
            return None;
        }
        if ia < ib {
            let (left, right) = self.fighters.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.fighters.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    pub fn ids(&self) -> Vec<FighterId> {
        self.fighters.iter().map(|f| f.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fighter> {
        self.fighters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Fighter> {
        self.fighters.iter_mut()
    }

    /// Fighters currently on stage
    pub fn active(&self) -> impl Iterator<Item = &Fighter> {
        self.fighters.iter().filter(|f| f.is_active())
    }

    /// Active fighters other than `id`, in slot order
    pub fn opponents_of(&self, id: FighterId) -> impl Iterator<Item = &Fighter> {
        self.fighters
            .iter()
            .filter(move |f| f.id != id && f.is_active())
    }

    /// Fighters that still have stocks (on stage or waiting to respawn)
    pub fn remaining(&self) -> usize {
        self.fighters.iter().filter(|f| !f.is_eliminated()).count()
    }
}
