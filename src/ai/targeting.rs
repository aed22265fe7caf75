//! Target selection

use ordered_float::OrderedFloat;

use crate::ai::constants::*;
use crate::arena::FighterArena;
use crate::core::types::FighterId;
use crate::fighter::Fighter;

/// Desirability of `target` for `me`; higher is better
pub fn target_score(me: &Fighter, target: &Fighter) -> f32 {
    let distance = me.position.distance(&target.position);
    let mut score = TARGET_DISTANCE_WEIGHT * distance
        + TARGET_DAMAGE_WEIGHT * target.damage()
        + TARGET_STOCK_WEIGHT * (TARGET_STOCK_BASELINE - target.stocks() as f32);
    if target.is_invincible() {
        score -= INVINCIBLE_TARGET_PENALTY;
    }
    score
}

/// Best active opponent in slot order; the first of equal scores wins
pub fn select_target(me: &Fighter, arena: &FighterArena) -> Option<FighterId> {
    let mut best: Option<(OrderedFloat<f32>, FighterId)> = None;
    for candidate in arena.opponents_of(me.id) {
        let score = OrderedFloat(target_score(me, candidate));
        match best {
            Some((best_score, _)) if score <= best_score => {}
            _ => best = Some((score, candidate.id)),
        }
    }
    best.map(|(_, id)| id)
}
