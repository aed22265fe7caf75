//! Attacker/victim overlap detection

use crate::arena::FighterArena;
use crate::core::types::FighterId;
use crate::fighter::Fighter;
use crate::simulation::constants::HIT_VERTICAL_TOLERANCE;

/// Whether `attacker`'s live strike connects with `victim` this frame
///
/// Requires a live swing or special, a victim not already struck by it,
/// reach in front of the attacker and rough vertical alignment.
pub fn strike_reaches(attacker: &Fighter, victim: &Fighter) -> bool {
    if attacker.id == victim.id
        || !attacker.is_active()
        || !victim.is_active()
        || !attacker.is_attacking()
        || attacker.has_hit(victim.id)
    {
        return false;
    }
    let reach = if attacker.is_special_active() {
        attacker.special_range()
    } else {
        attacker.attack_range()
    };
    let dx = victim.position.x - attacker.position.x;
    let dy = victim.position.y - attacker.position.y;
    if dx.abs() > reach || dy.abs() > HIT_VERTICAL_TOLERANCE {
        return false;
    }
    dx * attacker.facing.sign() >= 0.0
}

/// Every connecting (attacker, victim) pair, in slot order
pub fn find_hits(arena: &FighterArena) -> Vec<(FighterId, FighterId)> {
    let mut hits = Vec::new();
    for attacker in arena.iter().filter(|f| f.is_attacking()) {
        for victim in arena.iter() {
            if strike_reaches(attacker, victim) {
                hits.push((attacker.id, victim.id));
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Facing, Vec2};
    use crate::fighter::AttackType;
    use crate::roster::{CharacterStats, Companion};

    fn duel(x0: f32, x1: f32) -> FighterArena {
        let mut arena = FighterArena::new();
        for x in [x0, x1] {
            let id = arena.spawn(
                CharacterStats::default(),
                Companion::default(),
                false,
                3,
                Vec2::new(x, 600.0),
            );
            arena.get_mut(id).unwrap().set_grounded(true);
        }
        arena
    }

    #[test]
    fn test_swing_in_front_connects() {
        let mut arena = duel(600.0, 650.0);
        arena.get_mut(FighterId(0)).unwrap().attack(AttackType::Light);
        assert_eq!(find_hits(&arena), vec![(FighterId(0), FighterId(1))]);
    }

    #[test]
    fn test_no_swing_no_hit() {
        let arena = duel(600.0, 650.0);
        assert!(find_hits(&arena).is_empty());
    }

    #[test]
    fn test_behind_attacker_misses() {
        let mut arena = duel(600.0, 650.0);
        let attacker = arena.get_mut(FighterId(0)).unwrap();
        attacker.facing = Facing::Left;
        attacker.attack(AttackType::Light);
        assert!(find_hits(&arena).is_empty());
    }

    #[test]
    fn test_out_of_reach_misses() {
        let mut arena = duel(600.0, 800.0);
        arena.get_mut(FighterId(0)).unwrap().attack(AttackType::Heavy);
        assert!(find_hits(&arena).is_empty());
    }

    #[test]
    fn test_already_hit_skipped() {
        let mut arena = duel(600.0, 650.0);
        let attacker = arena.get_mut(FighterId(0)).unwrap();
        attacker.attack(AttackType::Light);
        attacker.mark_hit(FighterId(1));
        assert!(find_hits(&arena).is_empty());
    }

    #[test]
    fn test_vertical_tolerance() {
        let mut arena = duel(600.0, 650.0);
        arena.get_mut(FighterId(1)).unwrap().position.y = 400.0;
        arena.get_mut(FighterId(0)).unwrap().attack(AttackType::Light);
        assert!(find_hits(&arena).is_empty());
    }
}
