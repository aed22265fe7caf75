//! Personality defaults per character archetype

use serde::{Deserialize, Serialize};

use crate::roster::Archetype;

/// Behavioral tendencies (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiPersonality {
    /// Tendency to attack rather than retreat or defend at close range
    pub aggression: f32,
    /// Tendency to reach for the special move
    pub special_usage: f32,
}

impl Default for AiPersonality {
    fn default() -> Self {
        Self::for_archetype(Archetype::Balanced)
    }
}

impl AiPersonality {
    pub fn for_archetype(archetype: Archetype) -> Self {
        let (aggression, special_usage) = match archetype {
            Archetype::Attacker => (0.8, 0.4),
            Archetype::Defender => (0.3, 0.3),
            Archetype::Trickster => (0.5, 0.7),
            Archetype::Mage => (0.4, 0.9),
            Archetype::Speedster => (0.7, 0.3),
            Archetype::Balanced => (0.5, 0.5),
        };
        Self {
            aggression,
            special_usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetypes_bounded() {
        for archetype in Archetype::all() {
            let p = AiPersonality::for_archetype(*archetype);
            assert!((0.0..=1.0).contains(&p.aggression));
            assert!((0.0..=1.0).contains(&p.special_usage));
        }
    }

    #[test]
    fn test_archetypes_distinct() {
        let attacker = AiPersonality::for_archetype(Archetype::Attacker);
        let defender = AiPersonality::for_archetype(Archetype::Defender);
        let mage = AiPersonality::for_archetype(Archetype::Mage);
        assert!(attacker.aggression > defender.aggression);
        assert!(mage.special_usage > attacker.special_usage);
    }
}
