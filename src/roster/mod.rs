//! Playable characters and their equippable companions

pub mod character;
pub mod companion;
pub mod loader;

pub use character::{Archetype, CharacterStats, DamageType, SpecialMove};
pub use companion::{Companion, CompanionAbility};
pub use loader::{load_roster, Roster};
