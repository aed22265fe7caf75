//! Combat entity: movement, attacks, hitstun, knockback and stocks
//!
//! The fighter never reaches into the orchestrator. Visual and audio
//! layers learn about what happened through `CombatEvent`s.

pub mod attack;
pub mod constants;
pub mod events;
#[allow(clippy::module_inception)]
pub mod fighter;
pub mod input;
pub mod state;

pub use attack::{AttackType, DamageOutput, Strike};
pub use events::{CombatEvent, CombatEventLog, CombatEventType};
pub use fighter::Fighter;
pub use input::{DirectionalInfluence, FighterInput, InputOutcome};
pub use state::FighterState;
