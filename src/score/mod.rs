//! Damage ledgers and the four-part score breakdown

pub mod constants;
pub mod ledger;
pub mod system;

pub use ledger::{DamageLedger, DamageRecord};
pub use system::{KoCredit, ScoreBreakdown, ScoreSystem};
