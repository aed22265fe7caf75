//! Scoring constants

/// Stage credit per point of damage dealt
pub const STAGE_MULTIPLIER: f32 = 1.0;
/// Push credit for finishing a KO
pub const PUSH_AWARD: f32 = 100.0;
/// Commit credit per point of unexpired damage on a victim someone else finished
pub const COMMIT_MULTIPLIER: f32 = 0.3;
/// Bonus credit per hit in a combo
pub const COMBO_BONUS: f32 = 10.0;
/// How long a damage record counts toward assists
pub const LEDGER_WINDOW_MS: f32 = 5000.0;

// Weights in the total score
pub const STAGE_WEIGHT: f32 = 0.3;
pub const COMMIT_WEIGHT: f32 = 0.2;
