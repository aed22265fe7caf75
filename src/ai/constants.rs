//! AI tuning constants (milliseconds, pixels)

// Decision cadence
pub const BASE_DECISION_MS: f32 = 600.0;
pub const MIN_DECISION_MS: f32 = 50.0;

// Target scoring
pub const TARGET_DISTANCE_WEIGHT: f32 = -0.5;
pub const TARGET_DAMAGE_WEIGHT: f32 = 2.0;
pub const TARGET_STOCK_WEIGHT: f32 = 50.0;
pub const TARGET_STOCK_BASELINE: f32 = 3.0;
pub const INVINCIBLE_TARGET_PENALTY: f32 = 1000.0;

// Behavior selection
/// How far below the platform counts as falling out of play
pub const RECOVER_FALL_THRESHOLD: f32 = 40.0;
pub const DEFEND_PROXIMITY: f32 = 120.0;
pub const EDGEGUARD_SKILL_FLOOR: f32 = 0.3;
pub const SPECIAL_USAGE_WEIGHT: f32 = 0.4;
pub const SPECIAL_DAMAGE_DIVISOR: f32 = 300.0;
pub const SPECIAL_DAMAGE_BIAS_CAP: f32 = 0.3;
pub const SPECIAL_UTILITY_BIAS: f32 = 0.15;
pub const OPTIMAL_RANGE_FACTOR: f32 = 0.8;
pub const SPACING_MARGIN: f32 = 40.0;
pub const SPACING_HOLD_BAND: f32 = 60.0;
pub const MEDIUM_RANGE: f32 = 320.0;
pub const RETREAT_DAMAGE: f32 = 80.0;

// Execution
pub const AIM_NOISE: f32 = 40.0;
pub const ARRIVE_TOLERANCE: f32 = 8.0;
pub const EDGE_MARGIN: f32 = 40.0;
pub const PREDICTION_PRECISION: f32 = 0.6;
pub const PREDICTION_LOOKAHEAD_S: f32 = 0.3;
pub const JUMP_HEIGHT_TRIGGER: f32 = 80.0;
pub const FACE_NUDGE: f32 = 0.05;
pub const ATTACK_BASE_CHANCE: f32 = 0.2;
pub const KILL_PERCENT: f32 = 100.0;
pub const DEFEND_BASE_MS: f32 = 800.0;
pub const DODGE_JUMP_FACTOR: f32 = 0.5;
pub const EDGEGUARD_TIMEOUT_MS: f32 = 2000.0;
pub const WRONG_DIRECTION_CHANCE: f32 = 0.5;
pub const WRONG_DIRECTION_MS: f32 = 250.0;
pub const RESERVE_JUMP_SKILL: f32 = 0.6;
pub const RESERVE_JUMP_DEPTH: f32 = 60.0;
pub const UTILITY_RECOVERY_DEPTH: f32 = 120.0;
pub const INPUT_ERROR_MS: f32 = 150.0;
pub const DI_SKILL_THRESHOLD: f32 = 0.3;
pub const DI_MAX_STRENGTH: f32 = 0.8;
/// Attacks short of the overflow threshold at which an adaptive AI holds back
pub const OVERFLOW_PACING_MARGIN: u32 = 2;

/// Time between decisions; faster reactions decide more often
pub fn decision_interval(reaction_speed: f32) -> f32 {
    (BASE_DECISION_MS * (1.0 - reaction_speed.clamp(0.0, 1.0))).max(MIN_DECISION_MS)
}

/// How long a defend lasts before giving up
pub fn defend_duration(reaction_speed: f32) -> f32 {
    DEFEND_BASE_MS * (1.0 - 0.5 * reaction_speed.clamp(0.0, 1.0))
}
