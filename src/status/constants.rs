//! Status effect tuning constants (milliseconds)

// Stack overflow: attack-rate stun
pub const OVERFLOW_WINDOW_MS: f32 = 5000.0;
pub const BASE_OVERFLOW_THRESHOLD: u32 = 15;
pub const OVERFLOW_STUN_MS: f32 = 2000.0;

// Bug mode: random debuff bundle
pub const BASE_BUG_CHANCE: f32 = 0.2;
pub const MIN_BUG_CHANCE: f32 = 0.01;
pub const MAX_BUG_CHANCE: f32 = 0.95;
pub const BUG_DURATION_MS: f32 = 4000.0;
pub const BUG_EXTENSION_MS: f32 = 1500.0;
pub const MAX_BUG_DURATION_MS: f32 = 8000.0;
pub const EXTRA_EFFECT_CHANCE: f32 = 0.35;
pub const MAX_BUG_EFFECTS: usize = 3;

/// Horizontal input multiplier under slowed movement
pub const SLOWED_MOVEMENT_FACTOR: f32 = 0.5;
