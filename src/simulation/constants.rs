//! Orchestrator tuning (pixels, milliseconds)

/// Downward acceleration, px/s^2
pub const GRAVITY: f32 = 1800.0;
pub const MAX_FALL_SPEED: f32 = 1200.0;

/// Vertical slack when checking whether a strike connects
pub const HIT_VERTICAL_TOLERANCE: f32 = 80.0;

/// Gap between hits that still counts as one combo
pub const COMBO_WINDOW_MS: f32 = 1000.0;
pub const MIN_COMBO_HITS: u32 = 2;

/// Respawns drop in from this far above the platform
pub const RESPAWN_HEIGHT: f32 = 150.0;
