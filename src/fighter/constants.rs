//! Fighter tuning constants
//!
//! Times are milliseconds, distances pixels, speeds pixels per second.

// Movement
pub const GROUND_ACCEL: f32 = 2400.0;
pub const AIR_CONTROL: f32 = 0.6;
pub const MAX_RUN_SPEED: f32 = 360.0;
pub const GROUND_FRICTION: f32 = 0.80;
/// Below this horizontal speed a grounded fighter counts as standing still
pub const WALK_EPSILON: f32 = 5.0;

// Jumping
pub const JUMP_FORCE: f32 = 650.0;
pub const AIR_JUMP_FACTOR: f32 = 0.85;
pub const MAX_AIR_JUMPS: u32 = 1;

// Attacks: light, medium, heavy
pub const ATTACK_COOLDOWNS_MS: [f32; 3] = [300.0, 500.0, 800.0];
pub const ATTACK_DURATIONS_MS: [f32; 3] = [150.0, 250.0, 400.0];
pub const DAMAGE_MULTIPLIERS: [f32; 3] = [1.0, 1.5, 2.2];
pub const KNOCKBACK_MULTIPLIERS: [f32; 3] = [1.0, 1.3, 1.8];
pub const BASE_KNOCKBACK_X: f32 = 220.0;
pub const BASE_KNOCKBACK_Y: f32 = 160.0;
pub const BASE_ATTACK_RANGE: f32 = 70.0;

// Specials
pub const SPECIAL_STAT_SCALE: f32 = 0.5;
pub const SPECIAL_KNOCKBACK_X: f32 = 420.0;
pub const SPECIAL_KNOCKBACK_Y: f32 = 200.0;
pub const SPECIAL_LUNGE_SPEED: f32 = 250.0;
pub const UTILITY_BOOST_X: f32 = 200.0;
pub const UTILITY_BOOST_Y: f32 = 700.0;

// Damage response
pub const HITSTUN_BASE_MS: f32 = 100.0;
pub const HITSTUN_PER_DAMAGE_MS: f32 = 2.0;
pub const HITSTUN_MAX_MS: f32 = 500.0;
pub const KNOCKBACK_WINDOW_MS: f32 = 300.0;

// Lifecycle
pub const DEFAULT_STOCKS: u32 = 3;
pub const FIREWALL_DURATION_MS: f32 = 1500.0;

/// Knockback scale for a given accumulated damage percentage
pub fn knockback_scale(damage: f32) -> f32 {
    1.0 + damage / 100.0
}

/// Hitstun duration for a given accumulated damage percentage
pub fn hitstun_duration(damage: f32) -> f32 {
    (HITSTUN_BASE_MS + damage * HITSTUN_PER_DAMAGE_MS).min(HITSTUN_MAX_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_tables_increase() {
        assert!(DAMAGE_MULTIPLIERS.windows(2).all(|w| w[0] < w[1]));
        assert!(KNOCKBACK_MULTIPLIERS.windows(2).all(|w| w[0] < w[1]));
        assert!(ATTACK_COOLDOWNS_MS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_hitstun_clamped() {
        assert_eq!(hitstun_duration(0.0), 100.0);
        assert_eq!(hitstun_duration(60.0), 220.0);
        assert_eq!(hitstun_duration(200.0), 500.0);
        assert_eq!(hitstun_duration(999.0), 500.0);
    }

    #[test]
    fn test_knockback_scale() {
        assert_eq!(knockback_scale(0.0), 1.0);
        assert_eq!(knockback_scale(50.0), 1.5);
    }

    #[test]
    fn test_swings_shorter_than_cooldowns() {
        for i in 0..3 {
            assert!(ATTACK_DURATIONS_MS[i] <= ATTACK_COOLDOWNS_MS[i]);
        }
    }
}
