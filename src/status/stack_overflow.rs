//! Stack overflow: stun a fighter who attacks too often
//!
//! Attacks are counted inside a sliding window. Reaching the character's
//! threshold stuns the fighter and resets the counter.

use serde::{Deserialize, Serialize};

use crate::core::types::TimeMs;
use crate::status::constants::{BASE_OVERFLOW_THRESHOLD, OVERFLOW_STUN_MS, OVERFLOW_WINDOW_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackOverflowState {
    pub attack_count: u32,
    pub window_start: TimeMs,
    /// Attacks per window that trigger the stun
    pub threshold: u32,
    pub stun_duration: TimeMs,
    pub is_stunned: bool,
    pub stun_timer: TimeMs,
}

impl Default for StackOverflowState {
    fn default() -> Self {
        Self::with_threshold(BASE_OVERFLOW_THRESHOLD)
    }
}

impl StackOverflowState {
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            attack_count: 0,
            window_start: 0.0,
            threshold: threshold.max(1),
            stun_duration: OVERFLOW_STUN_MS,
            is_stunned: false,
            stun_timer: 0.0,
        }
    }

    pub fn for_memory_management(memory_management: f32) -> Self {
        Self::with_threshold(effective_threshold(memory_management))
    }

    /// Count an attack attempt; false when the attack is rejected
    pub fn record_attack(&mut self, time: TimeMs) -> bool {
        if self.is_stunned {
            return false;
        }

        if time - self.window_start >= OVERFLOW_WINDOW_MS {
            self.attack_count = 0;
            self.window_start = time;
        }

        self.attack_count += 1;
        if self.attack_count >= self.threshold {
            self.is_stunned = true;
            self.stun_timer = self.stun_duration;
            self.attack_count = 0;
            return false;
        }
        true
    }

    pub fn update(&mut self, delta: TimeMs) {
        if !self.is_stunned {
            return;
        }
        self.stun_timer -= delta;
        if self.stun_timer <= 0.0 {
            self.is_stunned = false;
            self.stun_timer = 0.0;
        }
    }

    pub fn clear(&mut self) {
        self.attack_count = 0;
        self.is_stunned = false;
        self.stun_timer = 0.0;
    }
}

/// Threshold after scaling by memory management (0.0 to 1.0)
///
/// More memory-safe characters tolerate more attacks per window.
pub fn effective_threshold(memory_management: f32) -> u32 {
    let scaled = BASE_OVERFLOW_THRESHOLD as f32 * (1.0 + memory_management.clamp(0.0, 1.0));
    (scaled.floor() as u32).max(1)
}
