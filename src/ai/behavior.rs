//! Behavior enumeration and per-controller AI state

use serde::{Deserialize, Serialize};

use crate::core::types::{FighterId, TimeMs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiBehavior {
    #[default]
    Idle,
    Chase,
    Attack,
    Defend,
    Retreat,
    Special,
    Recover,
    Edgeguard,
}

/// Designed mistakes substituted for a behavior when an accuracy roll fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputError {
    /// Do nothing for a moment
    Hesitate,
    /// Walk the wrong way briefly
    WrongDirection,
    /// Throw out a light attack regardless of range
    MistimedAttack,
}

impl InputError {
    pub fn all() -> &'static [InputError] {
        &[
            InputError::Hesitate,
            InputError::WrongDirection,
            InputError::MistimedAttack,
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiState {
    pub behavior: AiBehavior,
    pub target: Option<FighterId>,
    /// Counts down to the next decision
    pub decision_timer: TimeMs,
    /// Time spent in the current behavior
    pub action_timer: TimeMs,
    /// Attacks left in the current combo
    pub combo_counter: u32,
    pub combo_length: u32,
    pub last_direction: f32,
    /// Horizontal aim noise, resampled every decision
    pub aim_offset: f32,
    pub input_error: Option<InputError>,
    pub error_timer: TimeMs,
    pub wrong_direction_timer: TimeMs,
    pub dodge_jump_pending: bool,
    /// Pre-invert movement to cancel a reversed-controls debuff
    pub compensate_reversal: bool,
    /// Hold attacks back while close to a stack overflow
    pub pacing_attacks: bool,
}

impl AiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch behavior and reset the per-behavior counters
    pub fn enter(&mut self, behavior: AiBehavior) {
        self.behavior = behavior;
        self.action_timer = 0.0;
        self.combo_counter = 0;
        self.combo_length = 0;
        self.dodge_jump_pending = false;
        self.wrong_direction_timer = 0.0;
    }

    pub fn tick(&mut self, delta: TimeMs) {
        self.decision_timer -= delta;
        self.action_timer += delta;
        self.error_timer = (self.error_timer - delta).max(0.0);
        self.wrong_direction_timer = (self.wrong_direction_timer - delta).max(0.0);
        if self.error_timer <= 0.0 {
            self.input_error = None;
        }
    }

    pub fn has_input_error(&self) -> bool {
        self.input_error.is_some() && self.error_timer > 0.0
    }

    /// Forget everything, e.g. after a KO
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
