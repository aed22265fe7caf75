//! Fighter state machine states

use serde::{Deserialize, Serialize};

/// Visible state of a fighter
///
/// `Attacking`, `Hitstun` and `Special` are sticky: they hold until their
/// own timer runs out. The rest are derived from physics every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FighterState {
    #[default]
    Idle,
    Walking,
    AirborneRising,
    AirborneFalling,
    Attacking,
    Hitstun,
    Special,
}

impl FighterState {
    /// Held by a timer rather than by physics
    pub fn is_sticky(&self) -> bool {
        matches!(
            self,
            FighterState::Attacking | FighterState::Hitstun | FighterState::Special
        )
    }

    pub fn is_airborne(&self) -> bool {
        matches!(
            self,
            FighterState::AirborneRising | FighterState::AirborneFalling
        )
    }

    /// State implied purely by physics
    pub fn from_physics(grounded: bool, velocity_x: f32, velocity_y: f32, walk_epsilon: f32) -> Self {
        if grounded {
            if velocity_x.abs() > walk_epsilon {
                FighterState::Walking
            } else {
                FighterState::Idle
            }
        } else if velocity_y < 0.0 {
            // +y is down, so negative vertical speed is rising
            FighterState::AirborneRising
        } else {
            FighterState::AirborneFalling
        }
    }
}
