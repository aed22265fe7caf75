//! Minimal platform physics for the headless orchestrator
//!
//! One solid-topped platform, passable from below. Gravity, integration
//! and landing only; everything else is the fighter's business.

use crate::ai::StageInfo;
use crate::core::types::TimeMs;
use crate::fighter::Fighter;
use crate::simulation::constants::{GRAVITY, MAX_FALL_SPEED};

/// Advance one fighter by `delta`; true when it landed this step
pub fn step_fighter(fighter: &mut Fighter, stage: &StageInfo, delta: TimeMs) -> bool {
    if !fighter.is_active() || delta <= 0.0 {
        return false;
    }
    let dt = delta / 1000.0;

    if !fighter.is_grounded() {
        fighter.velocity.y = (fighter.velocity.y + GRAVITY * dt).min(MAX_FALL_SPEED);
    }

    let previous_y = fighter.position.y;
    fighter.position = fighter.position + fighter.velocity * dt;
    let over_platform =
        fighter.position.x >= stage.left_edge && fighter.position.x <= stage.right_edge;

    if fighter.is_grounded() {
        if over_platform {
            fighter.position.y = stage.ground_y;
            fighter.velocity.y = fighter.velocity.y.min(0.0);
        } else {
            // Walked or got knocked off the edge
            fighter.set_grounded(false);
        }
        return false;
    }

    let crossed_surface = previous_y <= stage.ground_y && fighter.position.y >= stage.ground_y;
    if over_platform && fighter.velocity.y >= 0.0 && crossed_surface {
        fighter.position.y = stage.ground_y;
        fighter.velocity.y = 0.0;
        fighter.set_grounded(true);
        return true;
    }
    false
}
