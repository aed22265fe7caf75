//! Opaque stage geometry
//!
//! Plain coordinate comparisons only. The orchestrator owns the real stage;
//! this is just enough for AI edge awareness and blast-zone checks.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SmashError};
use crate::core::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageInfo {
    /// Left end of the main platform
    pub left_edge: f32,
    /// Right end of the main platform
    pub right_edge: f32,
    /// Top surface of the main platform (+y is down)
    pub ground_y: f32,
    pub blast_left: f32,
    pub blast_right: f32,
    pub blast_top: f32,
    pub blast_bottom: f32,
}

impl Default for StageInfo {
    fn default() -> Self {
        Self {
            left_edge: 200.0,
            right_edge: 1080.0,
            ground_y: 600.0,
            blast_left: -200.0,
            blast_right: 1480.0,
            blast_top: -400.0,
            blast_bottom: 1000.0,
        }
    }
}

impl StageInfo {
    pub fn center_x(&self) -> f32 {
        (self.left_edge + self.right_edge) * 0.5
    }

    pub fn width(&self) -> f32 {
        self.right_edge - self.left_edge
    }

    /// Horizontally past either platform edge
    pub fn is_off_stage(&self, position: Vec2) -> bool {
        position.x < self.left_edge || position.x > self.right_edge
    }

    /// Fallen more than `threshold` below the platform surface
    pub fn is_below_stage(&self, position: Vec2, threshold: f32) -> bool {
        position.y > self.ground_y + threshold
    }

    /// X of the platform edge closest to `x`
    pub fn nearest_edge(&self, x: f32) -> f32 {
        if (x - self.left_edge).abs() <= (self.right_edge - x).abs() {
            self.left_edge
        } else {
            self.right_edge
        }
    }

    /// Distance to the edge in the direction of travel
    ///
    /// Infinite when not moving; negative once already past that edge.
    pub fn distance_to_edge_ahead(&self, x: f32, direction: f32) -> f32 {
        if direction > 0.0 {
            self.right_edge - x
        } else if direction < 0.0 {
            x - self.left_edge
        } else {
            f32::INFINITY
        }
    }

    pub fn outside_blast_zone(&self, position: Vec2) -> bool {
        position.x < self.blast_left
            || position.x > self.blast_right
            || position.y < self.blast_top
            || position.y > self.blast_bottom
    }

    /// Evenly spaced spawn point `index` of `count`, standing on the platform
    pub fn spawn_point(&self, index: usize, count: usize) -> Vec2 {
        let slots = count.max(1) as f32 + 1.0;
        let x = self.left_edge + self.width() * (index as f32 + 1.0) / slots;
        Vec2::new(x, self.ground_y)
    }

    pub fn validate(&self) -> Result<()> {
        if self.left_edge >= self.right_edge {
            return Err(SmashError::InvalidConfig(format!(
                "left_edge ({}) must be < right_edge ({})",
                self.left_edge, self.right_edge
            )));
        }
        if self.blast_left >= self.left_edge || self.blast_right <= self.right_edge {
            return Err(SmashError::InvalidConfig(
                "side blast zones must lie outside the platform".into(),
            ));
        }
        if self.blast_top >= self.ground_y || self.blast_bottom <= self.ground_y {
            return Err(SmashError::InvalidConfig(
                "top/bottom blast zones must lie outside the platform".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_stage() {
        let stage = StageInfo::default();
        assert!(!stage.is_off_stage(Vec2::new(640.0, 600.0)));
        assert!(stage.is_off_stage(Vec2::new(150.0, 600.0)));
        assert!(stage.is_off_stage(Vec2::new(1100.0, 300.0)));
    }

    #[test]
    fn test_nearest_edge() {
        let stage = StageInfo::default();
        assert_eq!(stage.nearest_edge(300.0), 200.0);
        assert_eq!(stage.nearest_edge(1200.0), 1080.0);
    }

    #[test]
    fn test_distance_to_edge_ahead() {
        let stage = StageInfo::default();
        assert_eq!(stage.distance_to_edge_ahead(1000.0, 1.0), 80.0);
        assert_eq!(stage.distance_to_edge_ahead(1000.0, -1.0), 800.0);
        assert!(stage.distance_to_edge_ahead(1000.0, 0.0).is_infinite());
    }

    #[test]
    fn test_blast_zone() {
        let stage = StageInfo::default();
        assert!(!stage.outside_blast_zone(Vec2::new(640.0, 600.0)));
        assert!(stage.outside_blast_zone(Vec2::new(640.0, 1200.0)));
        assert!(stage.outside_blast_zone(Vec2::new(-300.0, 600.0)));
    }

    #[test]
    fn test_spawn_points_on_platform() {
        let stage = StageInfo::default();
        for i in 0..4 {
            let p = stage.spawn_point(i, 4);
            assert!(!stage.is_off_stage(p));
            assert_eq!(p.y, stage.ground_y);
        }
        assert!(stage.spawn_point(0, 2).x < stage.spawn_point(1, 2).x);
    }

    #[test]
    fn test_validate() {
        assert!(StageInfo::default().validate().is_ok());
        let bad = StageInfo {
            left_edge: 900.0,
            right_edge: 100.0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(SmashError::InvalidConfig(_))));

        let inside_blast = StageInfo {
            blast_bottom: 500.0,
            ..Default::default()
        };
        assert!(matches!(inside_blast.validate(), Err(SmashError::InvalidConfig(_))));
    }
}
