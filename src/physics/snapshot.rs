//! Interpolation snapshots
//!
//! Before every fixed step the world records each tracked body's pose. The
//! renderer blends from that pre-step pose (alpha = 0) to the live pose
//! (alpha = 1) using the accumulator fraction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::lerp_angle;

/// Position (simulation units) and rotation (radians) of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
}

impl Pose {
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Blend towards `live`; rotation takes the shortest arc
    pub fn lerp(&self, live: &Pose, alpha: f32) -> Pose {
        let alpha = alpha.clamp(0.0, 1.0);
        Pose {
            position: self.position.lerp(live.position, alpha),
            rotation: lerp_angle(self.rotation, live.rotation, alpha),
        }
    }
}

/// Blend from an optional snapshot to the live pose.
///
/// No snapshot means the engine has not stepped since the body was created,
/// so there is nothing to blend from and the live pose is returned as-is.
#[inline]
pub fn interpolate(snapshot: Option<&Pose>, live: Pose, alpha: f32) -> Pose {
    match snapshot {
        Some(prev) => prev.lerp(&live, alpha),
        None => live,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_lerp_endpoints() {
        let prev = Pose::new(Vec2::new(1.0, 2.0), 0.1);
        let live = Pose::new(Vec2::new(3.0, 6.0), 0.5);

        let start = prev.lerp(&live, 0.0);
        assert_eq!(start.position, prev.position);
        assert!((start.rotation - prev.rotation).abs() < 1e-6);

        let end = prev.lerp(&live, 1.0);
        assert!((end.position - live.position).length() < 1e-6);
        assert!((end.rotation - live.rotation).abs() < 1e-6);

        let mid = prev.lerp(&live, 0.5);
        assert!((mid.position - Vec2::new(2.0, 4.0)).length() < 1e-6);
        assert!((mid.rotation - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_rotation_wraps_short_way() {
        let prev = Pose::new(Vec2::ZERO, 0.9 * PI);
        let live = Pose::new(Vec2::ZERO, -0.9 * PI);
        let mid = prev.lerp(&live, 0.5);
        assert!((mid.rotation.abs() - PI).abs() < 1e-4);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let prev = Pose::new(Vec2::ZERO, 0.0);
        let live = Pose::new(Vec2::new(10.0, 0.0), 0.0);
        assert_eq!(prev.lerp(&live, -3.0).position, Vec2::ZERO);
        assert!((prev.lerp(&live, 7.0).position.x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_snapshot_returns_live() {
        let live = Pose::new(Vec2::new(4.0, 5.0), 1.0);
        for alpha in [0.0, 0.3, 1.0] {
            assert_eq!(interpolate(None, live, alpha), live);
        }
    }
}
