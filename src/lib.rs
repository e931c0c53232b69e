//! Fastener Physics - fixed-timestep rigid-body layer for a fastener puzzle
//!
//! Core modules:
//! - `physics`: World manager, body registry, stepping and interpolation
//! - `config`: Data-driven simulation tuning (JSON loadable)
//! - `error`: Configuration errors
//! - `wasm`: Browser bindings for the host render loop (wasm32 only)

pub mod config;
pub mod error;
pub mod physics;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{FixtureConfig, PhysicsConfig, PlayArea};
pub use error::ConfigError;
pub use physics::{BodyHandle, BodyOwner, EntityRef, PhysicsHost, PhysicsWorld, Pose};

/// Simulation configuration defaults
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const FIXED_TIMESTEP_MS: f64 = 1000.0 / 60.0;
    /// Frame deltas are clamped to this many fixed steps to prevent spiral of death
    pub const MAX_CATCH_UP_FACTOR: f64 = 4.0;

    /// Render units (pixels) per simulation unit (meter)
    pub const PIXELS_PER_METER: f32 = 30.0;
    /// Gravity magnitude in m/s², applied towards screen-down (+y)
    pub const GRAVITY: f32 = 10.0;

    /// Solver iterations per fixed step
    pub const VELOCITY_ITERATIONS: usize = 8;
    pub const POSITION_ITERATIONS: usize = 3;

    /// Part body defaults
    pub const LINEAR_DAMPING: f32 = 0.1;
    pub const ANGULAR_DAMPING: f32 = 0.1;
    pub const PART_DENSITY: f32 = 1.0;
    pub const PART_FRICTION: f32 = 0.3;
    pub const PART_RESTITUTION: f32 = 0.2;

    /// Boundary wall thickness (pixels)
    pub const WALL_THICKNESS: f32 = 20.0;

    /// Play area (pixels): 720x1280 portrait board
    pub const PLAY_AREA_CENTER: [f32; 2] = [360.0, 640.0];
    pub const PLAY_AREA_HALF_EXTENTS: [f32; 2] = [360.0, 640.0];

    /// Valid collision layers for parts
    pub const MIN_LAYER: u8 = 1;
    pub const MAX_LAYER: u8 = 8;
    pub const DEFAULT_LAYER: u8 = 1;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Blend from `from` to `to` along the shortest arc.
///
/// The result is always normalized to (-π, π], so blending across the ±π seam
/// never sweeps the long way around.
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let delta = normalize_angle(to - from);
    normalize_angle(from + delta * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
        assert!((normalize_angle(0.25 + 2.0 * PI) - 0.25).abs() < 1e-5);
        assert!((normalize_angle(-0.5 * PI) + 0.5 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_angle_takes_short_way() {
        let mid = lerp_angle(0.9 * PI, -0.9 * PI, 0.5);
        // Crossing the seam lands on ±π, never near 0
        assert!((mid.abs() - PI).abs() < 1e-4, "mid = {mid}");
    }

    #[test]
    fn test_lerp_angle_endpoints() {
        assert!((lerp_angle(0.2, 1.4, 0.0) - 0.2).abs() < 1e-6);
        assert!((lerp_angle(0.2, 1.4, 1.0) - 1.4).abs() < 1e-6);
        assert!((lerp_angle(0.2, 1.4, 0.5) - 0.8).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_lerp_angle_stays_in_range(
            from in -PI..=PI,
            to in -PI..=PI,
            t in 0.0f32..=1.0,
        ) {
            let r = lerp_angle(from, to, t);
            prop_assert!(r > -PI - 1e-6 && r <= PI + 1e-6);
        }

        #[test]
        fn prop_lerp_angle_never_exceeds_half_turn(
            from in -PI..=PI,
            to in -PI..=PI,
            t in 0.0f32..=1.0,
        ) {
            // Arc travelled from the start is at most t half-turns
            let r = lerp_angle(from, to, t);
            prop_assert!(normalize_angle(r - from).abs() <= t * PI + 1e-4);
        }
    }
}
