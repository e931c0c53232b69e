//! Simulation configuration
//!
//! One static object drives every tunable in the physics layer. It can be
//! built in code (`Default`) or loaded from JSON shipped with the game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Fixture material shared by every part collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            density: PART_DENSITY,
            friction: PART_FRICTION,
            restitution: PART_RESTITUTION,
        }
    }
}

/// Play-area rectangle in render units (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            center: Vec2::from_array(PLAY_AREA_CENTER),
            half_extents: Vec2::from_array(PLAY_AREA_HALF_EXTENTS),
        }
    }
}

impl PlayArea {
    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }
}

/// Physics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity magnitude (m/s²), pulling towards +y (screen-down)
    pub gravity: f32,
    /// Render units per simulation unit
    pub pixels_per_meter: f32,
    /// Duration of one fixed step (ms)
    pub fixed_timestep_ms: f64,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Material for part colliders
    pub part: FixtureConfig,
    /// Boundary wall thickness (pixels)
    pub wall_thickness: f32,
    pub play_area: PlayArea,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            pixels_per_meter: PIXELS_PER_METER,
            fixed_timestep_ms: FIXED_TIMESTEP_MS,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
            linear_damping: LINEAR_DAMPING,
            angular_damping: ANGULAR_DAMPING,
            part: FixtureConfig::default(),
            wall_thickness: WALL_THICKNESS,
            play_area: PlayArea::default(),
        }
    }
}

impl PhysicsConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded physics config: dt={:.3}ms, scale={}px/m",
            config.fixed_timestep_ms,
            config.pixels_per_meter
        );
        Ok(config)
    }

    /// Serialize to pretty JSON (for tooling and debug dumps)
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make stepping or unit conversion meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_timestep_ms", self.fixed_timestep_ms)?;
        positive("pixels_per_meter", self.pixels_per_meter as f64)?;
        positive("wall_thickness", self.wall_thickness as f64)?;
        positive("play_area.half_extents.x", self.play_area.half_extents.x as f64)?;
        positive("play_area.half_extents.y", self.play_area.half_extents.y as f64)?;
        positive("part.density", self.part.density as f64)?;
        non_negative("gravity", self.gravity as f64)?;
        non_negative("linear_damping", self.linear_damping as f64)?;
        non_negative("angular_damping", self.angular_damping as f64)?;
        non_negative("part.friction", self.part.friction as f64)?;
        non_negative("part.restitution", self.part.restitution as f64)?;
        if self.velocity_iterations == 0 {
            return Err(ConfigError::ZeroIterations { field: "velocity_iterations" });
        }
        if self.position_iterations == 0 {
            return Err(ConfigError::ZeroIterations { field: "position_iterations" });
        }
        Ok(())
    }

    /// Fixed step duration in seconds, as the engine expects it
    #[inline]
    pub fn fixed_timestep_secs(&self) -> f32 {
        (self.fixed_timestep_ms / 1000.0) as f32
    }

    /// Convert a render-space vector to simulation units
    #[inline]
    pub fn to_sim(&self, v: Vec2) -> Vec2 {
        v / self.pixels_per_meter
    }

    /// Convert a simulation-space vector to render units
    #[inline]
    pub fn to_render(&self, v: Vec2) -> Vec2 {
        v * self.pixels_per_meter
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
