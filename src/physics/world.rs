//! Physics world manager
//!
//! The one object game code talks to. It owns the engine, the boundary walls,
//! the body registry and the fixed-timestep clock. Engine handles never leave
//! this type; callers only ever see [`BodyHandle`]s.
//!
//! Unknown handles are routine (a part can be removed the same frame its pose
//! is polled), so every query resolves them to a neutral value instead of an
//! error: `None` position, `0.0` rotation, "sleeping", or a silent no-op.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::build_walls;
use super::engine::{BoxBodyDesc, EngineBody, RapierEngine};
use super::layers::part_filter;
use super::registry::{BodyHandle, BodyOwner, BodyRegistry};
use super::snapshot::{Pose, interpolate};
use super::timestep::FixedTimestep;
use crate::config::PhysicsConfig;
use crate::error::ConfigError;

/// The game entity a part body belongs to, positioned in render units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: u64,
    pub position: Vec2,
}

impl EntityRef {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Vec2::new(x, y),
        }
    }
}

/// One live simulation: engine, walls, tracked parts and clock
pub struct PhysicsWorld {
    config: PhysicsConfig,
    engine: RapierEngine,
    walls: Vec<EngineBody>,
    registry: BodyRegistry<EngineBody>,
    clock: FixedTimestep,
    paused: bool,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::from_validated(PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    /// Build a world with downward gravity and boundary walls
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: PhysicsConfig) -> Self {
        let mut engine = RapierEngine::new(
            Vec2::new(0.0, config.gravity),
            config.velocity_iterations,
            config.position_iterations,
        );
        let walls = build_walls(&mut engine, &config);
        log::info!(
            "Physics world created: gravity={}m/s², dt={:.3}ms, {} walls",
            config.gravity,
            config.fixed_timestep_ms,
            walls.len()
        );

        Self {
            clock: FixedTimestep::new(config.fixed_timestep_ms),
            config,
            engine,
            walls,
            registry: BodyRegistry::new(),
            paused: false,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    // === Body lifecycle ===

    /// Create a box body for a part and return its handle.
    ///
    /// Position and size are in render units. `layer` must be in `1..=8`
    /// (see [`crate::consts::DEFAULT_LAYER`]); parts only ever get a collision
    /// response from the boundary walls.
    pub fn create_body_for_part(
        &mut self,
        entity: &EntityRef,
        width: f32,
        height: f32,
        is_static: bool,
        layer: u8,
    ) -> BodyHandle {
        let handle = self.registry.allocate();
        let owner = BodyOwner {
            entity_id: entity.id,
            handle,
        };

        let body = self.engine.create_box(&BoxBodyDesc {
            position: self.config.to_sim(entity.position),
            half_extents: self.config.to_sim(Vec2::new(width, height) / 2.0),
            is_static,
            linear_damping: self.config.linear_damping,
            angular_damping: self.config.angular_damping,
            material: self.config.part,
            filter: part_filter(layer),
            user_data: owner.to_user_data(),
        });
        self.registry.insert_at(handle, body);

        log::debug!(
            "Body {} created for entity {} ({}x{}, {}, layer {})",
            handle.0,
            entity.id,
            width,
            height,
            if is_static { "static" } else { "dynamic" },
            layer
        );
        handle
    }

    /// Free a part: static → dynamic, and wake it
    pub fn set_body_dynamic(&mut self, handle: BodyHandle) {
        if let Some(tracked) = self.registry.get(handle) {
            if self.engine.make_dynamic(&tracked.body) {
                log::debug!("Body {} is now dynamic", handle.0);
            }
        }
    }

    /// Destroy a body, its registry entry and its snapshot
    pub fn remove_body(&mut self, handle: BodyHandle) {
        if let Some(body) = self.registry.remove(handle) {
            self.engine.remove(&body);
            log::debug!("Body {} removed", handle.0);
        }
    }

    /// Currently valid handles (diagnostics)
    pub fn all_body_ids(&self) -> Vec<BodyHandle> {
        self.registry.handles()
    }

    pub fn body_count(&self) -> usize {
        self.registry.len()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.registry.contains(handle)
    }

    /// Number of boundary wall bodies (always 2)
    pub fn boundary_count(&self) -> usize {
        self.walls.len()
    }

    /// Reverse lookup of the owning entity, read back from engine user data
    pub fn body_owner(&self, handle: BodyHandle) -> Option<BodyOwner> {
        let tracked = self.registry.get(handle)?;
        self.engine
            .user_data(&tracked.body)
            .and_then(BodyOwner::from_user_data)
    }

    /// Whether the body is still immovable; unknown handles are not static
    pub fn is_body_static(&self, handle: BodyHandle) -> bool {
        self.registry
            .get(handle)
            .and_then(|tracked| self.engine.is_fixed(&tracked.body))
            .unwrap_or(false)
    }

    // === Stepping ===

    /// Advance by whole fixed steps for a frame that took `delta_ms`.
    ///
    /// Each step first records every tracked body's pre-step pose, then runs
    /// the engine for exactly one fixed interval. No-op while paused.
    pub fn step(&mut self, delta_ms: f64) {
        if self.paused {
            return;
        }

        self.clock.accumulate(delta_ms);
        let dt = self.config.fixed_timestep_secs();
        while self.clock.step_due() {
            self.capture_snapshots();
            self.engine.step(dt);
            self.clock.complete_step();
            log::trace!("Fixed step {}", self.clock.step_count());
        }
    }

    /// Step the engine once by exactly `delta_ms`.
    ///
    /// Ignores the pause flag and the accumulator, takes no snapshots and does
    /// not count towards [`PhysicsWorld::step_count`]. Used to drive tests on
    /// an exact, repeatable schedule.
    pub fn step_exact(&mut self, delta_ms: f64) {
        self.engine.step((delta_ms / 1000.0) as f32);
    }

    fn capture_snapshots(&mut self) {
        let engine = &self.engine;
        for (_, tracked) in self.registry.iter_mut() {
            if let Some(pose) = engine.pose(&tracked.body) {
                tracked.snapshot = Some(pose);
            }
        }
    }

    /// Fraction of the way into the next fixed step, in [0, 1]
    pub fn interpolation_alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Fixed steps run since creation or the last reset
    pub fn step_count(&self) -> u64 {
        self.clock.step_count()
    }

    pub fn accumulator_ms(&self) -> f64 {
        self.clock.accumulator_ms()
    }

    /// Record the alpha the renderer is using right now (debug overlay)
    pub fn capture_alpha_for_debug(&mut self) -> f32 {
        self.clock.capture_alpha()
    }

    pub fn captured_alpha(&self) -> f32 {
        self.clock.captured_alpha()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Clear every part for a level restart, keeping the world and walls.
    ///
    /// All previously issued handles become invalid; numbering restarts at 0.
    pub fn reset(&mut self) {
        let bodies = self.registry.clear();
        for body in &bodies {
            self.engine.remove(body);
        }
        self.clock.reset();
        self.paused = false;
        log::info!("Physics world reset ({} bodies removed)", bodies.len());
    }

    // === Queries ===

    fn live_pose(&self, handle: BodyHandle) -> Option<(Option<&Pose>, Pose)> {
        let tracked = self.registry.get(handle)?;
        let live = self.engine.pose(&tracked.body)?;
        Some((tracked.snapshot.as_ref(), live))
    }

    /// Live position in render units
    pub fn body_position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.live_pose(handle)
            .map(|(_, live)| self.config.to_render(live.position))
    }

    /// Live rotation in radians; 0 for unknown handles
    pub fn body_rotation(&self, handle: BodyHandle) -> f32 {
        self.live_pose(handle)
            .map(|(_, live)| live.rotation)
            .unwrap_or(0.0)
    }

    /// Position blended from the last pre-step snapshot to the live pose
    pub fn body_position_interpolated(&self, handle: BodyHandle, alpha: f32) -> Option<Vec2> {
        self.live_pose(handle).map(|(snapshot, live)| {
            self.config
                .to_render(interpolate(snapshot, live, alpha).position)
        })
    }

    /// Rotation blended along the shortest arc; 0 for unknown handles
    pub fn body_rotation_interpolated(&self, handle: BodyHandle, alpha: f32) -> f32 {
        self.live_pose(handle)
            .map(|(snapshot, live)| interpolate(snapshot, live, alpha).rotation)
            .unwrap_or(0.0)
    }

    /// Pre-step pose recorded before the last fixed step (render units)
    pub fn body_snapshot(&self, handle: BodyHandle) -> Option<Pose> {
        let snapshot = self.registry.get(handle)?.snapshot?;
        Some(Pose::new(
            self.config.to_render(snapshot.position),
            snapshot.rotation,
        ))
    }

    /// True if the body is asleep, or unknown
    pub fn is_body_sleeping(&self, handle: BodyHandle) -> bool {
        self.registry
            .get(handle)
            .and_then(|tracked| self.engine.is_sleeping(&tracked.body))
            .unwrap_or(true)
    }
}
