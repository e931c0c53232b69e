//! Rapier2D adapter
//!
//! Wraps the rapier pipeline and body/collider sets behind a small surface:
//! create a boxed body, step by an exact `dt`, read poses, flip to dynamic,
//! remove. Nothing outside this module touches rapier sets or nalgebra types.

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::*;

use super::layers::LayerFilter;
use super::snapshot::Pose;
use crate::config::FixtureConfig;

/// Rapier handles for one body and its single collider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// Everything needed to create one box body, in simulation units
#[derive(Debug, Clone, Copy)]
pub struct BoxBodyDesc {
    pub position: Vec2,
    pub half_extents: Vec2,
    pub is_static: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub material: FixtureConfig,
    pub filter: LayerFilter,
    pub user_data: u128,
}

/// The rigid-body solver and its state
pub struct RapierEngine {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl RapierEngine {
    /// Create an empty world. Gravity is in simulation units, +y is down.
    pub fn new(gravity: Vec2, velocity_iterations: usize, position_iterations: usize) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        integration_parameters.num_internal_pgs_iterations = position_iterations.max(1);

        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Create a body with one cuboid collider
    pub fn create_box(&mut self, desc: &BoxBodyDesc) -> EngineBody {
        let body_type = if desc.is_static {
            RigidBodyType::Fixed
        } else {
            RigidBodyType::Dynamic
        };

        let rb = RigidBodyBuilder::new(body_type)
            .translation(vector![desc.position.x, desc.position.y])
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(desc.user_data)
            .build();
        let body = self.bodies.insert(rb);

        let collider = ColliderBuilder::cuboid(desc.half_extents.x, desc.half_extents.y)
            .density(desc.material.density)
            .friction(desc.material.friction)
            .restitution(desc.material.restitution)
            .collision_groups(desc.filter.collision)
            .solver_groups(desc.filter.solver)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        EngineBody { body, collider }
    }

    /// Advance the simulation by exactly `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Live pose in simulation units
    pub fn pose(&self, body: &EngineBody) -> Option<Pose> {
        self.bodies.get(body.body).map(|rb| {
            let t = rb.translation();
            Pose::new(Vec2::new(t.x, t.y), rb.rotation().angle())
        })
    }

    /// Switch a body to dynamic and wake it; false if the body is gone
    pub fn make_dynamic(&mut self, body: &EngineBody) -> bool {
        match self.bodies.get_mut(body.body) {
            Some(rb) => {
                rb.set_body_type(RigidBodyType::Dynamic, true);
                rb.wake_up(true);
                true
            }
            None => false,
        }
    }

    pub fn is_sleeping(&self, body: &EngineBody) -> Option<bool> {
        self.bodies.get(body.body).map(|rb| rb.is_sleeping())
    }

    pub fn is_fixed(&self, body: &EngineBody) -> Option<bool> {
        self.bodies.get(body.body).map(|rb| rb.is_fixed())
    }

    pub fn user_data(&self, body: &EngineBody) -> Option<u128> {
        self.bodies.get(body.body).map(|rb| rb.user_data)
    }

    /// Destroy a body and its collider
    pub fn remove(&mut self, body: &EngineBody) {
        self.bodies.remove(
            body.body,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Bodies in the engine, walls included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}
