//! Physics synchronization layer
//!
//! Keeps a variable-rate render loop smooth while rapier advances at a fixed,
//! deterministic rate:
//! - Fixed timestep only (accumulator, clamped catch-up)
//! - Pre-step snapshots for render interpolation
//! - Stable iteration order (by handle)
//! - Parts collide with the boundary walls only

pub mod boundary;
pub mod engine;
pub mod host;
pub mod layers;
pub mod registry;
pub mod snapshot;
pub mod timestep;
pub mod world;

pub use boundary::{WallSide, WallSpec, wall_specs};
pub use host::PhysicsHost;
pub use layers::{BOUNDARY_CATEGORY, LayerFilter, all_part_categories, layer_category};
pub use registry::{BodyHandle, BodyOwner};
pub use snapshot::Pose;
pub use timestep::FixedTimestep;
pub use world::{EntityRef, PhysicsWorld};
