//! World lifetime owner
//!
//! At most one live [`PhysicsWorld`] per host. The host application owns the
//! `PhysicsHost` explicitly (no hidden global): `instance()` builds the world
//! lazily, `destroy()` tears it down so the next `instance()` starts a fresh
//! generation with new walls and handles counting from 0 again.

use super::world::PhysicsWorld;
use crate::config::PhysicsConfig;
use crate::error::ConfigError;

pub struct PhysicsHost {
    config: PhysicsConfig,
    world: Option<PhysicsWorld>,
    generation: u64,
}

impl Default for PhysicsHost {
    fn default() -> Self {
        Self {
            config: PhysicsConfig::default(),
            world: None,
            generation: 0,
        }
    }
}

impl PhysicsHost {
    /// Validate the config up front; no world is built until first access
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            world: None,
            generation: 0,
        })
    }

    /// The live world, built on first call
    pub fn instance(&mut self) -> &mut PhysicsWorld {
        if self.world.is_none() {
            self.generation += 1;
            log::info!("Building physics world (generation {})", self.generation);
        }
        let config = &self.config;
        self.world
            .get_or_insert_with(|| PhysicsWorld::from_validated(config.clone()))
    }

    /// The live world, if one exists (never builds)
    pub fn get(&self) -> Option<&PhysicsWorld> {
        self.world.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut PhysicsWorld> {
        self.world.as_mut()
    }

    /// Drop the world and every body in it
    pub fn destroy(&mut self) {
        if let Some(world) = self.world.take() {
            log::info!(
                "Physics world destroyed (generation {}, {} bodies)",
                self.generation,
                world.body_count()
            );
        }
    }

    pub fn is_live(&self) -> bool {
        self.world.is_some()
    }

    /// How many worlds this host has built
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_LAYER, FIXED_TIMESTEP_MS};
    use crate::physics::{BodyHandle, EntityRef};

    #[test]
    fn test_instance_is_lazy_and_idempotent() {
        let mut host = PhysicsHost::default();
        assert!(!host.is_live());
        assert!(host.get().is_none());

        host.instance()
            .create_body_for_part(&EntityRef::new(1, 100.0, 100.0), 10.0, 10.0, true, DEFAULT_LAYER);
        assert!(host.is_live());
        assert_eq!(host.generation(), 1);

        // Same world on the second call
        assert_eq!(host.instance().body_count(), 1);
        assert_eq!(host.generation(), 1);
    }

    #[test]
    fn test_destroy_then_instance_builds_fresh_world() {
        let mut host = PhysicsHost::default();
        let world = host.instance();
        world.create_body_for_part(&EntityRef::new(1, 100.0, 100.0), 10.0, 10.0, false, DEFAULT_LAYER);
        world.create_body_for_part(&EntityRef::new(2, 200.0, 100.0), 10.0, 10.0, false, DEFAULT_LAYER);
        world.step(FIXED_TIMESTEP_MS * 3.0);

        host.destroy();
        assert!(!host.is_live());
        // Destroying twice is harmless
        host.destroy();

        let world = host.instance();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.step_count(), 0);
        assert_eq!(world.boundary_count(), 2);
        let h = world.create_body_for_part(
            &EntityRef::new(3, 100.0, 100.0),
            10.0,
            10.0,
            false,
            DEFAULT_LAYER,
        );
        assert_eq!(h, BodyHandle(0));
        assert_eq!(host.generation(), 2);
    }

    #[test]
    fn test_scenario_identical_across_generations() {
        fn run(world: &mut PhysicsWorld) -> glam::Vec2 {
            let h = world.create_body_for_part(
                &EntityRef::new(1, 200.0, 400.0),
                100.0,
                50.0,
                false,
                DEFAULT_LAYER,
            );
            for _ in 0..60 {
                world.step_exact(16.67);
            }
            world.body_position(h).unwrap_or_default()
        }

        let mut host = PhysicsHost::default();
        let first = run(host.instance());
        host.destroy();
        let second = run(host.instance());

        assert!(first.y > 400.0);
        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PhysicsConfig {
            pixels_per_meter: 0.0,
            ..Default::default()
        };
        assert!(PhysicsHost::new(config).is_err());
    }
}
