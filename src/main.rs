//! Fastener Physics headless demo
//!
//! Builds a small board of bolted-down parts, frees them one at a time and
//! drives the world from a jittered 60 Hz frame loop, logging interpolated
//! poses the way a renderer would read them.
//!
//! Usage: `fastener-physics [config.json]` (set `RUST_LOG=debug` for lifecycle logs)

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fastener_physics::consts::DEFAULT_LAYER;
    use fastener_physics::{EntityRef, PhysicsConfig, PhysicsHost};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| PhysicsConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => PhysicsConfig::default(),
    };

    let mut host = match PhysicsHost::new(config) {
        Ok(host) => host,
        Err(e) => {
            log::error!("Invalid config: {e}");
            std::process::exit(1);
        }
    };
    let world = host.instance();

    // Three rows of planks, alternating layers so neighbours never interact
    let mut parts = Vec::new();
    for row in 0..3u64 {
        for col in 0..4u64 {
            let id = row * 4 + col;
            let entity = EntityRef::new(id, 120.0 + col as f32 * 160.0, 300.0 + row as f32 * 200.0);
            let layer = if id % 2 == 0 { DEFAULT_LAYER } else { 2 };
            parts.push(world.create_body_for_part(&entity, 140.0, 40.0, true, layer));
        }
    }
    log::info!("Board ready: {} parts", world.body_count());

    let mut rng = Pcg32::seed_from_u64(0xB017);
    let mut freed = 0;
    for frame in 0..600u32 {
        // Free one part every half second
        if frame % 30 == 0 && freed < parts.len() {
            world.set_body_dynamic(parts[freed]);
            freed += 1;
        }

        // 60 Hz with jitter and the occasional long hitch
        let delta = if rng.random_bool(0.01) {
            250.0
        } else {
            16.67 + rng.random_range(-4.0..4.0)
        };
        world.step(delta);

        // Parts that fell below the board get cleaned up by game logic
        let floor = world.config().play_area.center.y + world.config().play_area.half_extents.y;
        for handle in world.all_body_ids() {
            if world.body_position(handle).is_some_and(|p| p.y > floor + 200.0) {
                world.remove_body(handle);
            }
        }

        if frame % 60 == 0 {
            let alpha = world.capture_alpha_for_debug();
            if let Some(&first) = world.all_body_ids().first() {
                log::info!(
                    "frame {frame}: steps={} alpha={alpha:.2} body {} at {:?} rot {:.3} sleeping={}",
                    world.step_count(),
                    first.0,
                    world.body_position_interpolated(first, alpha),
                    world.body_rotation_interpolated(first, alpha),
                    world.is_body_sleeping(first),
                );
            }
        }
    }

    log::info!(
        "Done: {} fixed steps, {} parts still on the board",
        world.step_count(),
        world.body_count()
    );

    world.reset();
    log::info!("After reset: {} parts", world.body_count());
    host.destroy();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `wasm::start`, this is just to satisfy the compiler
}
