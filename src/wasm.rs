//! Browser bindings
//!
//! The game's render loop lives in JS. It calls `step` once per
//! `requestAnimationFrame`, then reads interpolated poses for each visible
//! part. Handles cross the boundary as plain `u32`s.

use wasm_bindgen::prelude::*;

use crate::config::PhysicsConfig;
use crate::physics::{BodyHandle, EntityRef, PhysicsHost, PhysicsWorld};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// JS-facing owner of the physics world
#[wasm_bindgen]
pub struct WasmPhysics {
    host: PhysicsHost,
}

#[wasm_bindgen]
impl WasmPhysics {
    /// Default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            host: PhysicsHost::default(),
        }
    }

    /// Configuration from a JSON string; missing fields keep defaults
    #[wasm_bindgen(js_name = "fromConfigJson")]
    pub fn from_config_json(json: &str) -> Result<WasmPhysics, JsError> {
        let config = PhysicsConfig::from_json(json)?;
        Ok(Self {
            host: PhysicsHost::new(config)?,
        })
    }

    fn world(&mut self) -> &mut PhysicsWorld {
        self.host.instance()
    }

    /// Tear the world down; the next call builds a fresh one
    pub fn destroy(&mut self) {
        self.host.destroy();
    }

    pub fn reset(&mut self) {
        self.world().reset();
    }

    pub fn pause(&mut self) {
        self.world().pause();
    }

    pub fn resume(&mut self) {
        self.world().resume();
    }

    #[wasm_bindgen(js_name = "isPaused")]
    pub fn is_paused(&mut self) -> bool {
        self.world().is_paused()
    }

    // === Bodies ===

    #[wasm_bindgen(js_name = "createBodyForPart")]
    #[allow(clippy::too_many_arguments)]
    pub fn create_body_for_part(
        &mut self,
        entity_id: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        is_static: bool,
        layer: u8,
    ) -> u32 {
        let entity = EntityRef::new(entity_id as u64, x, y);
        self.world()
            .create_body_for_part(&entity, width, height, is_static, layer)
            .0
    }

    #[wasm_bindgen(js_name = "setBodyDynamic")]
    pub fn set_body_dynamic(&mut self, handle: u32) {
        self.world().set_body_dynamic(BodyHandle(handle));
    }

    #[wasm_bindgen(js_name = "removeBody")]
    pub fn remove_body(&mut self, handle: u32) {
        self.world().remove_body(BodyHandle(handle));
    }

    #[wasm_bindgen(js_name = "getAllBodyIds")]
    pub fn all_body_ids(&mut self) -> Vec<u32> {
        self.world().all_body_ids().into_iter().map(|h| h.0).collect()
    }

    // === Stepping ===

    pub fn step(&mut self, delta_ms: f64) {
        self.world().step(delta_ms);
    }

    #[wasm_bindgen(js_name = "stepExact")]
    pub fn step_exact(&mut self, delta_ms: f64) {
        self.world().step_exact(delta_ms);
    }

    #[wasm_bindgen(js_name = "getInterpolationAlpha")]
    pub fn interpolation_alpha(&mut self) -> f32 {
        self.world().interpolation_alpha()
    }

    #[wasm_bindgen(js_name = "getStepCount")]
    pub fn step_count(&mut self) -> f64 {
        self.world().step_count() as f64
    }

    #[wasm_bindgen(js_name = "captureAlphaForDebug")]
    pub fn capture_alpha_for_debug(&mut self) -> f32 {
        self.world().capture_alpha_for_debug()
    }

    #[wasm_bindgen(js_name = "getCapturedAlpha")]
    pub fn captured_alpha(&mut self) -> f32 {
        self.world().captured_alpha()
    }

    // === Queries ===

    /// `[x, y]` in render units, or `undefined` for unknown handles
    #[wasm_bindgen(js_name = "getBodyPosition")]
    pub fn body_position(&mut self, handle: u32) -> Option<Vec<f32>> {
        self.world()
            .body_position(BodyHandle(handle))
            .map(|p| p.to_array().to_vec())
    }

    #[wasm_bindgen(js_name = "getBodyRotation")]
    pub fn body_rotation(&mut self, handle: u32) -> f32 {
        self.world().body_rotation(BodyHandle(handle))
    }

    #[wasm_bindgen(js_name = "getBodyPositionInterpolated")]
    pub fn body_position_interpolated(&mut self, handle: u32, alpha: f32) -> Option<Vec<f32>> {
        self.world()
            .body_position_interpolated(BodyHandle(handle), alpha)
            .map(|p| p.to_array().to_vec())
    }

    #[wasm_bindgen(js_name = "getBodyRotationInterpolated")]
    pub fn body_rotation_interpolated(&mut self, handle: u32, alpha: f32) -> f32 {
        self.world()
            .body_rotation_interpolated(BodyHandle(handle), alpha)
    }

    #[wasm_bindgen(js_name = "isBodySleeping")]
    pub fn is_body_sleeping(&mut self, handle: u32) -> bool {
        self.world().is_body_sleeping(BodyHandle(handle))
    }
}

impl Default for WasmPhysics {
    fn default() -> Self {
        Self::new()
    }
}
