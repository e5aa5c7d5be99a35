use wasm_bindgen::prelude::*;

use crate::content::LSystemConfig;
use crate::domain::elements::{ElementId, ParticleKind};

use super::input::FrameInput;
use super::perf_stats::PerfStats;
use super::WorldCore;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Element ids arriving from JS are untrusted; unknown ones place nothing
fn kind_from_js(element: ElementId) -> Option<ParticleKind> {
    let kind = ParticleKind::from_id(element);
    if kind.is_none() {
        log::warn!("ignoring unknown element id {}", element);
    }
    kind
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: WorldCore::new(width, height),
        }
    }

    /// Create a world from a JSON `WorldConfig` (missing fields take defaults)
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<World, JsValue> {
        let core = WorldCore::from_config_json(json).map_err(to_js_error)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn active_particle_count(&self) -> u32 { self.core.active_particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> u32 { self.core.capacity() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> u64 { self.core.seed() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    pub fn set_wind_chance(&mut self, chance: f32) {
        self.core.set_wind_chance(chance);
    }

    /// One full frame. `cursor_x/y` are grid cells; `element` is the selected id.
    pub fn tick(&mut self, cursor_x: i32, cursor_y: i32, primary_down: bool, element: u8) {
        let Some(selected) = ParticleKind::from_id(element) else {
            // Still advance the world, just without placement
            if primary_down {
                log::warn!("ignoring unknown element id {}", element);
            }
            self.core.tick(&FrameInput::idle(ParticleKind::Sand));
            return;
        };
        self.core.tick(&FrameInput {
            cursor_x,
            cursor_y,
            primary_down,
            selected,
        });
    }

    /// Step the simulation forward without placement or redraw
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Redraw the pixel buffer from the current state
    pub fn rasterize(&mut self) {
        self.core.rasterize();
    }

    /// Add a particle at position
    pub fn add_particle(&mut self, x: i32, y: i32, element: u8) -> bool {
        kind_from_js(element).is_some_and(|kind| self.core.add_particle(x, y, kind).is_some())
    }

    /// 2x2 brush; returns how many particles were placed
    pub fn place_brush(&mut self, cx: i32, cy: i32, element: u8) -> u32 {
        kind_from_js(element).map_or(0, |kind| self.core.place_brush(cx, cy, kind) as u32)
    }

    pub fn add_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, element: u8) -> u32 {
        kind_from_js(element).map_or(0, |kind| self.core.add_line(x0, y0, x1, y1, kind) as u32)
    }

    /// Element id bound to a key name, if any
    pub fn element_for_key(&self, key: &str) -> Option<u8> {
        self.core.config().keys.kind_for(key).map(ParticleKind::id)
    }

    /// Grow and draw an L-system described by JSON (`{}` gives the default tree)
    pub fn stamp_lsystem(&mut self, json: &str) -> Result<u32, JsValue> {
        let config = LSystemConfig::from_json(json).map_err(to_js_error)?;
        let placed = self.core.stamp_lsystem(&config).map_err(to_js_error)?;
        Ok(placed as u32)
    }

    /// Clear all particles
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Get pointer to the pixel buffer (W*H packed 0x00RRGGBB)
    pub fn pixels_ptr(&self) -> *const u32 {
        self.core.pixels_ptr()
    }

    pub fn pixels_len(&self) -> usize {
        self.core.pixels().len()
    }

    pub fn pixels_byte_len(&self) -> usize {
        std::mem::size_of_val(self.core.pixels())
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }
}
