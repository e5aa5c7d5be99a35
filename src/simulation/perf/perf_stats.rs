use wasm_bindgen::prelude::*;

/// Counters and timings for the last tick. All zero while perf is disabled.
#[wasm_bindgen]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) rasterize_ms: f64,
    pub(super) particles_processed: u32,
    pub(super) particles_moved: u32,
    pub(super) contested_moves: u32,
    pub(super) evaporated: u32,
    pub(super) placed: u32,
    pub(super) active_particles: u32,
    pub(super) slots_used: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn rasterize_ms(&self) -> f64 { self.rasterize_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_processed(&self) -> u32 { self.particles_processed }
    #[wasm_bindgen(getter)]
    pub fn particles_moved(&self) -> u32 { self.particles_moved }
    #[wasm_bindgen(getter)]
    pub fn contested_moves(&self) -> u32 { self.contested_moves }
    #[wasm_bindgen(getter)]
    pub fn evaporated(&self) -> u32 { self.evaporated }
    #[wasm_bindgen(getter)]
    pub fn placed(&self) -> u32 { self.placed }
    #[wasm_bindgen(getter)]
    pub fn active_particles(&self) -> u32 { self.active_particles }
    #[wasm_bindgen(getter)]
    pub fn slots_used(&self) -> u32 { self.slots_used }
}
