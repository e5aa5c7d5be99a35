//! Sandfall Engine - falling-sand particle simulation in WASM
//!
//! Architecture:
//! - core/        - color packing, RNG
//! - domain/      - particle kinds, particle records, world config
//! - spatial/     - collision map, particle store
//! - systems/     - movement rules and per-kind behaviors
//! - simulation/  - `WorldCore` (frame driver, placement, rasterize) + JS facade
//! - content/     - L-system obstacles

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod content;

pub mod world {
    pub use crate::simulation::*;
}

// Compatibility re-exports (short paths used by tests and hosts)
pub use domain::elements;
pub use systems::behaviors;
pub use systems::movement;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Sandfall engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use content::LSystemConfig;
pub use domain::config::{ConfigError, WorldConfig};
pub use domain::elements::ParticleKind;
pub use simulation::{FrameInput, World, WorldCore};

// Export element constants for JS
#[wasm_bindgen]
pub fn el_empty() -> u8 { domain::elements::EL_EMPTY }
#[wasm_bindgen]
pub fn el_sand() -> u8 { domain::elements::EL_SAND }
#[wasm_bindgen]
pub fn el_water() -> u8 { domain::elements::EL_WATER }
#[wasm_bindgen]
pub fn el_stone() -> u8 { domain::elements::EL_STONE }
