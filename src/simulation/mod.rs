//! World - owns every piece of simulation state
//!
//! `WorldCore` is the single aggregate: grid size, the committed collision map
//! plus its scratch twin, the particle store, the behavior registry, the RNG
//! and the pixel buffer. Nothing lives in globals.
//!
//! One tick: snapshot -> per-particle update -> commit -> place -> rasterize
//! (see `step/step.rs` and `tick`).

use crate::content::LSystemConfig;
use crate::core::rng::SimRng;
use crate::domain::config::{ColorMode, ConfigError, WorldConfig};
use crate::domain::elements::ParticleKind;
use crate::domain::particle::{Particle, ParticleId};
use crate::spatial::{CollisionMap, ParticleStore};
use crate::systems::behaviors::BehaviorRegistry;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render.rs"]
mod render;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "validate/validate.rs"]
mod validate;
pub mod host;
pub mod input;
mod facade;

pub use commands::BRUSH_OFFSETS;
pub use facade::World;
pub use host::{FrameSink, FrameView, InputSource};
pub use input::{FrameInput, ToolState};
pub use perf_stats::PerfStats;
pub use validate::InvariantViolation;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    config: WorldConfig,
    /// Committed map: what rendering and the next snapshot see
    map: CollisionMap,
    /// Map under construction during a tick
    scratch: CollisionMap,
    particles: ParticleStore,
    behaviors: BehaviorRegistry,
    pixels: Vec<u32>,

    // State
    rng: SimRng,
    seed: u64,
    frame: u64,
    capacity_warned: bool,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world with default settings.
    ///
    /// Panics on a zero-sized grid; use `from_config` to get an error instead.
    pub fn new(width: u32, height: u32) -> Self {
        match Self::from_config(WorldConfig::with_size(width, height)) {
            Ok(world) => world,
            Err(e) => panic!("WorldCore::new({}, {}): {}", width, height, e),
        }
    }

    pub fn from_config(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(init::create_world_core(config))
    }

    pub fn from_config_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_config(WorldConfig::from_json(json)?)
    }

    pub fn width(&self) -> u32 { self.map.width() }

    pub fn height(&self) -> u32 { self.map.height() }

    pub fn frame(&self) -> u64 { self.frame }

    /// Seed the RNG was created from (log it to replay a session)
    pub fn seed(&self) -> u64 { self.seed }

    pub fn config(&self) -> &WorldConfig { &self.config }

    /// Store slots in use, evaporated particles included
    pub fn particle_count(&self) -> usize { self.particles.len() }

    pub fn active_particle_count(&self) -> usize { self.particles.active_count() }

    pub fn capacity(&self) -> usize { self.particles.capacity() }

    /// The committed collision map
    pub fn map(&self) -> &CollisionMap { &self.map }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles.iter()
    }

    /// Particle occupying (x, y) in the committed map
    pub fn particle_at(&self, x: i32, y: i32) -> Option<&Particle> {
        self.map.lookup(x, y).and_then(|id| self.particles.get(id))
    }

    pub fn kind_at(&self, x: i32, y: i32) -> Option<ParticleKind> {
        self.particle_at(x, y).map(|p| p.kind())
    }

    // === Settings ===

    pub fn wind_chance(&self) -> f32 {
        self.config.wind_chance
    }

    pub fn set_wind_chance(&mut self, chance: f32) {
        settings::set_wind_chance(self, chance);
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        settings::set_color_mode(self, mode);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Commands ===

    /// Insert one particle into the committed map. `None` if the cell is
    /// off-grid or taken, or the store is full.
    pub fn add_particle(&mut self, x: i32, y: i32, kind: ParticleKind) -> Option<ParticleId> {
        commands::add_particle(self, x, y, kind)
    }

    /// 2x2 brush anchored at the cursor cell; returns how many were inserted
    pub fn place_brush(&mut self, cx: i32, cy: i32, kind: ParticleKind) -> usize {
        commands::place_brush(self, cx, cy, kind)
    }

    /// Rasterize a line of particles (obstacles, mostly stone)
    /// Only the part of the line that lies on the grid is drawn.
    pub fn add_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, kind: ParticleKind) -> usize {
        commands::add_line(self, (x0 as f64, y0 as f64), (x1 as f64, y1 as f64), kind)
    }

    /// Grow an L-system and draw it into the world; returns particles placed
    pub fn stamp_lsystem(&mut self, lsystem: &LSystemConfig) -> Result<usize, ConfigError> {
        commands::stamp_lsystem(self, lsystem)
    }

    /// Drop every particle and restart the frame counter
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Frame ===

    /// Advance the simulation one tick (no placement, no rasterize)
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Full frame: step, then apply the brush, then redraw the pixel buffer
    pub fn tick(&mut self, input: &FrameInput) {
        self.step();
        if input.primary_down {
            let placed = self.place_brush(input.cursor_x, input.cursor_y, input.selected);
            if self.perf_enabled {
                self.perf_stats.placed = placed as u32;
            }
        }
        self.rasterize();
    }

    /// Redraw the pixel buffer from the committed map
    pub fn rasterize(&mut self) {
        if self.perf_enabled {
            let t0 = PerfTimer::start();
            render::rasterize(self);
            self.perf_stats.rasterize_ms = t0.elapsed_ms();
        } else {
            render::rasterize(self);
        }
    }

    /// W x H packed 0x00RRGGBB, row-major, top row first
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_ptr(&self) -> *const u32 {
        self.pixels.as_ptr()
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            width: self.width(),
            height: self.height(),
            frame: self.frame,
            pixels: &self.pixels,
        }
    }

    /// Check that the committed map and the store agree
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate::validate(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
