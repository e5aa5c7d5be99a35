use crate::core::rng::{resolve_seed, seeded};
use crate::domain::config::WorldConfig;
use crate::spatial::{CollisionMap, ParticleStore};
use crate::systems::behaviors::BehaviorRegistry;

use super::perf_stats::PerfStats;
use super::WorldCore;

/// Build a world from an already validated config. Everything grid-sized is
/// allocated here, once.
pub(super) fn create_world_core(config: WorldConfig) -> WorldCore {
    let width = config.width;
    let height = config.height;
    let seed = resolve_seed(config.seed);
    let capacity = config.capacity();

    log::info!(
        "world {}x{} created: capacity {} particles, seed {}",
        width,
        height,
        capacity,
        seed
    );

    WorldCore {
        map: CollisionMap::new(width, height),
        scratch: CollisionMap::new(width, height),
        particles: ParticleStore::new(capacity),
        behaviors: BehaviorRegistry::new(),
        pixels: vec![config.palette.background; capacity],
        rng: seeded(seed),
        seed,
        frame: 0,
        capacity_warned: false,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        config,
    }
}
