use crate::domain::config::ColorMode;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn set_wind_chance(world: &mut WorldCore, chance: f32) {
    let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    world.config.wind_chance = chance;
}

pub(super) fn set_color_mode(world: &mut WorldCore, mode: ColorMode) {
    world.config.palette.color_mode = mode;
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
