use crate::domain::particle::ParticleId;
use crate::systems::behaviors::UpdateContext;

use super::{PerfTimer, WorldCore};

/// One simulation tick.
///
/// Every particle decides against `world.map` (frozen for the whole pass)
/// and writes into `world.scratch`; only after the pass does the scratch map
/// become the committed one. Update order therefore cannot leak into
/// decisions: particle 5 never sees where particle 3 went this tick.
pub(super) fn step(world: &mut WorldCore) {
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === SNAPSHOT ===
    // Unmoved particles persist implicitly, but each one still clears and
    // re-asserts its own cell below.
    world.scratch.copy_from(&world.map);

    let wind_chance = world.config.wind_chance;
    let count = world.particles.len() as ParticleId;

    let mut processed = 0u32;
    let mut moved = 0u32;
    let mut contested = 0u32;
    let mut evaporated = 0u32;

    // === PER-PARTICLE UPDATE ===
    for id in 0..count {
        let Some(&current) = world.particles.get(id) else {
            break;
        };
        // Evaporated slots are dead: not in the map, never touched again
        if !current.is_active() {
            continue;
        }

        let mut particle = current;
        world.scratch.set(particle.x as i32, particle.y as i32, None);

        let report = {
            let mut ctx = UpdateContext {
                id,
                old_map: &world.map,
                new_map: &mut world.scratch,
                particles: &world.particles,
                rng: &mut world.rng,
                wind_chance,
            };
            world.behaviors.update(&mut particle, &mut ctx)
        };
        world.particles.set(id, particle);

        processed += 1;
        moved += report.moved as u32;
        contested += report.contested as u32;
        evaporated += report.evaporated as u32;
    }

    // === COMMIT ===
    std::mem::swap(&mut world.map, &mut world.scratch);
    world.frame += 1;

    if evaporated > 0 {
        log::debug!("frame {}: {} water particle(s) evaporated", world.frame, evaporated);
    }

    if perf_on {
        world.perf_stats.particles_processed = processed;
        world.perf_stats.particles_moved = moved;
        world.perf_stats.contested_moves = contested;
        world.perf_stats.evaporated = evaporated;
        world.perf_stats.active_particles = world.particles.active_count() as u32;
        world.perf_stats.slots_used = world.particles.len() as u32;
        if let Some(start) = step_start {
            world.perf_stats.step_ms = start.elapsed_ms();
        }
        log::trace!("frame {} perf: {:?}", world.frame, world.perf_stats);
    }
}
