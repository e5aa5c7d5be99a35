use rand::Rng;

use crate::content::{LSystem, LSystemConfig, Turtle};
use crate::domain::config::ConfigError;
use crate::domain::elements::ParticleKind;
use crate::domain::particle::{Particle, ParticleId};

use super::WorldCore;

/// Cells covered by the brush, relative to the cursor cell
pub const BRUSH_OFFSETS: [(i32, i32); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

pub(super) fn add_particle(
    world: &mut WorldCore,
    x: i32,
    y: i32,
    kind: ParticleKind,
) -> Option<ParticleId> {
    // Off-grid cells read as occupied, so this also covers bounds
    if !world.map.is_empty(x, y) {
        return None;
    }

    if world.particles.is_full() {
        if !world.capacity_warned {
            log::warn!(
                "particle store full ({} slots); further placements are ignored",
                world.particles.capacity()
            );
            world.capacity_warned = true;
        }
        return None;
    }

    let tint: u8 = world.rng.gen();
    let particle = Particle::new(kind, x as u32, y as u32, world.config.palette.water_health, tint);
    let id = world.particles.push(particle)?;
    world.map.set(x, y, Some(id));
    Some(id)
}

pub(super) fn place_brush(world: &mut WorldCore, cx: i32, cy: i32, kind: ParticleKind) -> usize {
    BRUSH_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| {
            add_particle(world, cx.saturating_add(dx), cy.saturating_add(dy), kind).is_some()
        })
        .count()
}

/// Clip a segment to the cell rectangle `[0, w) x [0, h)` (Liang-Barsky).
/// Returns rounded on-grid endpoints, or `None` when nothing is visible.
pub(crate) fn clip_to_grid(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    width: u32,
    height: u32,
) -> Option<(i32, i32, i32, i32)> {
    if width == 0 || height == 0 || ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let x_max = (width - 1).min(i32::MAX as u32) as f64;
    let y_max = (height - 1).min(i32::MAX as u32) as f64;
    let (dx, dy) = (x1 - x0, y1 - y0);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64, origin: f64, delta: f64, max: f64| {
        (origin + t * delta).round().clamp(0.0, max) as i32
    };
    Some((
        at(t0, x0, dx, x_max),
        at(t0, y0, dy, y_max),
        at(t1, x0, dx, x_max),
        at(t1, y0, dy, y_max),
    ))
}

/// Bresenham line, endpoints included. Only the on-grid part is walked;
/// occupied cells are skipped.
pub(super) fn add_line(
    world: &mut WorldCore,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    kind: ParticleKind,
) -> usize {
    let (width, height) = (world.width(), world.height());
    let Some((x0, y0, x1, y1)) = clip_to_grid((x0, y0), (x1, y1), width, height) else {
        return 0;
    };

    // Clipped to the grid, so none of this can overflow
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx as i64 + dy as i64;
    let (mut x, mut y) = (x0, y0);
    let mut placed = 0;

    loop {
        if add_particle(world, x, y, kind).is_some() {
            placed += 1;
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy as i64 {
            err += dy as i64;
            x += sx;
        }
        if e2 <= dx as i64 {
            err += dx as i64;
            y += sy;
        }
    }

    placed
}

pub(super) fn stamp_lsystem(
    world: &mut WorldCore,
    config: &LSystemConfig,
) -> Result<usize, ConfigError> {
    let lsystem = LSystem::from_config(config)?;
    let span = world.width().max(world.height()) as f32;
    if config.step_length.abs() > span {
        return Err(ConfigError::InvalidLSystem(format!(
            "step length {} does not fit a {}x{} grid",
            config.step_length,
            world.width(),
            world.height()
        )));
    }
    let program = lsystem.expand(config.iterations, config.max_symbols)?;

    let (ox, oy) = match config.origin {
        Some(origin) => origin,
        None => {
            // Somewhere in the middle half of the bottom edge
            let w = world.width();
            let x = w / 4 + world.rng.gen_range(0..(w / 2).max(1));
            (x as f32, world.height() as f32)
        }
    };

    let turtle = Turtle::new(ox, oy, config.heading_deg, config.angle_deg, config.step_length);
    let segments = turtle.trace(&program);

    let mut placed = 0;
    for seg in &segments {
        placed += add_line(
            world,
            (seg.x0 as f64, seg.y0 as f64),
            (seg.x1 as f64, seg.y1 as f64),
            config.kind,
        );
    }

    log::debug!(
        "stamped {} L-system: {} symbols, {} segments, {} particles",
        config.kind.name(),
        program.len(),
        segments.len(),
        placed
    );
    Ok(placed)
}

pub(super) fn clear(world: &mut WorldCore) {
    world.particles.clear();
    world.map.clear();
    world.scratch.clear();
    world.pixels.fill(world.config.palette.background);
    world.frame = 0;
    world.capacity_warned = false;
}
