use crate::core::color::{color_with_variation, hsb_to_rgb};
use crate::domain::config::{ColorMode, Palette};
use crate::domain::elements::ParticleKind;
use crate::domain::particle::Particle;
use crate::spatial::{CollisionMap, ParticleStore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::WorldCore;

/// Hue for column `x`: the grid is split into four vertical bands
/// (0, 90, 180, 270 degrees).
#[inline]
pub(crate) fn band_hue(x: u32, width: u32) -> f32 {
    let band = ((x as f32 / width as f32) * 4.0) as u32;
    (band.min(3) * 90) as f32
}

#[inline]
pub(crate) fn particle_color(palette: &Palette, particle: &Particle, width: u32) -> u32 {
    let kind = particle.kind();
    let base = palette.base_color(kind);
    match palette.color_mode {
        ColorMode::Flat => base,
        ColorMode::Grainy => color_with_variation(base, particle.tint),
        ColorMode::HueBands => match kind {
            ParticleKind::Stone => base,
            ParticleKind::Sand | ParticleKind::Water => {
                let saturation = 0.5 + (particle.tint as f32 / 255.0) * 0.5;
                hsb_to_rgb(band_hue(particle.x, width), saturation, 1.0)
            }
        },
    }
}

#[inline]
fn fill_row(
    map: &CollisionMap,
    particles: &ParticleStore,
    palette: &Palette,
    y: u32,
    row: &mut [u32],
) {
    let width = map.width();
    for (pixel, cell) in row.iter_mut().zip(map.row(y)) {
        *pixel = match cell.and_then(|id| particles.get(id)) {
            Some(particle) => particle_color(palette, particle, width),
            None => palette.background,
        };
    }
}

/// Redraw every pixel from the committed map
pub(super) fn rasterize(world: &mut WorldCore) {
    let width = world.map.width() as usize;
    assert_eq!(
        world.pixels.len(),
        world.map.size(),
        "rasterize: pixel buffer does not match the {}x{} grid",
        world.map.width(),
        world.map.height()
    );

    let map = &world.map;
    let particles = &world.particles;
    let palette = &world.config.palette;

    #[cfg(feature = "parallel")]
    world
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill_row(map, particles, palette, y as u32, row));

    #[cfg(not(feature = "parallel"))]
    world
        .pixels
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill_row(map, particles, palette, y as u32, row));
}
