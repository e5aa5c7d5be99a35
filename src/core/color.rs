//! Color Model - HSB -> packed RGB conversion
//!
//! Output format is 0x00RRGGBB (24-bit RGB, top byte unused). The host
//! converts to whatever its surface wants when presenting.

/// Pack 8-bit channels into 0x00RRGGBB
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split 0x00RRGGBB into (r, g, b)
#[inline]
pub fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Convert hue [0, 360), saturation [0, 1] and brightness [0, 1] to packed RGB.
///
/// Hue outside the range is wrapped, saturation/brightness are clamped.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> u32 {
    let hue = hue.rem_euclid(360.0);
    let saturation = saturation.clamp(0.0, 1.0);
    let brightness = brightness.clamp(0.0, 1.0);

    let c = brightness * saturation;
    let sector = (hue / 60.0).floor() as i32;
    let x = c * (1.0 - (((hue / 60.0) % 2.0) - 1.0).abs());
    let m = brightness - c;

    let (r, g, b) = match sector {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    pack_rgb(to_byte(r), to_byte(g), to_byte(b))
}

/// Brighten/darken a base color by a tint byte (±32 per channel).
///
/// Same idea as the content registry's per-particle color variation: only the
/// low 5 bits of `tint` matter, so neighbouring grains differ slightly.
pub fn color_with_variation(base: u32, tint: u8) -> u32 {
    let i = (tint & 31) as i32;
    let variation = (i - 16) * 2;

    let (r, g, b) = unpack_rgb(base);
    let shift = |c: u8| (c as i32 + variation).clamp(0, 255) as u8;
    pack_rgb(shift(r), shift(g), shift(b))
}
