//! Input mapping - pointer to grid cell, keys to particle kind
//!
//! Raw event capture is the host's job. `ToolState` is the small amount of
//! state a host keeps between events (cursor cell, button, selected kind) and
//! turns into one `FrameInput` per frame.

use crate::domain::config::KeyBindings;
use crate::domain::elements::ParticleKind;

use super::host::InputSource;

/// Everything the core needs from the host for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInput {
    /// Grid cell under the pointer, already clamped to the grid
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub primary_down: bool,
    pub selected: ParticleKind,
}

impl FrameInput {
    /// No button held
    pub fn idle(selected: ParticleKind) -> Self {
        Self { cursor_x: 0, cursor_y: 0, primary_down: false, selected }
    }

    /// Brush held at a grid cell
    pub fn brush(x: i32, y: i32, selected: ParticleKind) -> Self {
        Self { cursor_x: x, cursor_y: y, primary_down: true, selected }
    }

    /// Build from a pointer position in surface pixels
    #[allow(clippy::too_many_arguments)]
    pub fn from_surface(
        px: f32,
        py: f32,
        surface_w: f32,
        surface_h: f32,
        grid_w: u32,
        grid_h: u32,
        primary_down: bool,
        selected: ParticleKind,
    ) -> Self {
        let (cursor_x, cursor_y) = surface_to_cell(px, py, surface_w, surface_h, grid_w, grid_h);
        Self { cursor_x, cursor_y, primary_down, selected }
    }
}

/// Map a pointer position on a surface of `surface_w` x `surface_h` pixels to
/// a grid cell, clamped to `[0, grid_w) x [0, grid_h)`.
pub fn surface_to_cell(
    px: f32,
    py: f32,
    surface_w: f32,
    surface_h: f32,
    grid_w: u32,
    grid_h: u32,
) -> (i32, i32) {
    let scale = |p: f32, surface: f32, grid: u32| -> i32 {
        if surface <= 0.0 || grid == 0 || !p.is_finite() {
            return 0;
        }
        let cell = (p / surface * grid as f32).floor() as i64;
        cell.clamp(0, grid as i64 - 1) as i32
    };
    (scale(px, surface_w, grid_w), scale(py, surface_h, grid_h))
}

/// Host-side tool state fed by pointer/key events
#[derive(Debug, Clone)]
pub struct ToolState {
    keys: KeyBindings,
    grid_w: u32,
    grid_h: u32,
    cursor: (i32, i32),
    primary_down: bool,
    selected: ParticleKind,
}

impl ToolState {
    pub fn new(keys: KeyBindings, grid_w: u32, grid_h: u32) -> Self {
        Self {
            keys,
            grid_w,
            grid_h,
            cursor: (0, 0),
            primary_down: false,
            selected: ParticleKind::Sand,
        }
    }

    pub fn selected(&self) -> ParticleKind {
        self.selected
    }

    pub fn select(&mut self, kind: ParticleKind) {
        self.selected = kind;
    }

    /// Returns true if the key is bound (and the selection changed to it)
    pub fn key_pressed(&mut self, key: &str) -> bool {
        match self.keys.kind_for(key) {
            Some(kind) => {
                self.select(kind);
                true
            }
            None => false,
        }
    }

    pub fn pointer_moved(&mut self, px: f32, py: f32, surface_w: f32, surface_h: f32) {
        self.cursor = surface_to_cell(px, py, surface_w, surface_h, self.grid_w, self.grid_h);
    }

    pub fn set_primary(&mut self, down: bool) {
        self.primary_down = down;
    }

    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            cursor_x: self.cursor.0,
            cursor_y: self.cursor.1,
            primary_down: self.primary_down,
            selected: self.selected,
        }
    }
}

impl InputSource for ToolState {
    fn poll(&mut self) -> FrameInput {
        self.snapshot()
    }
}
