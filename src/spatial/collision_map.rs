//! CollisionMap - cell -> occupying particle index
//!
//! Purely a derived index: it never owns particles, it only stores slot
//! indices into the particle store. Out-of-bounds reads report "occupied /
//! nothing there" and out-of-bounds writes are dropped, so callers can probe
//! neighbours at the grid edge without pre-checking.

use crate::domain::particle::ParticleId;

/// Sentinel for an empty cell
const NO_PARTICLE: u32 = u32::MAX;

#[derive(Clone)]
pub struct CollisionMap {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl CollisionMap {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![NO_PARTICLE; size],
        }
    }

    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.cells.len() }

    // === Index conversion ===
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "index: out of bounds ({}, {}) for {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx % self.width as usize) as u32;
        let y = (idx / self.width as usize) as u32;
        (x, y)
    }

    // === Queries ===

    /// False outside the grid, otherwise true iff nothing is indexed here
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) { return false; }
        self.cells[self.index(x as u32, y as u32)] == NO_PARTICLE
    }

    #[inline]
    pub fn lookup(&self, x: i32, y: i32) -> Option<ParticleId> {
        if !self.in_bounds(x, y) { return None; }
        self.lookup_idx(self.index(x as u32, y as u32))
    }

    #[inline]
    pub fn lookup_idx(&self, idx: usize) -> Option<ParticleId> {
        match self.cells[idx] {
            NO_PARTICLE => None,
            id => Some(id),
        }
    }

    /// Row `y` as raw cells (for the rasterizer)
    #[inline]
    pub(crate) fn row(&self, y: u32) -> impl Iterator<Item = Option<ParticleId>> + '_ {
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|&c| if c == NO_PARTICLE { None } else { Some(c) })
    }

    // === Writes ===

    /// Bounds-checked write; out-of-bounds is a silent no-op
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, particle: Option<ParticleId>) {
        if !self.in_bounds(x, y) { return; }
        let idx = self.index(x as u32, y as u32);
        self.cells[idx] = particle.unwrap_or(NO_PARTICLE);
    }

    /// Overwrite this map with `other` (same dimensions), no allocation
    pub fn copy_from(&mut self, other: &CollisionMap) {
        assert!(
            self.width == other.width && self.height == other.height,
            "copy_from: {}x{} map cannot take {}x{} contents",
            self.width,
            self.height,
            other.width,
            other.height
        );
        self.cells.copy_from_slice(&other.cells);
    }

    pub fn clear(&mut self) {
        self.cells.fill(NO_PARTICLE);
    }

    /// Every occupied cell as (x, y, particle)
    pub fn occupied(&self) -> impl Iterator<Item = (u32, u32, ParticleId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != NO_PARTICLE)
            .map(move |(idx, &c)| {
                let (x, y) = self.coords(idx);
                (x, y, c)
            })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != NO_PARTICLE).count()
    }
}
