//! Particle record - position plus per-kind state

use super::elements::ParticleKind;

/// Slot index in the particle store. Stable for the particle's lifetime.
pub type ParticleId = u32;

/// Kind-specific state. Only water carries anything (its evaporation counter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleBody {
    Sand,
    Water { health: i32 },
    Stone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub x: u32,
    pub y: u32,
    pub body: ParticleBody,
    /// Per-grain color jitter, drawn once at placement
    pub tint: u8,
}

impl Particle {
    pub fn new(kind: ParticleKind, x: u32, y: u32, water_health: i32, tint: u8) -> Self {
        let body = match kind {
            ParticleKind::Sand => ParticleBody::Sand,
            ParticleKind::Water => ParticleBody::Water { health: water_health },
            ParticleKind::Stone => ParticleBody::Stone,
        };
        Self { x, y, body, tint }
    }

    #[inline]
    pub fn kind(&self) -> ParticleKind {
        match self.body {
            ParticleBody::Sand => ParticleKind::Sand,
            ParticleBody::Water { .. } => ParticleKind::Water,
            ParticleBody::Stone => ParticleKind::Stone,
        }
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Evaporated water keeps its slot but is no longer simulated or drawn
    #[inline]
    pub fn is_active(&self) -> bool {
        match self.body {
            ParticleBody::Water { health } => health > 0,
            ParticleBody::Sand | ParticleBody::Stone => true,
        }
    }

    #[inline]
    pub fn health(&self) -> Option<i32> {
        match self.body {
            ParticleBody::Water { health } => Some(health),
            _ => None,
        }
    }
}
