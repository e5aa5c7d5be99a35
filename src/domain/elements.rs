//! Element Definitions - the closed set of particle kinds
//!
//! Numeric ids only exist for the WASM ABI (JS passes `u8`s). Inside the
//! engine everything is a `ParticleKind`, so an unknown kind can never reach
//! behavior dispatch.

use serde::{Deserialize, Serialize};

pub type ElementId = u8;

pub const EL_EMPTY: ElementId = 0;
pub const EL_SAND: ElementId = 1;
pub const EL_WATER: ElementId = 2;
pub const EL_STONE: ElementId = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Sand,
    Water,
    Stone,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 3] =
        [ParticleKind::Sand, ParticleKind::Water, ParticleKind::Stone];

    #[inline]
    pub fn id(self) -> ElementId {
        match self {
            ParticleKind::Sand => EL_SAND,
            ParticleKind::Water => EL_WATER,
            ParticleKind::Stone => EL_STONE,
        }
    }

    /// `None` for `EL_EMPTY` and for ids outside the table
    #[inline]
    pub fn from_id(id: ElementId) -> Option<Self> {
        match id {
            EL_SAND => Some(ParticleKind::Sand),
            EL_WATER => Some(ParticleKind::Water),
            EL_STONE => Some(ParticleKind::Stone),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Sand => "sand",
            ParticleKind::Water => "water",
            ParticleKind::Stone => "stone",
        }
    }

    /// Whether gravity applies at all
    #[inline]
    pub fn is_movable(self) -> bool {
        !matches!(self, ParticleKind::Stone)
    }
}
