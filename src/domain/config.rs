//! World configuration - grid size, palette, randomness, key bindings
//!
//! Loaded from JSON (same serde_json path the content bundles use) or built
//! in code. Every constructor path ends in `validate()`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::elements::ParticleKind;

pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_HEIGHT: u32 = 720;
pub const DEFAULT_WIND_CHANCE: f32 = 0.1;
pub const DEFAULT_WATER_HEALTH: i32 = 30;

/// Largest grid we accept: particle ids are u32 with `u32::MAX` reserved
pub const MAX_CELLS: u64 = u32::MAX as u64 - 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid grid size {width}x{height}: sides must be > 0 and cells at most {max}")]
    InvalidDimensions { width: u32, height: u32, max: u64 },

    #[error("wind chance must be within [0, 1], got {0}")]
    WindChanceOutOfRange(f32),

    #[error("water health must be positive, got {0}")]
    InvalidWaterHealth(i32),

    #[error("invalid L-system: {0}")]
    InvalidLSystem(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Exact palette color per kind
    #[default]
    Flat,
    /// Palette color with a small per-grain brightness jitter
    Grainy,
    /// Sand and water take their hue from the column band they are in
    HueBands,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: u32,
    pub sand: u32,
    pub water: u32,
    pub stone: u32,
    pub water_health: i32,
    pub color_mode: ColorMode,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: 0x022b5a,
            sand: 0xc2b280,
            water: 0x2f6fdf,
            stone: 0x808080,
            water_health: DEFAULT_WATER_HEALTH,
            color_mode: ColorMode::Flat,
        }
    }
}

impl Palette {
    #[inline]
    pub fn base_color(&self, kind: ParticleKind) -> u32 {
        match kind {
            ParticleKind::Sand => self.sand,
            ParticleKind::Water => self.water,
            ParticleKind::Stone => self.stone,
        }
    }
}

/// Host key name -> particle kind selected by that key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<String, ParticleKind>);

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert("1".to_string(), ParticleKind::Sand);
        map.insert("2".to_string(), ParticleKind::Water);
        map.insert("3".to_string(), ParticleKind::Stone);
        Self(map)
    }
}

impl KeyBindings {
    pub fn kind_for(&self, key: &str) -> Option<ParticleKind> {
        self.0.get(key).copied()
    }

    pub fn bind(&mut self, key: impl Into<String>, kind: ParticleKind) {
        self.0.insert(key.into(), kind);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Probability that a falling grain gets a ±1 lateral nudge
    pub wind_chance: f32,
    /// `None` = clock-derived (or fixed under the `deterministic` feature)
    pub seed: Option<u64>,
    pub palette: Palette,
    pub keys: KeyBindings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            wind_chance: DEFAULT_WIND_CHANCE,
            seed: None,
            palette: Palette::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl WorldConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn wind_chance(mut self, chance: f32) -> Self {
        self.wind_chance = chance;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "loaded world config {}x{} (seed {:?})",
            config.width,
            config.height,
            config.seed
        );
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cells = self.width as u64 * self.height as u64;
        if self.width == 0 || self.height == 0 || cells > MAX_CELLS {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max: MAX_CELLS,
            });
        }
        if !(0.0..=1.0).contains(&self.wind_chance) {
            return Err(ConfigError::WindChanceOutOfRange(self.wind_chance));
        }
        if self.palette.water_health <= 0 {
            return Err(ConfigError::InvalidWaterHealth(self.palette.water_health));
        }
        Ok(())
    }

    /// Particle store capacity: one slot per cell
    #[inline]
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
