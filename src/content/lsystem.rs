use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::config::ConfigError;
use crate::domain::elements::ParticleKind;

/// Rewrite passes accepted from config; growth is bounded by `max_symbols`
/// long before this for any rule set that grows.
pub const MAX_ITERATIONS: u32 = 64;

/// Longest `F` stroke accepted from config, in cells
pub const MAX_STEP_LENGTH: f32 = 65_536.0;

/// Everything needed to grow and draw one L-system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LSystemConfig {
    pub axiom: String,
    /// Single-character predecessor -> successor
    pub rules: BTreeMap<String, String>,
    pub iterations: u32,
    /// Turn applied by `+` / `-`
    pub angle_deg: f32,
    /// Length of one `F` in cells
    pub step_length: f32,
    /// Starting direction; 90 points up the screen
    pub heading_deg: f32,
    /// Turtle start in cell coordinates; `None` = random spot on the bottom edge
    pub origin: Option<(f32, f32)>,
    pub kind: ParticleKind,
    /// Expansion is refused once the string would exceed this many symbols
    pub max_symbols: usize,
}

impl Default for LSystemConfig {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert("X".to_string(), "F+[[X]-X]-F[-FX]+X".to_string());
        rules.insert("F".to_string(), "FF".to_string());
        Self {
            axiom: "-X".to_string(),
            rules,
            iterations: 6,
            angle_deg: 25.0,
            step_length: 4.0,
            heading_deg: 90.0,
            origin: None,
            kind: ParticleKind::Stone,
            max_symbols: 1_000_000,
        }
    }
}

impl LSystemConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A validated rewriting system
#[derive(Debug, Clone)]
pub struct LSystem {
    axiom: String,
    rules: BTreeMap<char, String>,
}

impl LSystem {
    pub fn new(axiom: &str, rules: BTreeMap<char, String>) -> Self {
        Self { axiom: axiom.to_string(), rules }
    }

    pub fn from_config(config: &LSystemConfig) -> Result<Self, ConfigError> {
        let mut rules = BTreeMap::new();
        for (key, successor) in &config.rules {
            let mut chars = key.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::InvalidLSystem(format!(
                    "rule key {:?} must be exactly one character",
                    key
                )));
            };
            rules.insert(symbol, successor.clone());
        }
        let finite = [config.step_length, config.angle_deg, config.heading_deg];
        if !finite.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidLSystem(
                "angles and step length must be finite".into(),
            ));
        }
        if config.step_length.abs() > MAX_STEP_LENGTH {
            return Err(ConfigError::InvalidLSystem(format!(
                "step length {} exceeds {}",
                config.step_length, MAX_STEP_LENGTH
            )));
        }
        if config.iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidLSystem(format!(
                "{} iterations requested (limit {})",
                config.iterations, MAX_ITERATIONS
            )));
        }
        Ok(Self::new(&config.axiom, rules))
    }

    /// One parallel rewrite: every symbol with a rule is replaced, others are copied
    pub fn rewrite(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() * 2);
        for c in input.chars() {
            match self.rules.get(&c) {
                Some(successor) => out.push_str(successor),
                None => out.push(c),
            }
        }
        out
    }

    /// Rewrite the axiom `iterations` times, stopping early at a fixpoint
    pub fn expand(&self, iterations: u32, max_symbols: usize) -> Result<String, ConfigError> {
        let mut current = self.axiom.clone();
        for i in 0..iterations {
            // Size the next generation before building it
            let next_len: usize = current
                .chars()
                .map(|c| self.rules.get(&c).map_or(1, |s| s.chars().count()))
                .sum();
            if next_len > max_symbols {
                return Err(ConfigError::InvalidLSystem(format!(
                    "iteration {} would produce {} symbols (limit {})",
                    i + 1,
                    next_len,
                    max_symbols
                )));
            }
            let next = self.rewrite(&current);
            if next == current {
                break;
            }
            current = next;
        }
        Ok(current)
    }
}
