//! Random source - one seedable PRNG per world
//!
//! ChaCha8 is portable (same stream on wasm32 and native), so a seed fully
//! determines a run on every target.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The simulation's only source of randomness
pub type SimRng = ChaCha8Rng;

/// Seed used by `deterministic` builds when the config leaves it open
pub const DETERMINISTIC_SEED: u64 = 0;

#[inline]
pub fn seeded(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

/// Pick the seed for a new world: explicit config seed wins, then the
/// `deterministic` feature, then the host clock.
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    if let Some(seed) = configured {
        return seed;
    }
    if cfg!(feature = "deterministic") {
        return DETERMINISTIC_SEED;
    }
    clock_seed()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DETERMINISTIC_SEED)
}
