//! Behaviors - per-kind particle updates
//!
//! One behavior per particle kind, all reached through `BehaviorRegistry::update`.
//! The match there is exhaustive over `ParticleBody`, so adding a kind without
//! a behavior does not compile.
//!
//! Every behavior must leave its particle asserted in the new map (unless it
//! evaporated): the driver clears the particle's cell before calling in.

mod sand;
mod stone;
mod water;

pub use sand::SandBehavior;
pub use stone::StoneBehavior;
pub use water::WaterBehavior;

use crate::core::rng::SimRng;
use crate::domain::particle::{Particle, ParticleBody, ParticleId};
use crate::spatial::{CollisionMap, ParticleStore};
use crate::systems::movement::apply_gravity;

/// Update context passed to behaviors
pub struct UpdateContext<'a> {
    pub id: ParticleId,
    /// Frame-start state. All movement decisions read from here.
    pub old_map: &'a CollisionMap,
    /// Map being built this tick
    pub new_map: &'a mut CollisionMap,
    /// Kind lookups for neighbours found in `old_map`
    pub particles: &'a ParticleStore,
    pub rng: &'a mut SimRng,
    pub wind_chance: f32,
}

impl<'a> UpdateContext<'a> {
    /// Claim the particle's current cell in the new map
    #[inline]
    pub fn settle(&mut self, particle: &Particle) {
        self.new_map.set(particle.x as i32, particle.y as i32, Some(self.id));
    }

    /// Kind-aware lookup in the frame-start map
    #[inline]
    pub fn old_neighbour(&self, x: i32, y: i32) -> Option<&Particle> {
        self.old_map.lookup(x, y).and_then(|id| self.particles.get(id))
    }
}

/// What happened to one particle during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub moved: bool,
    /// Wanted to move but an earlier particle took the cell this tick
    pub contested: bool,
    pub evaporated: bool,
}

/// Behavior trait - each particle kind implements this
pub trait Behavior {
    fn update(&self, particle: &mut Particle, ctx: &mut UpdateContext) -> StepReport;
}

/// Gravity step shared by falling kinds: decide against the old map, commit
/// into the new map, then settle wherever the particle ended up.
pub(crate) fn fall(particle: &mut Particle, ctx: &mut UpdateContext) -> StepReport {
    debug_assert!(particle.kind().is_movable(), "fall: {} never moves", particle.kind().name());
    let mut report = StepReport::default();

    let target = apply_gravity(particle.x, particle.y, ctx.old_map, &mut *ctx.rng, ctx.wind_chance);
    if let Some((nx, ny)) = target {
        // Two grains can pick the same free cell from the same snapshot;
        // first one in store order wins
        if ctx.new_map.is_empty(nx as i32, ny as i32) {
            particle.x = nx;
            particle.y = ny;
            report.moved = true;
        } else {
            report.contested = true;
        }
    }

    ctx.settle(particle);
    report
}

/// Behavior registry - dispatch by particle kind
pub struct BehaviorRegistry {
    sand: SandBehavior,
    water: WaterBehavior,
    stone: StoneBehavior,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self {
            sand: SandBehavior::new(),
            water: WaterBehavior::new(),
            stone: StoneBehavior::new(),
        }
    }

    /// Dispatch update to the behavior for this particle's kind
    pub fn update(&self, particle: &mut Particle, ctx: &mut UpdateContext) -> StepReport {
        match particle.body {
            ParticleBody::Sand => self.sand.update(particle, ctx),
            ParticleBody::Water { .. } => self.water.update(particle, ctx),
            ParticleBody::Stone => self.stone.update(particle, ctx),
        }
    }
}

impl Default for BehaviorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
