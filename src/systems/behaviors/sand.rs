//! SandBehavior - falls, spills, piles up

use super::{fall, Behavior, StepReport, UpdateContext};
use crate::domain::particle::Particle;

pub struct SandBehavior;

impl SandBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for SandBehavior {
    fn update(&self, particle: &mut Particle, ctx: &mut UpdateContext) -> StepReport {
        fall(particle, ctx)
    }
}
