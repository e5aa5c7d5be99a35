//! StoneBehavior - never moves, only re-asserts its cell

use super::{Behavior, StepReport, UpdateContext};
use crate::domain::particle::Particle;

pub struct StoneBehavior;

impl StoneBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for StoneBehavior {
    fn update(&self, particle: &mut Particle, ctx: &mut UpdateContext) -> StepReport {
        ctx.settle(particle);
        StepReport::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elements::ParticleKind;
    use crate::systems::behaviors::test_support::Fixture;

    #[test]
    fn floating_stone_stays_put() {
        let mut fx = Fixture::new(3, 3, &[(ParticleKind::Stone, 1, 0)], 1);
        let (p, report) = fx.run(&StoneBehavior::new(), 0, 1.0);

        assert_eq!(report, StepReport::default());
        assert_eq!(p.position(), (1, 0));
        assert_eq!(fx.new_map.lookup(1, 0), Some(0));
    }
}
