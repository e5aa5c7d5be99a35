//! WaterBehavior - falls like sand, evaporates while touching sand
//!
//! Each tick the drop sits directly above or below a sand grain (looked up in
//! the frame-start map) costs one point of health. At zero the drop leaves the
//! map for good; its store slot stays spent.

use super::{fall, Behavior, StepReport, UpdateContext};
use crate::domain::elements::ParticleKind;
use crate::domain::particle::{Particle, ParticleBody};

pub struct WaterBehavior;

impl WaterBehavior {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn touches_sand(&self, ctx: &UpdateContext, x: i32, y: i32) -> bool {
        [y - 1, y + 1].into_iter().any(|ny| {
            ctx.old_neighbour(x, ny)
                .is_some_and(|n| n.kind() == ParticleKind::Sand && n.is_active())
        })
    }
}

impl Behavior for WaterBehavior {
    fn update(&self, particle: &mut Particle, ctx: &mut UpdateContext) -> StepReport {
        let mut report = fall(particle, ctx);

        let ParticleBody::Water { health } = particle.body else {
            return report;
        };

        let (x, y) = (particle.x as i32, particle.y as i32);
        if !self.touches_sand(ctx, x, y) {
            return report;
        }

        let health = health - 1;
        particle.body = ParticleBody::Water { health };
        if health <= 0 {
            ctx.new_map.set(x, y, None);
            report.evaporated = true;
        }
        report
    }
}
