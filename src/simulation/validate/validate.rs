use thiserror::Error;

use crate::domain::particle::ParticleId;

use super::WorldCore;

/// A disagreement between the committed map and the particle store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("particle {id} at ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { id: ParticleId, x: u32, y: u32, width: u32, height: u32 },

    #[error("particle {id} at ({x}, {y}) is not indexed there (cell holds {found:?})")]
    NotIndexed { id: ParticleId, x: u32, y: u32, found: Option<ParticleId> },

    #[error("cell ({x}, {y}) points at particle {id}, which does not exist")]
    DanglingCell { x: u32, y: u32, id: ParticleId },

    #[error("cell ({x}, {y}) points at evaporated particle {id}")]
    InactiveCell { x: u32, y: u32, id: ParticleId },

    #[error("cell ({x}, {y}) points at particle {id}, which sits at ({px}, {py})")]
    MisplacedCell { x: u32, y: u32, id: ParticleId, px: u32, py: u32 },
}

/// Both directions of the map/store invariant. Together they also rule out
/// two active particles sharing a cell: each one's cell must name it.
pub(super) fn validate(world: &WorldCore) -> Result<(), InvariantViolation> {
    let (width, height) = (world.width(), world.height());

    for (id, p) in world.particles.iter() {
        if !p.is_active() {
            continue;
        }
        if p.x >= width || p.y >= height {
            return Err(InvariantViolation::OutOfBounds { id, x: p.x, y: p.y, width, height });
        }
        let found = world.map.lookup(p.x as i32, p.y as i32);
        if found != Some(id) {
            return Err(InvariantViolation::NotIndexed { id, x: p.x, y: p.y, found });
        }
    }

    for (x, y, id) in world.map.occupied() {
        let Some(p) = world.particles.get(id) else {
            return Err(InvariantViolation::DanglingCell { x, y, id });
        };
        if !p.is_active() {
            return Err(InvariantViolation::InactiveCell { x, y, id });
        }
        if p.position() != (x, y) {
            return Err(InvariantViolation::MisplacedCell { x, y, id, px: p.x, py: p.y });
        }
    }

    Ok(())
}
