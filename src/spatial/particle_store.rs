//! ParticleStore - fixed-capacity, append-only particle slots
//!
//! Allocated once at full capacity (one slot per cell), never shrinks and
//! never frees a slot. Evaporated particles stay where they are; their slot
//! is spent for the rest of the session.

use crate::domain::particle::{Particle, ParticleId};

pub struct ParticleStore {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Slots used so far (including evaporated particles)
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.particles.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    /// Append a particle. `None` when the store is full (backpressure, not an error).
    pub fn push(&mut self, particle: Particle) -> Option<ParticleId> {
        if self.is_full() {
            return None;
        }
        let id = self.particles.len() as ParticleId;
        self.particles.push(particle);
        Some(id)
    }

    #[inline]
    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id as usize)
    }

    /// Replace a slot's record. Writing past `len()` is a contract breach.
    #[inline]
    pub fn set(&mut self, id: ParticleId, particle: Particle) {
        let len = self.particles.len();
        match self.particles.get_mut(id as usize) {
            Some(slot) => *slot = particle,
            None => panic!("set: particle id {} out of range (len {})", id, len),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (i as ParticleId, p))
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
