//! Spatial data: the collision map index and the particle store it points into

pub mod collision_map;
pub mod particle_store;

pub use collision_map::CollisionMap;
pub use particle_store::ParticleStore;
