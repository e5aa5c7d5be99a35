//! Core utilities shared by every layer (no simulation state here)

pub mod color;
pub mod rng;
