//! Systems: the movement rule and the per-kind behaviors built on it

pub mod behaviors;
pub mod movement;
