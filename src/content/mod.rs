//! Procedural content - L-system obstacles drawn into the world
pub mod lsystem;
pub mod turtle;

pub use lsystem::{LSystem, LSystemConfig};
pub use turtle::{Segment, Turtle};
