//! Domain types: particle kinds, particle records, configuration

pub mod config;
pub mod elements;
pub mod particle;
