//! Harmonic springs and their assembly into the anchor-to-head chain.

pub mod chain;
pub mod spring;
