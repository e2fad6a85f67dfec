//! # Core Models Module
//!
//! Plain data describing a crossbridge and the locations it is evaluated at.
//!
//! - [`config`] - Per-segment rest values and stiffnesses, variant kinds and validation
//! - [`lattice`] - Axial and lattice-spacing sampling ranges, d10 conversion
//! - [`grid`] - Row-major scalar and vector property grids

pub mod config;
pub mod grid;
pub mod lattice;
