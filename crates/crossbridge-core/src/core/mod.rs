//! # Core Module
//!
//! Stateless building blocks shared by every crossbridge variant.
//!
//! - **Physical constants** ([`constants`]) - Thermal energy scale and the ATP free energy inputs
//! - **Kinetics** ([`kinetics`]) - The three kinetic states, binding kernels and rate calibration
//! - **Mechanics** ([`mechanics`]) - Harmonic springs and the four-link spring chain
//! - **Models** ([`models`]) - Spring configurations, sampling ranges and property grids
//! - **I/O** ([`io`]) - Persistent storage of computed grids

pub mod constants;
pub mod io;
pub mod kinetics;
pub mod mechanics;
pub mod models;
