//! # Workflows Module
//!
//! End-to-end entry points tying the engine to storage.
//!
//! - **Generation** ([`generate`]) - Evaluates named property grids for one crossbridge
//!   variant and writes them to a grid store
//! - **Probe** ([`probe`]) - Every property at a single head location, for inspection

pub mod generate;
pub mod probe;
