//! # Crossbridge Core Library
//!
//! Spring-chain models of the myosin crossbridge, evaluated over a grid of thin filament
//! binding-site locations to produce energy, force and transition-rate landscapes.
//!
//! ## Architecture
//!
//! The library keeps the three layers of the workspace apart:
//!
//! - **[`core`]: The Foundation.** Stateless models: spring and chain mechanics, kinetic
//!   states and their rate calibration, physical constants, grid sampling ranges and the
//!   on-disk grid store.
//!
//! - **[`engine`]: The Logic Core.** The `Crossbridge` trait and its one-, two- and
//!   four-spring variants, the converter minimizer, and the parallel grid evaluator.
//!
//! - **[`workflows`]: The Public API.** End-to-end generation of property grids for a
//!   variant, persisted through the grid store.

pub mod core;
pub mod engine;
pub mod workflows;
