//! # Engine Module
//!
//! The computational layer: crossbridge variants built from the core models, the
//! converter minimizer they rely on, and the grid evaluation task that maps a
//! crossbridge property over every head location of a sampling grid.
//!
//! - **Configuration** ([`config`]) - Model parameters, property selection and run settings
//! - **Crossbridges** ([`crossbridge`]) - The `Crossbridge` trait and its three variants
//! - **Minimization** ([`minimizer`]) - Pluggable local minimizer with a Nelder-Mead default
//! - **Tasks** ([`tasks`]) - Parallel grid evaluation with per-cell failure isolation
//! - **Progress Monitoring** ([`progress`]) - Callbacks for front-ends
//! - **Error Handling** ([`error`]) - Engine-level error aggregation

pub mod config;
pub mod crossbridge;
pub mod error;
pub mod minimizer;
pub mod progress;
pub mod tasks;
pub(crate) mod utils;
