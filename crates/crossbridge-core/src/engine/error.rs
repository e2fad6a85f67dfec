use thiserror::Error;

use super::minimizer::MinimizerError;
use crate::core::io::store::StoreError;
use crate::core::kinetics::StateError;
use crate::core::models::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("{source}")]
    State {
        #[from]
        source: StateError,
    },

    #[error("Energy minimization failed: {source}")]
    Minimization {
        #[from]
        source: MinimizerError,
    },

    #[error("Grid store error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },
}
