use crate::core::io::store::GridStore;
use crate::engine::config::{GenerationConfig, StoredProperty};
use crate::engine::crossbridge;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::tasks::evaluate::CellFailure;
use std::path::PathBuf;
use tracing::{info, instrument};

const TRIALS_KEY: &str = "trials";

#[derive(Debug, Clone)]
pub struct PropertyOutcome {
    pub property: StoredProperty,
    pub failures: Vec<CellFailure>,
}

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub store_dir: PathBuf,
    pub outcomes: Vec<PropertyOutcome>,
}

impl GenerationResult {
    pub fn failed_cells(&self) -> usize {
        self.outcomes.iter().map(|o| o.failures.len()).sum()
    }
}

/// Computes every selected property grid and persists each one as soon as it is done.
#[instrument(skip_all, name = "generation_workflow")]
pub fn run(
    config: &GenerationConfig,
    reporter: &ProgressReporter,
) -> Result<GenerationResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let kind = config.model.kind;
    info!(
        "Preparing {} crossbridge over {} lattice spacings x {} axial offsets.",
        kind,
        config.grid.rows(),
        config.grid.cols()
    );
    let crossbridge = crossbridge::build(&config.model)?;
    let mut store = GridStore::open(
        &config.output_dir,
        kind,
        &config.model.identity(),
        &config.grid,
    )?;
    reporter.report(Progress::PhaseFinish);

    let properties = config.selection.properties();
    let mut outcomes = Vec::with_capacity(properties.len());
    for property in properties {
        reporter.report(Progress::PhaseStart {
            name: property.name(),
        });
        info!("Computing {} grid.", property);

        let evaluation = tasks::evaluate::run(
            crossbridge.as_ref(),
            &config.grid,
            property.property(config.trials),
            config.seed,
            reporter,
        )?;

        store.write(property.name(), evaluation.values)?;
        if property == StoredProperty::R12 {
            store.write_scalar(TRIALS_KEY, config.trials as f64)?;
        }
        store.save()?;

        reporter.report(Progress::PhaseFinish);
        outcomes.push(PropertyOutcome {
            property,
            failures: evaluation.failures,
        });
    }

    let result = GenerationResult {
        store_dir: store.directory().to_path_buf(),
        outcomes,
    };
    info!(
        "Generation complete: {} grid(s) written to {:?}, {} cell(s) failed.",
        result.outcomes.len(),
        result.store_dir,
        result.failed_cells()
    );
    Ok(result)
}
