pub mod defaults;

use crate::cli::{GenerateArgs, ProbeArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use crossbridge::core::constants::PhysicalConstants;
use crossbridge::core::kinetics::RateCalibration;
use crossbridge::core::models::config::{CrossbridgeConfig, CrossbridgeKind};
use crossbridge::core::models::lattice::{AxisRange, GridSpec};
use crossbridge::engine::config::{
    GenerationConfig, GenerationConfigBuilder, ModelConfig, PropertySelection, StoredProperty,
};
use crossbridge::engine::minimizer::MinimizerConfig;
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialGrid {
    axial: Option<AxisRange>,
    lattice: Option<AxisRange>,
}

/// A run configuration as written in a TOML file. Every field is optional; command-line
/// arguments take precedence and built-in defaults fill whatever remains.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialRunConfig {
    #[serde(rename = "type")]
    kind: Option<CrossbridgeKind>,
    output_dir: Option<PathBuf>,
    trials: Option<usize>,
    seed: Option<u64>,
    property: Option<String>,
    springs_file: Option<PathBuf>,
    springs: Option<CrossbridgeConfig>,
    #[serde(default)]
    grid: PartialGrid,
    constants: Option<PhysicalConstants>,
    calibration: Option<RateCalibration>,
    minimizer: Option<MinimizerConfig>,
}

impl PartialRunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading run configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(self, args: &GenerateArgs) -> Result<GenerationConfig> {
        let defaults = DefaultsConfig::default();

        let kind = args.kind.or(self.kind).unwrap_or(defaults.kind);
        let mut model = ModelConfig::reference(kind);

        let springs_file = args.springs.as_ref().or(self.springs_file.as_ref());
        if self.springs.is_some() && springs_file.is_some() && args.springs.is_none() {
            return Err(CliError::Config(
                "'springs' and 'springs-file' are mutually exclusive".to_string(),
            ));
        }
        if let Some(path) = springs_file {
            model.springs = load_springs(path)?;
        } else if let Some(springs) = self.springs {
            model.springs = springs;
        }
        if let Some(constants) = self.constants {
            model.constants = constants;
        }
        if let Some(calibration) = self.calibration {
            model.calibration = calibration;
        }
        if let Some(minimizer) = self.minimizer {
            model.minimizer = minimizer;
        }

        let axial = resolve_range(
            args.axial.as_deref(),
            self.grid.axial,
            defaults.grid.axial,
        )?;
        let lattice = resolve_range(
            args.lattice.as_deref(),
            self.grid.lattice,
            defaults.grid.lattice,
        )?;

        let selection = match (args.property, self.property) {
            (Some(property), _) => PropertySelection::Only(property),
            (None, Some(name)) => PropertySelection::Only(name.parse::<StoredProperty>()?),
            (None, None) => PropertySelection::All,
        };

        let output_dir = args
            .output
            .clone()
            .or(self.output_dir)
            .unwrap_or_else(|| PathBuf::from(defaults.output_dir));

        let config = GenerationConfigBuilder::new()
            .model(model)
            .grid(GridSpec::new(axial, lattice)?)
            .selection(selection)
            .trials(args.trials.or(self.trials).unwrap_or(defaults.trials))
            .seed(args.seed.or(self.seed).unwrap_or(defaults.seed))
            .output_dir(output_dir)
            .build()?;
        Ok(config)
    }
}

/// Model and sampling parameters of a single-point probe. No run file is involved.
pub fn probe_model(args: &ProbeArgs) -> Result<(ModelConfig, usize, u64)> {
    let defaults = DefaultsConfig::default();
    let mut model = ModelConfig::reference(args.kind);
    if let Some(path) = &args.springs {
        model.springs = load_springs(path)?;
    }
    Ok((
        model,
        args.trials.unwrap_or(defaults.trials),
        args.seed.unwrap_or(defaults.seed),
    ))
}

fn load_springs(path: &Path) -> Result<CrossbridgeConfig> {
    debug!("Loading spring configuration from {:?}", path);
    CrossbridgeConfig::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn resolve_range(
    cli: Option<&str>,
    file: Option<AxisRange>,
    default: AxisRange,
) -> Result<AxisRange> {
    match cli {
        Some(text) => parser::parse_range(text).map_err(|e| CliError::Argument(e.to_string())),
        None => Ok(file.unwrap_or(default)),
    }
}
