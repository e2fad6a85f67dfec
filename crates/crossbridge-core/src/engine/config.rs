use super::minimizer::MinimizerConfig;
use crate::core::constants::PhysicalConstants;
use crate::core::kinetics::{KineticState, RateCalibration};
use crate::core::models::config::{
    ConfigError, CrossbridgeConfig, CrossbridgeKind, ModelIdentity,
};
use crate::core::models::lattice::GridSpec;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Everything needed to instantiate one crossbridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    pub kind: CrossbridgeKind,
    pub springs: CrossbridgeConfig,
    pub constants: PhysicalConstants,
    pub calibration: RateCalibration,
    pub minimizer: MinimizerConfig,
}

impl ModelConfig {
    /// Reference springs and rate calibration of `kind` at default physical constants.
    pub fn reference(kind: CrossbridgeKind) -> Self {
        Self {
            kind,
            springs: kind.reference_config(),
            constants: PhysicalConstants::default(),
            calibration: kind.reference_calibration(),
            minimizer: MinimizerConfig::default(),
        }
    }

    pub fn with_springs(mut self, springs: CrossbridgeConfig) -> Self {
        self.springs = springs;
        self
    }

    /// The parameters stored grids are keyed on.
    pub fn identity(&self) -> ModelIdentity {
        ModelIdentity {
            springs: self.springs,
            constants: self.constants,
            calibration: self.calibration,
        }
    }
}

/// A quantity evaluated at every head location of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Energy { state: KineticState },
    FreeEnergy { state: KineticState },
    Force { state: KineticState },
    R12 { trials: usize },
    R23,
    R31,
}

impl Property {
    pub fn is_vector(&self) -> bool {
        matches!(self, Property::Force { .. })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Property::R12 { trials: 0 } => Err(ConfigError::NoTrials),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Energy { state } => write!(f, "minimized energy in state {}", state.number()),
            Property::FreeEnergy { state } => write!(f, "free energy in state {}", state.number()),
            Property::Force { state } => write!(f, "force in state {}", state.number()),
            Property::R12 { trials } => write!(f, "r12 ({} trials)", trials),
            Property::R23 => write!(f, "r23"),
            Property::R31 => write!(f, "r31"),
        }
    }
}

/// The named grids a generation run can produce, as they are keyed in a grid store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoredProperty {
    Energy,
    FreeEnergy,
    PostEnergy,
    R12,
    R23,
    R31,
    Force1,
    Force2,
    Force3,
}

impl StoredProperty {
    pub const ALL: [StoredProperty; 9] = [
        StoredProperty::Energy,
        StoredProperty::FreeEnergy,
        StoredProperty::PostEnergy,
        StoredProperty::R12,
        StoredProperty::R23,
        StoredProperty::R31,
        StoredProperty::Force1,
        StoredProperty::Force2,
        StoredProperty::Force3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StoredProperty::Energy => "energy",
            StoredProperty::FreeEnergy => "free_energy",
            StoredProperty::PostEnergy => "post_energy",
            StoredProperty::R12 => "r12",
            StoredProperty::R23 => "r23",
            StoredProperty::R31 => "r31",
            StoredProperty::Force1 => "force1",
            StoredProperty::Force2 => "force2",
            StoredProperty::Force3 => "force3",
        }
    }

    /// The grid computation behind this name; `trials` only matters for `r12`.
    pub fn property(self, trials: usize) -> Property {
        match self {
            StoredProperty::Energy => Property::Energy {
                state: KineticState::Unbound,
            },
            StoredProperty::FreeEnergy => Property::FreeEnergy {
                state: KineticState::WeaklyBound,
            },
            StoredProperty::PostEnergy => Property::FreeEnergy {
                state: KineticState::StronglyBound,
            },
            StoredProperty::R12 => Property::R12 { trials },
            StoredProperty::R23 => Property::R23,
            StoredProperty::R31 => Property::R31,
            StoredProperty::Force1 => Property::Force {
                state: KineticState::Unbound,
            },
            StoredProperty::Force2 => Property::Force {
                state: KineticState::WeaklyBound,
            },
            StoredProperty::Force3 => Property::Force {
                state: KineticState::StronglyBound,
            },
        }
    }
}

impl fmt::Display for StoredProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StoredProperty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        StoredProperty::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownProperty(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertySelection {
    #[default]
    All,
    Only(StoredProperty),
}

impl PropertySelection {
    pub fn properties(&self) -> Vec<StoredProperty> {
        match self {
            PropertySelection::All => StoredProperty::ALL.to_vec(),
            PropertySelection::Only(property) => vec![*property],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub model: ModelConfig,
    pub grid: GridSpec,
    pub selection: PropertySelection,
    pub trials: usize,
    pub seed: u64,
    pub output_dir: PathBuf,
}

#[derive(Default)]
pub struct GenerationConfigBuilder {
    model: Option<ModelConfig>,
    grid: Option<GridSpec>,
    selection: Option<PropertySelection>,
    trials: Option<usize>,
    seed: Option<u64>,
    output_dir: Option<PathBuf>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: ModelConfig) -> Self {
        self.model = Some(model);
        self
    }
    pub fn grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }
    pub fn selection(mut self, selection: PropertySelection) -> Self {
        self.selection = Some(selection);
        self
    }
    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }

    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        let model = self.model.ok_or(ConfigError::MissingParameter("model"))?;
        model.springs.validate()?;

        let grid = self.grid.ok_or(ConfigError::MissingParameter("grid"))?;
        grid.validate()?;

        let selection = self.selection.unwrap_or_default();
        let trials = self.trials.ok_or(ConfigError::MissingParameter("trials"))?;
        if trials == 0 && selection.properties().contains(&StoredProperty::R12) {
            return Err(ConfigError::NoTrials);
        }

        Ok(GenerationConfig {
            model,
            grid,
            selection,
            trials,
            seed: self.seed.ok_or(ConfigError::MissingParameter("seed"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
        })
    }
}
