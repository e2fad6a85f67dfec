use crate::core::constants::PhysicalConstants;
use crate::core::kinetics::{BindingKernel, RateCalibration};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Segment {segment} has a non-finite {field}: {value}")]
    NonFinite {
        segment: Segment,
        field: &'static str,
        value: f64,
    },

    #[error("Segment {segment} must have a positive stiffness, got {value}")]
    NonPositiveStiffness { segment: Segment, value: f64 },

    #[error("Invalid {axis} range: {reason}")]
    InvalidRange { axis: &'static str, reason: String },

    #[error("Monte Carlo estimates need at least one trial")]
    NoTrials,

    #[error("Unknown crossbridge type '{0}'. Expected 1, 2 or 4 (springs).")]
    UnknownKind(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Failed to load crossbridge configuration from '{path}': {message}")]
    Load { path: String, message: String },
}

/// The four links of the chain from the thick filament to the myosin head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    ThickFilamentAngle,
    NeckLength,
    ConverterAngle,
    GlobularLength,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::ThickFilamentAngle,
        Segment::NeckLength,
        Segment::ConverterAngle,
        Segment::GlobularLength,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Segment::ThickFilamentAngle => "T",
            Segment::NeckLength => "N",
            Segment::ConverterAngle => "C",
            Segment::GlobularLength => "G",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rest values for the pre- and post-powerstroke geometries plus the spring constant.
/// Angles are radians, lengths nanometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringConfig {
    pub weak: f64,
    pub strong: f64,
    #[serde(alias = "spring_konstant")]
    pub stiffness: f64,
}

impl SpringConfig {
    pub const fn new(weak: f64, strong: f64, stiffness: f64) -> Self {
        Self {
            weak,
            strong,
            stiffness,
        }
    }

    pub fn validate(&self, segment: Segment) -> Result<(), ConfigError> {
        for (field, value) in [
            ("weak rest value", self.weak),
            ("strong rest value", self.strong),
            ("stiffness", self.stiffness),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite {
                    segment,
                    field,
                    value,
                });
            }
        }
        if self.stiffness <= 0.0 {
            return Err(ConfigError::NonPositiveStiffness {
                segment,
                value: self.stiffness,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CrossbridgeKind {
    OneSpring,
    TwoSpring,
    FourSpring,
}

impl CrossbridgeKind {
    pub fn spring_count(self) -> u8 {
        match self {
            CrossbridgeKind::OneSpring => 1,
            CrossbridgeKind::TwoSpring => 2,
            CrossbridgeKind::FourSpring => 4,
        }
    }

    pub fn reference_config(self) -> CrossbridgeConfig {
        match self {
            CrossbridgeKind::OneSpring => CrossbridgeConfig::one_spring(),
            CrossbridgeKind::TwoSpring => CrossbridgeConfig::two_spring(),
            CrossbridgeKind::FourSpring => CrossbridgeConfig::four_spring(),
        }
    }

    pub fn reference_calibration(self) -> RateCalibration {
        let binding = match self {
            CrossbridgeKind::FourSpring => BindingKernel::Gaussian {
                prefactor: 12.0,
                floor: 0.0,
            },
            CrossbridgeKind::TwoSpring => BindingKernel::Gaussian {
                prefactor: 72.0,
                floor: 0.00001,
            },
            CrossbridgeKind::OneSpring => BindingKernel::Exponential { prefactor: 1.0 },
        };
        RateCalibration::with_binding(binding)
    }
}

impl TryFrom<u8> for CrossbridgeKind {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CrossbridgeKind::OneSpring),
            2 => Ok(CrossbridgeKind::TwoSpring),
            4 => Ok(CrossbridgeKind::FourSpring),
            other => Err(ConfigError::UnknownKind(other.to_string())),
        }
    }
}

impl From<CrossbridgeKind> for u8 {
    fn from(kind: CrossbridgeKind) -> Self {
        kind.spring_count()
    }
}

impl FromStr for CrossbridgeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" | "one-spring" => Ok(CrossbridgeKind::OneSpring),
            "2" | "two" | "two-spring" => Ok(CrossbridgeKind::TwoSpring),
            "4" | "four" | "four-spring" => Ok(CrossbridgeKind::FourSpring),
            _ => Err(ConfigError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for CrossbridgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-spring", self.spring_count())
    }
}

/// Full mechanical identity of a crossbridge. Two stored grids are only comparable
/// when their configurations are equal field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossbridgeConfig {
    #[serde(rename = "T")]
    pub thick_filament_angle: SpringConfig,
    #[serde(rename = "N")]
    pub neck_length: SpringConfig,
    #[serde(rename = "C")]
    pub converter_angle: SpringConfig,
    #[serde(rename = "G")]
    pub globular_length: SpringConfig,
}

impl CrossbridgeConfig {
    pub fn four_spring() -> Self {
        Self {
            thick_filament_angle: SpringConfig::new(40f64.to_radians(), 40f64.to_radians(), 100.0),
            neck_length: SpringConfig::new(10.5, 10.5, 10.0),
            converter_angle: SpringConfig::new(
                2.0 * PI - 165f64.to_radians(),
                2.0 * PI - 110f64.to_radians(),
                40.0,
            ),
            globular_length: SpringConfig::new(9.6, 9.6, 5.0),
        }
    }

    pub fn two_spring() -> Self {
        Self {
            thick_filament_angle: SpringConfig::new(0.0, 0.0, 1.0),
            neck_length: SpringConfig::new(0.0, 0.0, 1.0),
            converter_angle: SpringConfig::new(
                47.16f64.to_radians() + PI,
                73.20f64.to_radians() + PI,
                40.0,
            ),
            globular_length: SpringConfig::new(19.93, 16.47, 2.0),
        }
    }

    pub fn one_spring() -> Self {
        Self {
            thick_filament_angle: SpringConfig::new(0.0, 0.0, 1.0),
            neck_length: SpringConfig::new(5.0, 0.0, 5.0),
            converter_angle: SpringConfig::new(PI, PI, 1.0),
            globular_length: SpringConfig::new(0.0, 0.0, 1.0),
        }
    }

    pub fn segment(&self, segment: Segment) -> &SpringConfig {
        match segment {
            Segment::ThickFilamentAngle => &self.thick_filament_angle,
            Segment::NeckLength => &self.neck_length,
            Segment::ConverterAngle => &self.converter_angle,
            Segment::GlobularLength => &self.globular_length,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Segment::ALL
            .iter()
            .try_for_each(|&segment| self.segment(segment).validate(segment))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Load {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Load { message, .. } => ConfigError::Load {
                path: path.to_string_lossy().to_string(),
                message,
            },
            other => other,
        })
    }
}

/// Every parameter a computed property depends on apart from the head location.
/// Stored grids are only reused while all of it is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModelIdentity {
    pub springs: CrossbridgeConfig,
    pub constants: PhysicalConstants,
    pub calibration: RateCalibration,
}

impl ModelIdentity {
    pub fn reference(kind: CrossbridgeKind) -> Self {
        Self {
            springs: kind.reference_config(),
            constants: PhysicalConstants::default(),
            calibration: kind.reference_calibration(),
        }
    }
}
