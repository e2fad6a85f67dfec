use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const RATE_EPSILON: f64 = 1e-12;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StateError {
    #[error("Invalid kinetic state {0}: expected 1 (unbound), 2 (weakly bound) or 3 (strongly bound)")]
    Invalid(i64),
}

/// Position of a crossbridge in the three-state attachment cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum KineticState {
    Unbound = 1,
    WeaklyBound = 2,
    StronglyBound = 3,
}

impl KineticState {
    pub const ALL: [KineticState; 3] = [
        KineticState::Unbound,
        KineticState::WeaklyBound,
        KineticState::StronglyBound,
    ];

    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// States 1 and 2 share the pre-powerstroke geometry; only state 3 uses the strong one.
    #[inline]
    pub fn uses_strong_geometry(self) -> bool {
        matches!(self, KineticState::StronglyBound)
    }
}

impl TryFrom<i64> for KineticState {
    type Error = StateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(KineticState::Unbound),
            2 => Ok(KineticState::WeaklyBound),
            3 => Ok(KineticState::StronglyBound),
            other => Err(StateError::Invalid(other)),
        }
    }
}

impl TryFrom<u8> for KineticState {
    type Error = StateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        KineticState::try_from(i64::from(value))
    }
}

impl From<KineticState> for i64 {
    fn from(state: KineticState) -> Self {
        state.number() as i64
    }
}

impl fmt::Display for KineticState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KineticState::Unbound => "unbound",
            KineticState::WeaklyBound => "weakly bound",
            KineticState::StronglyBound => "strongly bound",
        };
        write!(f, "{} ({})", self.number(), name)
    }
}

/// Probability of attachment as a function of the distance between a thermally
/// displaced head and an open binding site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum BindingKernel {
    /// `prefactor * exp(-d^2) + floor`
    Gaussian { prefactor: f64, floor: f64 },
    /// `prefactor * exp(-d)`
    Exponential { prefactor: f64 },
}

impl BindingKernel {
    #[inline]
    pub fn probability(&self, distance: f64) -> f64 {
        match *self {
            BindingKernel::Gaussian { prefactor, floor } => {
                prefactor * (-distance * distance).exp() + floor
            }
            BindingKernel::Exponential { prefactor } => prefactor * (-distance.abs()).exp(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RateCalibration {
    pub binding: BindingKernel,
    pub r23_amplitude: f64,
    pub r23_slope: f64,
    pub r23_offset: f64,
    pub r23_floor: f64,
    pub r31_scale: f64,
    pub r31_floor: f64,
}

impl RateCalibration {
    pub fn with_binding(binding: BindingKernel) -> Self {
        Self {
            binding,
            r23_amplitude: 0.1,
            r23_slope: 0.4,
            r23_offset: 4.0,
            r23_floor: 0.001,
            r31_scale: 0.01,
            r31_floor: 0.02,
        }
    }

    /// Sigmoid in the energy released by the powerstroke, `E2 - E3`.
    #[inline]
    pub fn weak_to_strong(&self, weak_energy: f64, strong_energy: f64) -> f64 {
        self.r23_amplitude
            * (1.0 + (self.r23_slope * (weak_energy - strong_energy) + self.r23_offset).tanh())
            + self.r23_floor
    }

    #[inline]
    pub fn detachment(&self, strong_energy: f64) -> f64 {
        (self.r31_scale * strong_energy + RATE_EPSILON).sqrt() + self.r31_floor
    }
}

impl Default for RateCalibration {
    fn default() -> Self {
        Self::with_binding(BindingKernel::Gaussian {
            prefactor: 12.0,
            floor: 0.0,
        })
    }
}
