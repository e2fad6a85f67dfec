use super::config::ConfigError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Thick plus thin filament radii (nm) added to the face-to-face separation to get
/// the center-to-center distance.
const FILAMENT_RADII_SUM: f64 = 6.90;
const D10_PER_CENTER_DISTANCE: f64 = 1.5;

/// Upper bound on the head locations a single grid may sample.
pub const MAX_GRID_CELLS: usize = 50_000_000;

/// Converts a face-to-face filament separation into the d10 lattice spacing
/// measured by X-ray diffraction.
#[inline]
pub fn face_to_d10(face_to_face: f64) -> f64 {
    D10_PER_CENTER_DISTANCE * (face_to_face + FILAMENT_RADII_SUM)
}

/// Half-open sampling range `[start, stop)` walked in increments of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl AxisRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    pub fn validate(&self, axis: &'static str) -> Result<(), ConfigError> {
        if !(self.start.is_finite() && self.stop.is_finite() && self.step.is_finite()) {
            return Err(ConfigError::InvalidRange {
                axis,
                reason: "bounds and step must be finite".to_string(),
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::InvalidRange {
                axis,
                reason: format!("step must be positive, got {}", self.step),
            });
        }
        if self.stop <= self.start {
            return Err(ConfigError::InvalidRange {
                axis,
                reason: format!(
                    "stop ({}) must be greater than start ({})",
                    self.stop, self.start
                ),
            });
        }
        let samples = ((self.stop - self.start) / self.step).ceil();
        if samples > MAX_GRID_CELLS as f64 {
            return Err(ConfigError::InvalidRange {
                axis,
                reason: format!(
                    "{} samples exceed the limit of {}",
                    samples, MAX_GRID_CELLS
                ),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        if self.step <= 0.0 || self.stop <= self.start {
            return 0;
        }
        ((self.stop - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }

    /// The same range expressed in d10 units; the step scales with the conversion factor.
    pub fn to_d10(&self) -> AxisRange {
        AxisRange {
            start: face_to_d10(self.start),
            stop: face_to_d10(self.stop),
            step: D10_PER_CENTER_DISTANCE * self.step,
        }
    }
}

/// Rectangular sampling of head locations: columns walk the axial offset, rows the
/// lattice spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GridSpec {
    pub axial: AxisRange,
    pub lattice: AxisRange,
}

impl GridSpec {
    pub fn new(axial: AxisRange, lattice: AxisRange) -> Result<Self, ConfigError> {
        let grid = Self { axial, lattice };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.axial.validate("axial offset")?;
        self.lattice.validate("lattice spacing")?;
        match self.rows().checked_mul(self.cols()) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
            _ => Err(ConfigError::InvalidRange {
                axis: "grid",
                reason: format!(
                    "{} x {} cells exceed the limit of {}",
                    self.rows(),
                    self.cols(),
                    MAX_GRID_CELLS
                ),
            }),
        }
    }

    pub fn rows(&self) -> usize {
        self.lattice.len()
    }

    pub fn cols(&self) -> usize {
        self.axial.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows().saturating_mul(self.cols())
    }

    #[inline]
    pub fn head_location(&self, row: usize, col: usize) -> Point2<f64> {
        Point2::new(self.axial.value(col), self.lattice.value(row))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            axial: AxisRange::new(0.0, 20.0, 0.1),
            lattice: AxisRange::new(10.0, 20.0, 0.1),
        }
    }
}
