use super::spring::Spring;
use crate::core::kinetics::KineticState;
use crate::core::models::config::{ConfigError, CrossbridgeConfig, Segment};
use nalgebra::{Point2, Vector2};
use rand::Rng;
use std::f64::consts::PI;

/// Angles and lengths of the four links for one placement of converter and head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentValues {
    pub thick_filament_angle: f64,
    pub neck_length: f64,
    pub converter_angle: f64,
    pub globular_length: f64,
}

impl SegmentValues {
    /// Inverse kinematics: decomposes the anchor→converter and converter→head vectors.
    /// The converter angle is measured between the neck and the globular domain.
    pub fn from_locations(converter: &Point2<f64>, head: &Point2<f64>) -> Self {
        let lever = head - converter;
        let thick_filament_angle = converter.y.atan2(converter.x);
        Self {
            thick_filament_angle,
            neck_length: converter.coords.norm(),
            converter_angle: lever.y.atan2(lever.x) + PI - thick_filament_angle,
            globular_length: lever.norm(),
        }
    }

    pub fn converter_location(&self) -> Point2<f64> {
        Point2::new(
            self.neck_length * self.thick_filament_angle.cos(),
            self.neck_length * self.thick_filament_angle.sin(),
        )
    }

    /// Forward kinematics from the anchor at the origin out to the head.
    pub fn head_location(&self) -> Point2<f64> {
        let heading = self.converter_angle + self.thick_filament_angle - PI;
        self.converter_location()
            + Vector2::new(heading.cos(), heading.sin()) * self.globular_length
    }
}

/// The anchor-neck-converter-globular chain of springs shared by every crossbridge variant.
#[derive(Debug, Clone)]
pub struct SpringChain {
    pub thick_filament: Spring,
    pub neck: Spring,
    pub converter: Spring,
    pub globular: Spring,
}

impl SpringChain {
    pub fn new(config: &CrossbridgeConfig, kt: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            thick_filament: Spring::new(
                Segment::ThickFilamentAngle,
                &config.thick_filament_angle,
                kt,
            )?,
            neck: Spring::new(Segment::NeckLength, &config.neck_length, kt)?,
            converter: Spring::new(Segment::ConverterAngle, &config.converter_angle, kt)?,
            globular: Spring::new(Segment::GlobularLength, &config.globular_length, kt)?,
        })
    }

    pub fn rest_values(&self, state: KineticState) -> SegmentValues {
        SegmentValues {
            thick_filament_angle: self.thick_filament.rest(state),
            neck_length: self.neck.rest(state),
            converter_angle: self.converter.rest(state),
            globular_length: self.globular.rest(state),
        }
    }

    pub fn rest_converter_location(&self, state: KineticState) -> Point2<f64> {
        self.rest_values(state).converter_location()
    }

    pub fn rest_head_location(&self, state: KineticState) -> Point2<f64> {
        self.rest_values(state).head_location()
    }

    pub fn segment_energy(&self, values: &SegmentValues, state: KineticState) -> f64 {
        self.thick_filament
            .energy(values.thick_filament_angle, state)
            + self.neck.energy(values.neck_length, state)
            + self.converter.energy(values.converter_angle, state)
            + self.globular.energy(values.globular_length, state)
    }

    pub fn energy(&self, converter: &Point2<f64>, head: &Point2<f64>, state: KineticState) -> f64 {
        self.segment_energy(&SegmentValues::from_locations(converter, head), state)
    }

    /// Force on the head with the converter held fixed, `-dU/dh`.
    ///
    /// Only the converter and globular springs depend on the head location. Evaluated
    /// at an energy-minimizing converter this is the full gradient of the minimized
    /// energy as well.
    pub fn head_force(
        &self,
        converter: &Point2<f64>,
        head: &Point2<f64>,
        state: KineticState,
    ) -> Vector2<f64> {
        let values = SegmentValues::from_locations(converter, head);
        let lever = head - converter;
        let heading = lever.y.atan2(lever.x);
        let radial = Vector2::new(heading.cos(), heading.sin());
        let tangential = Vector2::new(-heading.sin(), heading.cos());

        let axial_pull = self.globular.restoring(values.globular_length, state);
        let torque = self.converter.restoring(values.converter_angle, state);

        radial * axial_pull + tangential * (torque / values.globular_length)
    }

    /// Thermally displaced values for all four segments.
    pub fn sample_values<R: Rng + ?Sized>(&self, rng: &mut R) -> SegmentValues {
        SegmentValues {
            thick_filament_angle: self.thick_filament.sample_deviate(rng),
            neck_length: self.neck.sample_deviate(rng),
            converter_angle: self.converter.sample_deviate(rng),
            globular_length: self.globular.sample_deviate(rng),
        }
    }
}
