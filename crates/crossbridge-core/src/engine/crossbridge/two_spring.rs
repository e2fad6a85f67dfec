use super::{Crossbridge, EnergyMinimum, Mechanics};
use crate::core::kinetics::KineticState;
use crate::core::mechanics::chain::SegmentValues;
use crate::core::models::config::CrossbridgeKind;
use crate::engine::error::EngineError;
use nalgebra::Point2;
use rand::RngCore;

/// Only the converter angle and globular length are compliant. The thick filament
/// angle and neck length stay at their rest values, which pins the converter.
pub struct TwoSpring {
    mechanics: Mechanics,
}

impl TwoSpring {
    pub fn new(mechanics: Mechanics) -> Self {
        Self { mechanics }
    }
}

impl Crossbridge for TwoSpring {
    fn kind(&self) -> CrossbridgeKind {
        CrossbridgeKind::TwoSpring
    }

    fn mechanics(&self) -> &Mechanics {
        &self.mechanics
    }

    fn minimize_energy(
        &self,
        head: &Point2<f64>,
        state: KineticState,
    ) -> Result<EnergyMinimum, EngineError> {
        let chain = self.mechanics.chain();
        let converter = chain.rest_converter_location(state);
        Ok(EnergyMinimum {
            energy: chain.energy(&converter, head, state),
            converter,
        })
    }

    fn sample_head_location(&self, rng: &mut dyn RngCore) -> Point2<f64> {
        let chain = self.mechanics.chain();
        let pinned = chain.rest_values(KineticState::Unbound);
        SegmentValues {
            thick_filament_angle: pinned.thick_filament_angle,
            neck_length: pinned.neck_length,
            converter_angle: chain.converter.sample_deviate(rng),
            globular_length: chain.globular.sample_deviate(rng),
        }
        .head_location()
    }
}
