use super::{Crossbridge, EnergyMinimum, Mechanics};
use crate::core::kinetics::KineticState;
use crate::core::mechanics::spring::Spring;
use crate::core::models::config::CrossbridgeKind;
use crate::engine::error::EngineError;
use nalgebra::{Point2, Vector2};
use rand::RngCore;

/// A single axial spring, the neck, running along the filament axis.
///
/// Only the x coordinate of a head or binding site matters; lattice spacing has no
/// effect on any property.
pub struct OneSpring {
    mechanics: Mechanics,
}

impl OneSpring {
    pub fn new(mechanics: Mechanics) -> Self {
        Self { mechanics }
    }

    fn spring(&self) -> &Spring {
        &self.mechanics.chain().neck
    }
}

impl Crossbridge for OneSpring {
    fn kind(&self) -> CrossbridgeKind {
        CrossbridgeKind::OneSpring
    }

    fn mechanics(&self) -> &Mechanics {
        &self.mechanics
    }

    fn minimize_energy(
        &self,
        head: &Point2<f64>,
        state: KineticState,
    ) -> Result<EnergyMinimum, EngineError> {
        Ok(EnergyMinimum {
            energy: self.spring().energy(head.x, state),
            converter: Point2::new(head.x, 0.0),
        })
    }

    fn energy(&self, _converter: &Point2<f64>, head: &Point2<f64>, state: KineticState) -> f64 {
        self.spring().energy(head.x, state)
    }

    fn rest_converter_location(&self, state: KineticState) -> Point2<f64> {
        Point2::new(self.spring().rest(state), 0.0)
    }

    fn force(&self, head: &Point2<f64>, state: KineticState) -> Result<Vector2<f64>, EngineError> {
        Ok(Vector2::new(self.spring().restoring(head.x, state), 0.0))
    }

    fn sample_head_location(&self, rng: &mut dyn RngCore) -> Point2<f64> {
        Point2::new(self.spring().sample_deviate(rng), 0.0)
    }

    fn binding_distance(&self, head: &Point2<f64>, site: &Point2<f64>) -> f64 {
        site.x - head.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::PhysicalConstants;
    use crate::core::models::config::CrossbridgeConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reference() -> OneSpring {
        OneSpring::new(
            Mechanics::new(
                &CrossbridgeConfig::one_spring(),
                PhysicalConstants::default(),
                CrossbridgeKind::OneSpring.reference_calibration(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn minimized_energy_is_the_closed_form_spring_energy() {
        let xb = reference();
        let k = CrossbridgeConfig::one_spring().neck_length.stiffness;
        let r = CrossbridgeConfig::one_spring().neck_length.weak;
        for x in [-3.0, 0.0, 4.5, 5.0, 12.25] {
            let minimum = xb
                .minimize_energy(&Point2::new(x, 0.0), KineticState::Unbound)
                .unwrap();
            assert_eq!(minimum.energy, 0.5 * k * (x - r) * (x - r));
        }
    }

    #[test]
    fn lattice_coordinate_is_ignored() {
        let xb = reference();
        for state in KineticState::ALL {
            let low = xb.minimize_energy(&Point2::new(3.0, 10.0), state).unwrap();
            let high = xb.minimize_energy(&Point2::new(3.0, 19.0), state).unwrap();
            assert_eq!(low.energy, high.energy);
            assert_eq!(
                xb.force(&Point2::new(3.0, 10.0), state).unwrap(),
                xb.force(&Point2::new(3.0, 19.0), state).unwrap()
            );
        }
    }

    #[test]
    fn strong_state_rests_at_zero() {
        let xb = reference();
        let minimum = xb
            .minimize_energy(&Point2::new(0.0, 12.0), KineticState::StronglyBound)
            .unwrap();
        assert_eq!(minimum.energy, 0.0);
        assert_eq!(
            xb.rest_converter_location(KineticState::StronglyBound),
            Point2::new(0.0, 0.0)
        );
    }

    #[test]
    fn force_is_axial_and_restoring() {
        let xb = reference();
        let stretched = xb
            .force(&Point2::new(7.0, 15.0), KineticState::Unbound)
            .unwrap();
        assert_eq!(stretched, Vector2::new(-10.0, 0.0));
        let compressed = xb
            .force(&Point2::new(4.0, 15.0), KineticState::WeaklyBound)
            .unwrap();
        assert_eq!(compressed, Vector2::new(5.0, 0.0));
    }

    #[test]
    fn binding_is_likelier_near_the_rest_length() {
        let xb = reference();
        let mut rng = StdRng::seed_from_u64(17);
        let near = xb.r12(&Point2::new(5.0, 13.0), 4000, &mut rng).unwrap();
        let far = xb.r12(&Point2::new(12.0, 13.0), 4000, &mut rng).unwrap();
        assert!(near > far);
        assert!(far < 0.01);
    }
}
