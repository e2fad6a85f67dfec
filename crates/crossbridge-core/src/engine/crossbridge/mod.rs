//! # Crossbridge Models
//!
//! The [`Crossbridge`] trait is the capability interface shared by the three spring-chain
//! variants. A variant supplies its own minimization, thermal head sampling and binding
//! geometry; free energies, forces and the kinetic rates are derived from those by the
//! trait's provided methods.
//!
//! - [`FourSpring`] - Full chain; the converter location is found by 2-D minimization
//! - [`TwoSpring`] - Converter pinned at the anchor; closed-form minimum
//! - [`OneSpring`] - A single axial spring; the lattice coordinate is ignored

mod four_spring;
mod one_spring;
mod two_spring;

pub use four_spring::FourSpring;
pub use one_spring::OneSpring;
pub use two_spring::TwoSpring;

use super::config::ModelConfig;
use super::error::EngineError;
use crate::core::constants::PhysicalConstants;
use crate::core::kinetics::{KineticState, RateCalibration};
use crate::core::mechanics::chain::SpringChain;
use crate::core::models::config::{ConfigError, CrossbridgeConfig, CrossbridgeKind};
use nalgebra::{Point2, Vector2};
use rand::distributions::Standard;
use rand::{Rng, RngCore};

/// Lowest-energy arrangement of the chain for a fixed head location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyMinimum {
    pub energy: f64,
    pub converter: Point2<f64>,
}

/// Immutable parts every variant is built from.
#[derive(Debug, Clone)]
pub struct Mechanics {
    config: CrossbridgeConfig,
    chain: SpringChain,
    constants: PhysicalConstants,
    calibration: RateCalibration,
}

impl Mechanics {
    pub fn new(
        config: &CrossbridgeConfig,
        constants: PhysicalConstants,
        calibration: RateCalibration,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            config: *config,
            chain: SpringChain::new(config, constants.kt())?,
            constants,
            calibration,
        })
    }

    pub fn config(&self) -> &CrossbridgeConfig {
        &self.config
    }

    pub fn chain(&self) -> &SpringChain {
        &self.chain
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn calibration(&self) -> &RateCalibration {
        &self.calibration
    }
}

pub trait Crossbridge: Send + Sync {
    fn kind(&self) -> CrossbridgeKind;

    fn mechanics(&self) -> &Mechanics;

    /// Converter location of least total energy for a head held at `head`.
    fn minimize_energy(
        &self,
        head: &Point2<f64>,
        state: KineticState,
    ) -> Result<EnergyMinimum, EngineError>;

    /// Head location after one draw of thermal fluctuations around the unbound rest shape.
    fn sample_head_location(&self, rng: &mut dyn RngCore) -> Point2<f64>;

    /// Total spring energy with both joints placed explicitly.
    fn energy(&self, converter: &Point2<f64>, head: &Point2<f64>, state: KineticState) -> f64 {
        self.mechanics().chain().energy(converter, head, state)
    }

    fn rest_converter_location(&self, state: KineticState) -> Point2<f64> {
        self.mechanics().chain().rest_converter_location(state)
    }

    /// Minimized mechanical energy plus the share of ATP free energy released on
    /// reaching `state`. The unbound state is the zero reference.
    fn free_energy(&self, head: &Point2<f64>, state: KineticState) -> Result<f64, EngineError> {
        let constants = self.mechanics().constants();
        let released = match state {
            KineticState::Unbound => return Ok(0.0),
            KineticState::WeaklyBound => constants.alpha,
            KineticState::StronglyBound => constants.eta,
        };
        let minimum = self.minimize_energy(head, state)?;
        Ok(released * constants.atp_free_energy() + minimum.energy)
    }

    /// Force on the head, the negative gradient of the minimized energy.
    fn force(&self, head: &Point2<f64>, state: KineticState) -> Result<Vector2<f64>, EngineError> {
        let minimum = self.minimize_energy(head, state)?;
        Ok(self
            .mechanics()
            .chain()
            .head_force(&minimum.converter, head, state))
    }

    fn binding_distance(&self, head: &Point2<f64>, site: &Point2<f64>) -> f64 {
        (site - head).norm()
    }

    /// One Bernoulli trial: does a thermally displaced head attach to `site`?
    fn bind_or_not(&self, site: &Point2<f64>, rng: &mut dyn RngCore) -> bool {
        let head = self.sample_head_location(rng);
        let distance = self.binding_distance(&head, site);
        let probability = self.mechanics().calibration().binding.probability(distance);
        let draw: f64 = rng.sample(Standard);
        draw < probability
    }

    /// Fraction of `trials` binding attempts at `site` that succeed.
    fn r12(
        &self,
        site: &Point2<f64>,
        trials: usize,
        rng: &mut dyn RngCore,
    ) -> Result<f64, EngineError> {
        if trials == 0 {
            return Err(ConfigError::NoTrials.into());
        }
        let bound = (0..trials).filter(|_| self.bind_or_not(site, rng)).count();
        Ok(bound as f64 / trials as f64)
    }

    /// Weak-to-strong transition rate, rising with the energy the powerstroke releases.
    fn r23(&self, site: &Point2<f64>) -> Result<f64, EngineError> {
        let weak = self.minimize_energy(site, KineticState::WeaklyBound)?;
        let strong = self.minimize_energy(site, KineticState::StronglyBound)?;
        Ok(self
            .mechanics()
            .calibration()
            .weak_to_strong(weak.energy, strong.energy))
    }

    /// Detachment rate, rising with the strain energy of the strongly bound head.
    fn r31(&self, site: &Point2<f64>) -> Result<f64, EngineError> {
        let strong = self.minimize_energy(site, KineticState::StronglyBound)?;
        Ok(self.mechanics().calibration().detachment(strong.energy))
    }
}

/// Instantiates the variant named by `model.kind`.
pub fn build(model: &ModelConfig) -> Result<Box<dyn Crossbridge>, EngineError> {
    let mechanics = Mechanics::new(&model.springs, model.constants, model.calibration)?;
    let crossbridge: Box<dyn Crossbridge> = match model.kind {
        CrossbridgeKind::FourSpring => Box::new(FourSpring::new(mechanics, model.minimizer)),
        CrossbridgeKind::TwoSpring => Box::new(TwoSpring::new(mechanics)),
        CrossbridgeKind::OneSpring => Box::new(OneSpring::new(mechanics)),
    };
    Ok(crossbridge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reference(kind: CrossbridgeKind) -> Box<dyn Crossbridge> {
        build(&ModelConfig::reference(kind)).unwrap()
    }

    #[test]
    fn build_selects_variant_by_kind() {
        for kind in [
            CrossbridgeKind::OneSpring,
            CrossbridgeKind::TwoSpring,
            CrossbridgeKind::FourSpring,
        ] {
            assert_eq!(reference(kind).kind(), kind);
        }
    }

    #[test]
    fn build_rejects_invalid_springs() {
        let mut springs = CrossbridgeConfig::four_spring();
        springs.globular_length.stiffness = 0.0;
        let model = ModelConfig::reference(CrossbridgeKind::FourSpring).with_springs(springs);
        assert!(matches!(
            build(&model),
            Err(EngineError::Config {
                source: ConfigError::NonPositiveStiffness { .. }
            })
        ));
    }

    #[test]
    fn unbound_free_energy_is_zero_everywhere() {
        let xb = reference(CrossbridgeKind::FourSpring);
        for head in [Point2::new(0.0, 10.0), Point2::new(12.0, 17.5)] {
            assert_eq!(xb.free_energy(&head, KineticState::Unbound).unwrap(), 0.0);
        }
    }

    #[test]
    fn bound_free_energy_adds_released_atp_share() {
        let xb = reference(CrossbridgeKind::FourSpring);
        let constants = PhysicalConstants::default();
        let head = Point2::new(5.0, 14.0);
        let minimum = xb.minimize_energy(&head, KineticState::StronglyBound).unwrap();
        let free = xb.free_energy(&head, KineticState::StronglyBound).unwrap();
        let expected = constants.eta * constants.atp_free_energy() + minimum.energy;
        assert!((free - expected).abs() < 1e-9);
    }

    #[test]
    fn r12_rejects_zero_trials() {
        let xb = reference(CrossbridgeKind::FourSpring);
        let mut rng = StdRng::seed_from_u64(3);
        let result = xb.r12(&Point2::new(10.0, 15.0), 0, &mut rng);
        assert!(matches!(
            result,
            Err(EngineError::Config {
                source: ConfigError::NoTrials
            })
        ));
    }

    #[test]
    fn r12_is_a_probability() {
        let xb = reference(CrossbridgeKind::TwoSpring);
        let mut rng = StdRng::seed_from_u64(11);
        let site = xb.mechanics().chain().rest_head_location(KineticState::Unbound);
        let rate = xb.r12(&site, 200, &mut rng).unwrap();
        assert!((0.0..=1.0).contains(&rate));
        assert!(rate > 0.0);
    }

    #[test]
    fn r12_variance_shrinks_with_trial_count() {
        let xb = reference(CrossbridgeKind::OneSpring);
        let site = Point2::new(5.0, 0.0);
        let mut rng = StdRng::seed_from_u64(2024);

        let variance = |trials: usize, repeats: usize, rng: &mut StdRng| {
            let estimates: Vec<f64> = (0..repeats)
                .map(|_| xb.r12(&site, trials, rng).unwrap())
                .collect();
            let mean = estimates.iter().sum::<f64>() / repeats as f64;
            estimates.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / (repeats - 1) as f64
        };

        let few = variance(10, 400, &mut rng);
        let many = variance(10_000, 30, &mut rng);
        assert!(few > 0.0);
        assert!(few / many.max(f64::MIN_POSITIVE) > 100.0);
    }

    #[test]
    fn r23_orders_with_released_powerstroke_energy() {
        let xb = reference(CrossbridgeKind::OneSpring);
        let near = Point2::new(2.6, 0.0);
        let far = Point2::new(3.0, 0.0);
        let gap = |site: &Point2<f64>| {
            xb.minimize_energy(site, KineticState::WeaklyBound).unwrap().energy
                - xb.minimize_energy(site, KineticState::StronglyBound).unwrap().energy
        };
        assert!(gap(&near) > gap(&far));
        assert!(xb.r23(&near).unwrap() > xb.r23(&far).unwrap());
    }

    #[test]
    fn r31_is_finite_and_floored_at_rest() {
        let xb = reference(CrossbridgeKind::FourSpring);
        let rest = xb
            .mechanics()
            .chain()
            .rest_head_location(KineticState::StronglyBound);
        let rate = xb.r31(&rest).unwrap();
        assert!(rate.is_finite());
        assert!(rate >= xb.mechanics().calibration().r31_floor);
        assert!(rate < xb.mechanics().calibration().r31_floor + 1e-3);
    }
}
