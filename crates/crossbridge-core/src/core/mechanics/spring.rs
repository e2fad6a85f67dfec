use crate::core::kinetics::KineticState;
use crate::core::models::config::{ConfigError, Segment, SpringConfig};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// One harmonic degree of freedom of the crossbridge, linear or torsional.
#[derive(Debug, Clone)]
pub struct Spring {
    segment: Segment,
    weak_rest: f64,
    strong_rest: f64,
    stiffness: f64,
    thermal: Normal<f64>,
}

impl Spring {
    /// Builds the spring and its equilibrium fluctuation at thermal energy `kt`.
    ///
    /// With `U(x) = k (x - x0)^2 / 2` the Boltzmann density `exp(-U / kT)` is a normal
    /// density of mean `x0` and variance `kT / k`, so deviates are drawn from that.
    pub fn new(segment: Segment, config: &SpringConfig, kt: f64) -> Result<Self, ConfigError> {
        config.validate(segment)?;
        let std_dev = (kt / config.stiffness).sqrt();
        let thermal =
            Normal::new(config.weak, std_dev).map_err(|_| ConfigError::NonFinite {
                segment,
                field: "thermal standard deviation",
                value: std_dev,
            })?;
        Ok(Self {
            segment,
            weak_rest: config.weak,
            strong_rest: config.strong,
            stiffness: config.stiffness,
            thermal,
        })
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn thermal_std_dev(&self) -> f64 {
        self.thermal.std_dev()
    }

    #[inline]
    pub fn rest(&self, state: KineticState) -> f64 {
        if state.uses_strong_geometry() {
            self.strong_rest
        } else {
            self.weak_rest
        }
    }

    #[inline]
    pub fn energy(&self, value: f64, state: KineticState) -> f64 {
        let stretch = value - self.rest(state);
        0.5 * self.stiffness * stretch * stretch
    }

    /// Restoring generalized force `-dU/dx` at `value`.
    #[inline]
    pub fn restoring(&self, value: f64, state: KineticState) -> f64 {
        -self.stiffness * (value - self.rest(state))
    }

    /// A thermally displaced value around the weak rest position.
    pub fn sample_deviate<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.thermal.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TOLERANCE: f64 = 1e-9;
    const KT: f64 = 3.97728;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn neck() -> Spring {
        Spring::new(Segment::NeckLength, &SpringConfig::new(7.0, 5.0, 10.0), KT).unwrap()
    }

    #[test]
    fn rest_uses_weak_value_for_first_two_states() {
        let spring = neck();
        assert_eq!(spring.rest(KineticState::Unbound), 7.0);
        assert_eq!(spring.rest(KineticState::WeaklyBound), 7.0);
        assert_eq!(spring.rest(KineticState::StronglyBound), 5.0);
    }

    #[test]
    fn energy_is_zero_at_rest_for_every_state() {
        let spring = neck();
        for state in KineticState::ALL {
            assert_eq!(spring.energy(spring.rest(state), state), 0.0);
        }
    }

    #[test]
    fn energy_is_quadratic_in_stretch() {
        let spring = neck();
        assert!(f64_approx_equal(spring.energy(9.0, KineticState::Unbound), 20.0));
        assert!(f64_approx_equal(spring.energy(3.0, KineticState::StronglyBound), 20.0));
        assert!(spring.energy(6.9, KineticState::WeaklyBound) > 0.0);
    }

    #[test]
    fn restoring_force_points_back_to_rest() {
        let spring = neck();
        assert!(spring.restoring(8.0, KineticState::Unbound) < 0.0);
        assert!(spring.restoring(6.0, KineticState::Unbound) > 0.0);
        assert_eq!(spring.restoring(5.0, KineticState::StronglyBound), 0.0);
    }

    #[test]
    fn construction_rejects_non_positive_stiffness() {
        let result = Spring::new(
            Segment::GlobularLength,
            &SpringConfig::new(3.0, 3.0, -1.0),
            KT,
        );
        assert!(matches!(
            result,
            Err(ConfigError::NonPositiveStiffness { .. })
        ));
    }

    #[test]
    fn thermal_spread_shrinks_with_stiffness() {
        let soft = Spring::new(Segment::NeckLength, &SpringConfig::new(0.0, 0.0, 1.0), KT).unwrap();
        let stiff =
            Spring::new(Segment::NeckLength, &SpringConfig::new(0.0, 0.0, 100.0), KT).unwrap();
        assert!(f64_approx_equal(soft.thermal_std_dev(), KT.sqrt()));
        assert!(f64_approx_equal(stiff.thermal_std_dev(), (KT / 100.0).sqrt()));
    }

    #[test]
    fn deviates_are_centered_on_weak_rest_with_boltzmann_variance() {
        let spring = neck();
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<f64> = (0..20_000).map(|_| spring.sample_deviate(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
        assert!((mean - 7.0).abs() < 0.05);
        assert!((variance - KT / 10.0).abs() < 0.03);
    }
}
