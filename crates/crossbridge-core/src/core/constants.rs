use serde::{Deserialize, Serialize};

const JOULES_TO_PN_NM: f64 = 1e21;

/// Thermodynamic environment shared by every spring and kinetic rate of a crossbridge.
///
/// Concentrations are molar, the standard hydrolysis free energy is in units of RT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PhysicalConstants {
    pub temperature: f64,
    pub boltzmann: f64,
    pub standard_free_energy: f64,
    pub atp_concentration: f64,
    pub adp_concentration: f64,
    pub phosphate_concentration: f64,
    /// Fraction of the hydrolysis free energy released on weak binding.
    pub alpha: f64,
    /// Fraction released once strongly bound.
    pub eta: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            temperature: 288.0,
            boltzmann: 1.381e-23,
            standard_free_energy: 13.0,
            atp_concentration: 0.005,
            adp_concentration: 0.00003,
            phosphate_concentration: 0.003,
            alpha: 0.28,
            eta: 0.68,
        }
    }
}

impl PhysicalConstants {
    /// Thermal energy in pN·nm.
    #[inline]
    pub fn kt(&self) -> f64 {
        self.boltzmann * self.temperature * JOULES_TO_PN_NM
    }

    /// Free energy liberated by hydrolysis of one ATP at the configured concentrations.
    #[inline]
    pub fn atp_free_energy(&self) -> f64 {
        -self.standard_free_energy
            - (self.atp_concentration / (self.adp_concentration * self.phosphate_concentration))
                .ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn thermal_energy_is_about_four_piconewton_nanometers_at_288_kelvin() {
        let constants = PhysicalConstants::default();
        assert!(f64_approx_equal(constants.kt(), 3.97728));
    }

    #[test]
    fn atp_free_energy_matches_reference_concentrations() {
        let constants = PhysicalConstants::default();
        let expected = -13.0 - (0.005_f64 / (0.00003 * 0.003)).ln();
        assert!(f64_approx_equal(constants.atp_free_energy(), expected));
        assert!(constants.atp_free_energy() < -23.0);
    }

    #[test]
    fn raising_atp_concentration_liberates_more_free_energy() {
        let base = PhysicalConstants::default();
        let rich = PhysicalConstants {
            atp_concentration: 0.010,
            ..base
        };
        assert!(rich.atp_free_energy() < base.atp_free_energy());
    }
}
