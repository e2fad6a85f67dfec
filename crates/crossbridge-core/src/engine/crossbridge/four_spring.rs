use super::{Crossbridge, EnergyMinimum, Mechanics};
use crate::core::kinetics::KineticState;
use crate::core::models::config::CrossbridgeKind;
use crate::engine::error::EngineError;
use crate::engine::minimizer::{Minimizer, MinimizerConfig, MinimizerError, NelderMead};
use nalgebra::Point2;
use rand::RngCore;
use tracing::debug;

/// Thick filament angle, neck, converter and globular domain all compliant.
///
/// Fixing the head leaves the converter joint free, so every energy query solves a
/// planar minimization over the converter location.
pub struct FourSpring {
    mechanics: Mechanics,
    minimizer: Box<dyn Minimizer>,
}

impl FourSpring {
    pub fn new(mechanics: Mechanics, minimizer: MinimizerConfig) -> Self {
        Self::with_minimizer(mechanics, Box::new(NelderMead::new(minimizer)))
    }

    pub fn with_minimizer(mechanics: Mechanics, minimizer: Box<dyn Minimizer>) -> Self {
        Self {
            mechanics,
            minimizer,
        }
    }
}

impl Crossbridge for FourSpring {
    fn kind(&self) -> CrossbridgeKind {
        CrossbridgeKind::FourSpring
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
        let objective = |converter: &Point2<f64>| chain.energy(converter, head, state);

        let start = chain.rest_converter_location(state);
        let mut attempt = self.minimizer.minimize(&objective, start)?;
        let mut iterations = attempt.iterations;

        if !attempt.converged {
            debug!(
                x = head.x,
                y = head.y,
                state = state.number(),
                "Converter search stalled, restarting from its best point."
            );
            attempt = self.minimizer.minimize(&objective, attempt.point)?;
            iterations += attempt.iterations;
        }

        if !attempt.converged {
            return Err(MinimizerError::NotConverged {
                iterations,
                best_value: attempt.value,
            }
            .into());
        }

        Ok(EnergyMinimum {
            energy: attempt.value,
            converter: attempt.point,
        })
    }

    fn sample_head_location(&self, rng: &mut dyn RngCore) -> Point2<f64> {
        self.mechanics.chain().sample_values(rng).head_location()
    }
}
