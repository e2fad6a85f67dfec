use argmin::core::{CostFunction, Error as ArgminError, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead as SimplexSolver;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MinimizerError {
    #[error("Objective is not finite at the starting point ({x}, {y})")]
    NonFiniteStart { x: f64, y: f64 },

    #[error(
        "Minimizer did not converge within {iterations} iterations (best energy {best_value})"
    )]
    NotConverged { iterations: usize, best_value: f64 },

    #[error("Simplex solver failed: {reason}")]
    Solver { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MinimizerConfig {
    pub max_iterations: usize,
    /// Standard deviation of objective values across the simplex accepted as converged.
    pub function_tolerance: f64,
    /// Edge length of the starting simplex, in nm.
    pub initial_step: f64,
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            function_tolerance: 1e-12,
            initial_step: 1.0,
        }
    }
}

/// Best point found by one minimization attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    pub point: Point2<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Local minimizer over a planar coordinate.
///
/// Implementations never return a point worse than `start`.
pub trait Minimizer: Send + Sync {
    fn minimize(
        &self,
        objective: &dyn Fn(&Point2<f64>) -> f64,
        start: Point2<f64>,
    ) -> Result<Minimum, MinimizerError>;
}

/// Adapts a planar objective to the parameter vectors the solver works on.
struct PlanarObjective<'a> {
    objective: &'a dyn Fn(&Point2<f64>) -> f64,
}

impl CostFunction for PlanarObjective<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, ArgminError> {
        Ok((self.objective)(&Point2::new(param[0], param[1])))
    }
}

fn solver_error(e: ArgminError) -> MinimizerError {
    MinimizerError::Solver {
        reason: e.to_string(),
    }
}

/// Derivative-free downhill simplex search, run through `argmin`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NelderMead {
    config: MinimizerConfig,
}

impl NelderMead {
    pub fn new(config: MinimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinimizerConfig {
        &self.config
    }

    fn initial_simplex(&self, start: &Point2<f64>) -> Vec<Vec<f64>> {
        let step = self.config.initial_step;
        vec![
            vec![start.x, start.y],
            vec![start.x + step, start.y],
            vec![start.x, start.y + step],
        ]
    }
}

impl Minimizer for NelderMead {
    fn minimize(
        &self,
        objective: &dyn Fn(&Point2<f64>) -> f64,
        start: Point2<f64>,
    ) -> Result<Minimum, MinimizerError> {
        let start_value = objective(&start);
        if !start_value.is_finite() {
            return Err(MinimizerError::NonFiniteStart {
                x: start.x,
                y: start.y,
            });
        }

        let solver = SimplexSolver::new(self.initial_simplex(&start))
            .with_sd_tolerance(self.config.function_tolerance)
            .map_err(solver_error)?;
        let max_iterations = self.config.max_iterations as u64;
        let result = Executor::new(PlanarObjective { objective }, solver)
            .configure(|state| state.max_iters(max_iterations))
            .run()
            .map_err(solver_error)?;

        let state = result.state();
        let iterations = state.get_iter() as usize;
        let converged = matches!(
            state.get_termination_status(),
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let (point, value) = match state.get_best_param() {
            Some(best) if state.get_best_cost() <= start_value => {
                (Point2::new(best[0], best[1]), state.get_best_cost())
            }
            _ => (start, start_value),
        };

        trace!(iterations, converged, value, "Simplex search finished.");
        Ok(Minimum {
            point,
            value,
            iterations,
            converged,
        })
    }
}
