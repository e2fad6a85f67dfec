use crate::core::kinetics::KineticState;
use crate::core::models::config::CrossbridgeKind;
use crate::engine::config::ModelConfig;
use crate::engine::crossbridge::{self, EnergyMinimum};
use crate::engine::error::EngineError;
use nalgebra::{Point2, Vector2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct StateProbe {
    pub state: KineticState,
    pub minimum: EnergyMinimum,
    pub free_energy: f64,
    pub force: Vector2<f64>,
}

/// Every property of one crossbridge at a single head location.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub kind: CrossbridgeKind,
    pub head: Point2<f64>,
    pub states: Vec<StateProbe>,
    pub trials: usize,
    pub r12: f64,
    pub r23: f64,
    pub r31: f64,
}

#[instrument(skip_all, name = "probe_workflow", fields(x = head.x, y = head.y))]
pub fn run(
    model: &ModelConfig,
    head: Point2<f64>,
    trials: usize,
    seed: u64,
) -> Result<ProbeReport, EngineError> {
    let crossbridge = crossbridge::build(model)?;

    let states = KineticState::ALL
        .into_iter()
        .map(|state| {
            Ok(StateProbe {
                state,
                minimum: crossbridge.minimize_energy(&head, state)?,
                free_energy: crossbridge.free_energy(&head, state)?,
                force: crossbridge.force(&head, state)?,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let report = ProbeReport {
        kind: model.kind,
        head,
        states,
        trials,
        r12: crossbridge.r12(&head, trials, &mut rng)?,
        r23: crossbridge.r23(&head)?,
        r31: crossbridge.r31(&head)?,
    };
    debug!(?report, "Probe finished.");
    Ok(report)
}
