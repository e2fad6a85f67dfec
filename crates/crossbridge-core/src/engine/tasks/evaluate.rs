use crate::core::models::grid::{Grid, GridValues};
use crate::core::models::lattice::GridSpec;
use crate::engine::config::Property;
use crate::engine::crossbridge::Crossbridge;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::utils::seeding::cell_rng;
use nalgebra::{Point2, Vector2};
use tracing::{debug, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const LOGGED_FAILURES: usize = 5;

/// A grid cell left at the NaN sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFailure {
    pub row: usize,
    pub col: usize,
    pub head: Point2<f64>,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Evaluation {
    pub values: GridValues,
    pub failures: Vec<CellFailure>,
}

#[derive(Debug, Clone, Copy)]
enum CellValue {
    Scalar(f64),
    Vector(Vector2<f64>),
}

fn evaluate_cell(
    crossbridge: &dyn Crossbridge,
    property: Property,
    head: &Point2<f64>,
    seed: u64,
    row: usize,
    col: usize,
) -> Result<CellValue, EngineError> {
    match property {
        Property::Energy { state } => crossbridge
            .minimize_energy(head, state)
            .map(|minimum| CellValue::Scalar(minimum.energy)),
        Property::FreeEnergy { state } => {
            crossbridge.free_energy(head, state).map(CellValue::Scalar)
        }
        Property::Force { state } => crossbridge.force(head, state).map(CellValue::Vector),
        Property::R12 { trials } => {
            let mut rng = cell_rng(seed, row, col);
            crossbridge
                .r12(head, trials, &mut rng)
                .map(CellValue::Scalar)
        }
        Property::R23 => crossbridge.r23(head).map(CellValue::Scalar),
        Property::R31 => crossbridge.r31(head).map(CellValue::Scalar),
    }
}

/// Evaluates `property` at every head location of `grid`.
///
/// Cells are independent and may run on any thread. A cell whose computation fails
/// holds NaN and is listed in [`Evaluation::failures`]; the rest of the grid is still
/// computed. Monte Carlo cells draw from a stream seeded by `seed` and their position.
#[instrument(skip_all, name = "grid_evaluation_task", fields(property = %property))]
pub fn run(
    crossbridge: &dyn Crossbridge,
    grid: &GridSpec,
    property: Property,
    seed: u64,
    reporter: &ProgressReporter,
) -> Result<Evaluation, EngineError> {
    property.validate()?;

    let rows = grid.rows();
    let cols = grid.cols();
    debug!(rows, cols, kind = %crossbridge.kind(), "Evaluating grid.");
    reporter.report(Progress::TaskStart {
        total_steps: grid.cell_count() as u64,
    });

    let cells = 0..grid.cell_count();

    #[cfg(not(feature = "parallel"))]
    let iterator = cells.into_iter();

    #[cfg(feature = "parallel")]
    let iterator = cells.into_par_iter();

    let outcomes: Vec<Result<CellValue, String>> = iterator
        .map(|index| {
            let (row, col) = (index / cols, index % cols);
            let head = grid.head_location(row, col);
            let outcome = evaluate_cell(crossbridge, property, &head, seed, row, col);
            if let Err(e) = &outcome {
                trace!(row, col, error = %e, "Cell evaluation failed.");
                reporter.report(Progress::CellFailed { row, col });
            }
            reporter.report(Progress::TaskIncrement);
            outcome.map_err(|e| e.to_string())
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let failures: Vec<CellFailure> = outcomes
        .iter()
        .enumerate()
        .filter_map(|(index, outcome)| {
            outcome.as_ref().err().map(|reason| {
                let (row, col) = (index / cols, index % cols);
                CellFailure {
                    row,
                    col,
                    head: grid.head_location(row, col),
                    reason: reason.clone(),
                }
            })
        })
        .collect();

    if !failures.is_empty() {
        warn!(
            "{} of {} cells could not be evaluated for {} and hold NaN.",
            failures.len(),
            outcomes.len(),
            property
        );
        for failure in failures.iter().take(LOGGED_FAILURES) {
            warn!(
                "  cell ({}, {}) at head ({:.3}, {:.3}): {}",
                failure.row, failure.col, failure.head.x, failure.head.y, failure.reason
            );
        }
    }

    let values = if property.is_vector() {
        GridValues::Vector(Grid::from_fn(rows, cols, |row, col| {
            match outcomes[row * cols + col] {
                Ok(CellValue::Vector(v)) => v,
                _ => Vector2::new(f64::NAN, f64::NAN),
            }
        }))
    } else {
        GridValues::Scalar(Grid::from_fn(rows, cols, |row, col| {
            match outcomes[row * cols + col] {
                Ok(CellValue::Scalar(v)) => v,
                _ => f64::NAN,
            }
        }))
    };

    Ok(Evaluation { values, failures })
}
