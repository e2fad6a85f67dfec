use crate::cli::GenerateArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use crossbridge::engine::progress::ProgressReporter;
use crossbridge::workflows;
use tracing::{info, warn};

pub fn run(args: GenerateArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialRunConfig::from_file(path)?,
        None => PartialRunConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Generating {} grid(s) for the {} crossbridge ({} x {} cells)...",
        config.selection.properties().len(),
        config.model.kind,
        config.grid.rows(),
        config.grid.cols()
    );
    info!("Invoking the core generation workflow...");
    let result = workflows::generate::run(&config, &reporter)?;

    for outcome in &result.outcomes {
        if outcome.failures.is_empty() {
            println!("  ✓ {}", outcome.property);
        } else {
            warn!(
                "{} cell(s) of {} hold NaN.",
                outcome.failures.len(),
                outcome.property
            );
            println!(
                "  ! {} ({} cell(s) failed, stored as NaN)",
                outcome.property,
                outcome.failures.len()
            );
        }
    }
    println!("Grids written to: {}", result.store_dir.display());

    if progress_handler.failed_cells() != result.failed_cells() {
        warn!(
            reported = progress_handler.failed_cells(),
            collected = result.failed_cells(),
            "Failed cell counts disagree."
        );
    }
    Ok(())
}
