use crate::cli::ProbeArgs;
use crate::config;
use crate::error::Result;
use crossbridge::core::kinetics::KineticState;
use crossbridge::engine::error::EngineError;
use crossbridge::workflows;
use nalgebra::Point2;
use tracing::info;

pub fn run(args: ProbeArgs) -> Result<()> {
    let (model, trials, seed) = config::probe_model(&args)?;
    let only_state = args
        .state
        .map(KineticState::try_from)
        .transpose()
        .map_err(EngineError::from)?;
    let head = Point2::new(args.x, args.y);
    info!("Probing the {} crossbridge at ({}, {}).", model.kind, head.x, head.y);

    let report = workflows::probe::run(&model, head, trials, seed)?;

    println!(
        "{} crossbridge, head at x = {} nm, y = {} nm",
        report.kind, report.head.x, report.head.y
    );
    println!(
        "  {:<20} {:>12} {:>12} {:>22} {:>12}",
        "state", "energy", "free energy", "converter", "force x/y"
    );
    for probe in report
        .states
        .iter()
        .filter(|probe| only_state.is_none_or(|state| probe.state == state))
    {
        println!(
            "  {:<20} {:>12.4} {:>12.4} {:>10.4}, {:>10.4} {:>12.4}/{:.4}",
            probe.state.to_string(),
            probe.minimum.energy,
            probe.free_energy,
            probe.minimum.converter.x,
            probe.minimum.converter.y,
            probe.force.x,
            probe.force.y
        );
    }
    println!("  r12 = {:.6} ({} trials)", report.r12, report.trials);
    println!("  r23 = {:.6}", report.r23);
    println!("  r31 = {:.6}", report.r31);
    Ok(())
}
