use clap::{Args, Parser, Subcommand};
use crossbridge::core::models::config::CrossbridgeKind;
use crossbridge::engine::config::StoredProperty;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Dave Williams",
    version,
    about = "xbridge - Energy, force and kinetic-rate landscapes of spring-chain myosin crossbridge models.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for grid evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute property grids for a crossbridge variant and store them.
    Generate(GenerateArgs),
    /// List the grids stored for a crossbridge variant.
    List(ListArgs),
    /// Evaluate every property at a single head location.
    Probe(ProbeArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Run configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Crossbridge variant by spring count (1, 2 or 4).
    #[arg(short = 't', long = "type", value_name = "SPRINGS")]
    pub kind: Option<CrossbridgeKind>,

    /// Spring configuration file (segments T, N, C and G) replacing the reference springs.
    #[arg(short, long, value_name = "PATH")]
    pub springs: Option<PathBuf>,

    /// Root directory of the grid stores.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Compute only this property (energy, free_energy, post_energy, r12, r23, r31,
    /// force1, force2 or force3). All of them by default.
    #[arg(short, long, value_name = "NAME")]
    pub property: Option<StoredProperty>,

    /// Monte Carlo binding attempts per cell for r12.
    #[arg(short = 'n', long, value_name = "INT")]
    pub trials: Option<usize>,

    /// Seed of the per-cell random streams.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Axial offset range in nm, as START:STOP:STEP.
    #[arg(long, value_name = "START:STOP:STEP", allow_hyphen_values = true)]
    pub axial: Option<String>,

    /// Lattice spacing range (filament face to face, nm), as START:STOP:STEP.
    #[arg(long, value_name = "START:STOP:STEP", allow_hyphen_values = true)]
    pub lattice: Option<String>,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Crossbridge variant by spring count (1, 2 or 4).
    #[arg(short = 't', long = "type", value_name = "SPRINGS", default_value = "4")]
    pub kind: CrossbridgeKind,

    /// Root directory of the grid stores.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `probe` subcommand.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Axial offset of the head in nm.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Lattice spacing of the head in nm.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// Crossbridge variant by spring count (1, 2 or 4).
    #[arg(short = 't', long = "type", value_name = "SPRINGS", default_value = "4")]
    pub kind: CrossbridgeKind,

    /// Spring configuration file (segments T, N, C and G) replacing the reference springs.
    #[arg(short, long, value_name = "PATH")]
    pub springs: Option<PathBuf>,

    /// Monte Carlo binding attempts for r12.
    #[arg(short = 'n', long, value_name = "INT")]
    pub trials: Option<usize>,

    /// Seed of the random stream used for r12.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Only show this kinetic state (1 unbound, 2 weakly bound, 3 strongly bound).
    #[arg(long, value_name = "STATE")]
    pub state: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_accepts_all_overrides() {
        let cli = Cli::try_parse_from([
            "xbridge",
            "-vv",
            "generate",
            "-t",
            "2",
            "-p",
            "post_energy",
            "-n",
            "50",
            "--axial=-5:15:0.5",
            "--lattice",
            "10:20:1",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.kind, Some(CrossbridgeKind::TwoSpring));
        assert_eq!(args.property, Some(StoredProperty::PostEnergy));
        assert_eq!(args.trials, Some(50));
        assert_eq!(args.axial.as_deref(), Some("-5:15:0.5"));
        assert_eq!(args.lattice.as_deref(), Some("10:20:1"));
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let result = Cli::try_parse_from(["xbridge", "list", "-t", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn probe_takes_head_location_and_defaults_to_four_springs() {
        let cli = Cli::try_parse_from(["xbridge", "probe", "-1.5", "12"]).unwrap();
        let Commands::Probe(args) = cli.command else {
            panic!("expected probe");
        };
        assert_eq!(args.x, -1.5);
        assert_eq!(args.y, 12.0);
        assert_eq!(args.kind, CrossbridgeKind::FourSpring);
        assert_eq!(args.state, None);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["xbridge", "-q", "-v", "list"]);
        assert!(result.is_err());
    }
}
