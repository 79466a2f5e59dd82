use clap::{Args, Parser, Subcommand, ValueEnum};
use ifacepp::engine::alignment::RmsdMode;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "IFACE++ CLI - Characterize protein-protein interfaces and compare docking poses against a reference complex.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report the contacts, residue composition and buried surface area of an interface.
    Analyze(AnalyzeArgs),
    /// Score poses against a reference interface by fraction of common contacts and interface RMSD.
    Compare(CompareArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the input structure in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Analyze only the model with this serial number. All models are analyzed by default.
    #[arg(short, long, value_name = "SERIAL")]
    pub model: Option<usize>,

    /// Write the reports to this TOML file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub sasa: SasaArgs,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Path to the reference complex in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub reference: PathBuf,

    /// Model of the reference file to use.
    #[arg(long, value_name = "SERIAL", default_value_t = 1)]
    pub reference_model: usize,

    /// Pose files in PDB format. Every model in a file is compared as its own pose.
    #[arg(required = true, value_name = "POSE")]
    pub poses: Vec<PathBuf>,

    /// Write one CSV row per pose to this file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub rmsd: RmsdArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chains that form the interface, e.g. 'A,B'. Defaults to every chain in the structure.
    #[arg(long, value_name = "IDS")]
    pub chains: Option<String>,

    /// Override the inter-atomic contact cutoff in angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sasa.probe-radius=1.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Surface area overrides for `analyze`.
#[derive(Args, Debug, Default)]
pub struct SasaArgs {
    /// Override the solvent probe radius in angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub probe_radius: Option<f64>,

    /// Override the number of test points per atom sphere.
    #[arg(long, value_name = "INT")]
    pub sphere_points: Option<usize>,

    /// TOML file with per-element van der Waals radii overriding the built-in table.
    #[arg(long, value_name = "PATH")]
    pub radii: Option<PathBuf>,

    /// Read per-atom surface areas from this CSV file instead of computing them.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["probe_radius", "sphere_points", "radii"])]
    pub precomputed_sasa: Option<PathBuf>,

    /// Abort a surface area calculation that runs longer than this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub sasa_timeout: Option<f64>,
}

/// Superposition overrides for `compare`.
#[derive(Args, Debug, Default)]
pub struct RmsdArgs {
    /// Atoms used for the interface RMSD.
    #[arg(long, value_enum, value_name = "MODE")]
    pub rmsd_mode: Option<RmsdModeArg>,

    /// Pair residues by position even when the interface sequences differ.
    #[arg(long)]
    pub skip_sequence_check: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmsdModeArg {
    CAlpha,
    Backbone,
    AllAtom,
}

impl From<RmsdModeArg> for RmsdMode {
    fn from(arg: RmsdModeArg) -> Self {
        match arg {
            RmsdModeArg::CAlpha => RmsdMode::CAlpha,
            RmsdModeArg::Backbone => RmsdMode::Backbone,
            RmsdModeArg::AllAtom => RmsdMode::AllAtom,
        }
    }
}
