use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The biface developers",
    version,
    about = "biface - check protein-complex structures, find interface residues between two chains and score their interaction energy.",
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
    /// Run structure checking and clean-up stages on a PDB/mmCIF file.
    Check(CheckArgs),
    /// List the residues of two chains that lie within a distance of each other.
    Interface(InterfaceArgs),
    /// Compute per-residue and total interaction energy across a chain interface.
    Energy(EnergyArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the input structure file (.pdb, .ent, .cif, .mmcif).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the cleaned structure to this path. The format follows the extension.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stage to run, in the given order. Can be used multiple times.
    /// Examples: models=first, chains=A,E, altloc=occupancy, ligands=all, water, getss=2.5
    #[arg(short = 's', long = "stage", value_name = "STAGE[=OPTION]")]
    pub stages: Vec<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S check.clash-cutoff=0.8
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Chain pair, cutoff and input shared by `interface` and `energy`.
#[derive(Args, Debug, Clone)]
pub struct ChainPairArgs {
    /// Path to the input structure file (.pdb, .ent, .cif, .mmcif).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Identifier of the first chain.
    #[arg(short = 'a', long = "chain-1", value_name = "ID")]
    pub chain_1: Option<String>,

    /// Identifier of the second chain.
    #[arg(short = 'b', long = "chain-2", value_name = "ID")]
    pub chain_2: Option<String>,

    /// Atom-atom distance cutoff in Angstroms (inclusive).
    #[arg(short, long, value_name = "FLOAT")]
    pub distance: Option<f64>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S interface.distance=5.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Comma-separated table, one row per residue.
    Csv,
}

/// Arguments for the `interface` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InterfaceArgs {
    #[command(flatten)]
    pub pair: ChainPairArgs,

    /// Write the report to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug, Clone)]
pub struct EnergyArgs {
    #[command(flatten)]
    pub pair: ChainPairArgs,

    /// Residue library with per-atom types and partial charges.
    #[arg(short = 'l', long, value_name = "PATH")]
    pub residue_library: Option<PathBuf>,

    /// Van der Waals parameter set, one atom type per line.
    #[arg(short = 'p', long, value_name = "PATH")]
    pub vdw_params: Option<PathBuf>,

    /// Dielectric model: 'mehler-solmajer' or a constant (e.g. '4' or 'constant=4').
    #[arg(short = 'e', long, value_name = "MODEL")]
    pub dielectric: Option<String>,

    /// Write the report to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
