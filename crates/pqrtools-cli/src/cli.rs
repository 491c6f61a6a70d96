use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "pqrtools - Zero charges, list and extract residues, and transplant per-atom charge models between PQR files.",
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

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.model-tag=model
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a copy of a PQR file with every ATOM charge set to zero.
    ZeroCharges(ZeroChargesArgs),
    /// List the residues of a PQR file, extract residues, or transplant a charge model onto them.
    Residues(ResiduesArgs),
}

/// Arguments for the `zero-charges` subcommand.
#[derive(Args, Debug)]
pub struct ZeroChargesArgs {
    /// Path to the input PQR file.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the zeroed output file.
    #[arg(required = true, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Also zero and keep HETATM records instead of dropping them.
    #[arg(long)]
    pub keep_hetatm: bool,

    /// Copy non-record lines (REMARK, TER, END, ...) into the output.
    #[arg(long)]
    pub keep_other_lines: bool,
}

/// Arguments for the `residues` subcommand.
///
/// Without residue numbers the residue index is listed. With residue numbers
/// each residue is extracted into its own file, or, when `--model` is given,
/// the model's charges are transplanted onto those residues.
#[derive(Args, Debug)]
pub struct ResiduesArgs {
    /// Path to the input (target) PQR file.
    #[arg(required = true, value_name = "INPUT")]
    pub input: PathBuf,

    /// Residue numbers to extract or transplant.
    #[arg(value_name = "RESIDUE", allow_negative_numbers = true)]
    pub residues: Vec<isize>,

    /// PQR file providing the charge model for the selected residues.
    #[arg(short, long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Directory for the generated files. Defaults to the input file's directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// With --model, skip the per-residue files and write only the whole transplanted file.
    #[arg(long)]
    pub no_residue_files: bool,
}
