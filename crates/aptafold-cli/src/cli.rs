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
    version,
    about = "aptafold - Batch RNA secondary-structure prediction and loop analysis for aptamer libraries.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output; errors are still reported on exit
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of folding processes run concurrently.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict minimum-free-energy structures for every sequence in a FASTA file.
    Fold(FoldArgs),
    /// Append loop counts to a table that already has a dot-bracket structure column.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `fold` subcommand.
#[derive(Args, Debug)]
pub struct FoldArgs {
    // --- Core Arguments ---
    /// Path to the input FASTA file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Folding Overrides ---
    /// Name or path of the RNAfold executable.
    #[arg(long = "rnafold", value_name = "NAME_OR_PATH")]
    pub rnafold: Option<String>,

    /// Folding temperature in degrees Celsius, passed through to RNAfold.
    #[arg(short = 'T', long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Energy parameter file passed through to RNAfold.
    #[arg(long, value_name = "PATH")]
    pub param_file: Option<PathBuf>,

    /// Per-sequence wall-clock limit for RNAfold, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    // --- Output Overrides ---
    /// Also compute loop counts and append them to the output table.
    #[arg(long)]
    pub analyze: bool,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S folding.timeout-secs=30
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the input CSV table with a structure column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Header of the dot-bracket structure column to analyze.
    #[arg(long, value_name = "NAME")]
    pub structure_column: Option<String>,

    /// Header of the appended loop count column.
    #[arg(long, value_name = "NAME")]
    pub loop_count_column: Option<String>,

    /// Header of the appended column counting nucleotides in loops.
    #[arg(long, value_name = "NAME")]
    pub loop_nucleotides_column: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S columns.structure="Secondary Structure"
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Column-name overrides for the `fold` output table.
#[derive(Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    /// Header of the identifier column.
    #[arg(long, value_name = "NAME")]
    pub id_column: Option<String>,

    /// Header of the sequence column.
    #[arg(long, value_name = "NAME")]
    pub sequence_column: Option<String>,

    /// Header of the dot-bracket structure column.
    #[arg(long, value_name = "NAME")]
    pub structure_column: Option<String>,

    /// Header of the minimum free energy column.
    #[arg(long, value_name = "NAME")]
    pub energy_column: Option<String>,

    /// Header of the loop count column.
    #[arg(long, value_name = "NAME")]
    pub loop_count_column: Option<String>,

    /// Header of the column counting nucleotides in loops.
    #[arg(long, value_name = "NAME")]
    pub loop_nucleotides_column: Option<String>,
}
