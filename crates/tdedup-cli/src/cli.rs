//! CLI argument definitions for temporal-dedup.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "temporal-dedup",
    version,
    about = "Detect duplicate records in temporal datasets",
    long_about = "Detect duplicate and erroneous records in tab-delimited datasets whose\n\
                  records carry repeating timestamped attribute groups.\n\n\
                  The schema (key, logical attributes, record type) is inferred from the\n\
                  header row; predictions are scored against a truth file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run duplicate detection on a dataset and score it against truth data.
    Run(RunArgs),

    /// Print the schema inferred from a dataset.
    Infer(InferArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Tab-delimited dataset; the first line is the header row.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Tab-delimited truth file listing duplicate record ids.
    #[arg(long = "truth", value_name = "FILE")]
    pub truth: PathBuf,

    /// Also run the ASNM comparison, blocking on the named attribute.
    ///
    /// Words are joined with a space; without a name the whole dataset is
    /// one block.
    #[arg(long = "compare", value_name = "KEY", num_args = 0..)]
    pub compare: Option<Vec<String>>,

    /// ASNM similarity thresholds (default: 0.8 0.9 0.95 0.927 0.963 0.981 1.0).
    #[arg(long = "threshold", value_name = "X", num_args = 1..)]
    pub thresholds: Vec<f64>,

    /// Number of event sequences sampled per record type.
    #[arg(long = "lcs-samples", value_name = "N", conflicts_with = "lcs_max")]
    pub lcs_samples: Option<usize>,

    /// Sample every eligible event sequence (the default).
    #[arg(long = "lcs-max")]
    pub lcs_max: bool,

    /// Select samples at random.
    #[arg(long = "lcs-random", conflicts_with = "lcs_every")]
    pub lcs_random: bool,

    /// Select every N-th submitted sequence.
    #[arg(long = "lcs-every", value_name = "N")]
    pub lcs_every: Option<usize>,

    /// Seed for random sample selection.
    #[arg(long = "lcs-seed", value_name = "SEED", requires = "lcs_random")]
    pub lcs_seed: Option<u64>,

    /// Minimum unconstrained sequence length for an order match (default: 8).
    #[arg(long = "min-seq-length", value_name = "N")]
    pub min_seq_length: Option<usize>,

    /// Apply elapsed-time matching at every timestamp granularity.
    #[arg(long = "force-elapsed-time")]
    pub force_elapsed_time: bool,

    /// JSON options file; explicit flags override its values.
    #[arg(long = "options", value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Write the dataset back out, with and without a row-id column.
    #[arg(long = "raw-output")]
    pub raw_output: bool,

    /// Write the analysis file.
    #[arg(long = "analysis")]
    pub analysis: bool,

    /// Query record differences interactively after the run.
    #[arg(long = "query")]
    pub query: bool,
}

#[derive(Args)]
pub struct InferArgs {
    /// Tab-delimited dataset; the first line is the header row.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
