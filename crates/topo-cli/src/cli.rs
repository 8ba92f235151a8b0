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
    about = "topoconflict - flags protein annotations that conflict with membrane topology (sequons, free cysteines, glycosylation sites and disulfide bonds outside every outside-membrane segment).",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every conflict detector over a protein table and write the merged conflict report.
    Check(CheckArgs),
    /// Write every protein with its parsed domains, free residues and conflicts.
    Annotate(AnnotateArgs),
    /// Parse a single topology string and print its outside/inside segments.
    Topology(TopologyArgs),
}

/// Options shared by every command that reads a protein table.
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Path to the input protein table (CSV with UniProt-style headers).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override how the right endpoint of a disulfide bond is tested.
    #[arg(long = "bond-check", value_name = "MODE", value_parser = ["as-observed", "both-endpoints"])]
    pub bond_check: Option<String>,

    /// Override the field delimiter of the input table.
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Abort on the first unusable row instead of skipping it.
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable the progress display.
    #[arg(long)]
    pub no_progress: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S analysis.fail-fast=true
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Path for the JSON conflict report. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `annotate` subcommand.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Path for the annotated JSON output. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Only include proteins with at least one conflict.
    #[arg(long)]
    pub conflicts_only: bool,
}

/// Arguments for the `topology` subcommand.
#[derive(Args, Debug)]
pub struct TopologyArgs {
    /// The topology string, e.g. 'i10-20o30-40i'.
    #[arg(required = true, value_name = "TOPOLOGY")]
    pub topology: String,

    /// Total residue count, used to close a segment opened by the final character.
    #[arg(short, long, required = true, value_name = "INT")]
    pub length: u32,

    /// Print the segments as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}
