//! CLI argument definitions for the fault mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "faultmap",
    version,
    about = "Fault mapper - fuzzy record linkage and causality classification",
    long_about = "Link free-text fault records to reference causality data.\n\n\
                  Scores row pairs with several fuzzy string metrics, applies\n\
                  alias normalization, and classifies text against a two-level\n\
                  taxonomy tree."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Fuzzy-match source rows against a relation CSV.
    Match(MatchArgs),

    /// Classify free-text rows against a two-level taxonomy tree.
    Classify(ClassifyArgs),

    /// Emit an alias skeleton from a causality tree CSV.
    BuildAlias(BuildAliasArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Source CSV holding the rows to find matches for.
    #[arg(long = "source", value_name = "CSV")]
    pub source: PathBuf,

    /// Relation CSV holding the candidate rows.
    #[arg(long = "relation", value_name = "CSV")]
    pub relation: PathBuf,

    /// Minimum similarity score a candidate must reach.
    #[arg(
        long = "score",
        value_name = "0-100",
        default_value_t = 60,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub score: u8,

    /// Run configuration file.
    #[arg(long = "config", value_name = "JSON", default_value = "config.json")]
    pub config: PathBuf,

    /// Write results to a CSV file instead of the console.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// CSV file with the rows to classify.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Taxonomy tree artifact (JSON or YAML).
    #[arg(long = "tree", value_name = "FILE", default_value = "tree.json")]
    pub tree: PathBuf,

    /// Alias table applied to the text before classification.
    #[arg(long = "alias", value_name = "FILE")]
    pub alias: Option<PathBuf>,

    /// Minimum score a taxonomy level must reach.
    #[arg(
        long = "score",
        value_name = "0-100",
        default_value_t = 50,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub score: u8,

    /// Column holding the text to classify.
    #[arg(long = "column", value_name = "NAME", default_value = "Text")]
    pub column: String,

    /// Row filter expression, e.g. "Area=Line1,Line2+Shift=Day".
    #[arg(long = "filter", value_name = "EXPR")]
    pub filter: Option<String>,

    /// Print the selected, normalized input text without classifying.
    #[arg(long = "test")]
    pub test: bool,

    /// Write results to a CSV file instead of the console.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct BuildAliasArgs {
    /// Causality tree CSV with model, C1Name, and C2Name columns.
    #[arg(value_name = "CSV")]
    pub tree: PathBuf,

    /// Restrict to rows of one model.
    #[arg(long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Restrict to rows of one level-1 category.
    #[arg(long = "c1name", value_name = "NAME")]
    pub c1name: Option<String>,

    /// Write the skeleton to a YAML file instead of stdout.
    #[arg(long = "output", value_name = "YAML")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it already exists.
    #[arg(long = "force")]
    pub force: bool,
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
