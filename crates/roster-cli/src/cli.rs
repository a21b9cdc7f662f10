//! CLI argument definitions for `roster`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_model::EntityKind;
use roster_rules::AnalysisKind;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Validate and reshape client, worker and task sheets",
    long_about = "Validate client, worker and task sheets against each other.\n\n\
                  Filters and rules can be written as Rhai code or generated\n\
                  from a plain-language description. The generator can also\n\
                  analyze the sheets and suggest task allocations."
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

    /// Log output format.
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

    /// TOML settings file with [generator] and [thresholds] tables.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the three sheets and their relationships.
    Validate(ValidateArgs),

    /// Filter one sheet with an expression or a description.
    Filter(FilterArgs),

    /// Register a rule, apply it to all sheets and re-validate.
    Rule(RuleArgs),

    /// Ask the generator for a written analysis of the sheets.
    Analyze(AnalyzeArgs),

    /// Ask the generator for task-to-worker allocation suggestions.
    Allocate(AllocateArgs),

    /// Print the column registry.
    Schema,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder containing clients*.csv, workers*.csv and tasks*.csv.
    #[arg(value_name = "DIR", required_unless_present = "workbook")]
    pub folder: Option<PathBuf>,

    /// Read a workbook JSON document instead of a folder.
    #[arg(long = "workbook", value_name = "FILE", conflicts_with = "folder")]
    pub workbook: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
#[command(group(ArgGroup::new("source").required(true).args(["code", "describe"])))]
pub struct FilterArgs {
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,

    /// Sheet to filter.
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,

    /// Boolean expression over `row`, e.g. `row.PriorityLevel >= 4`.
    #[arg(long = "code", value_name = "EXPR")]
    pub code: Option<String>,

    /// Plain-language condition to generate the expression from.
    #[arg(long = "describe", value_name = "TEXT")]
    pub describe: Option<String>,

    /// Write matching rows to this CSV file instead of printing them.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
#[command(group(ArgGroup::new("source").required(true).args(["code", "describe"])))]
pub struct RuleArgs {
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,

    /// Unique rule name.
    #[arg(long = "name")]
    pub name: String,

    /// File containing the rule's Rhai code.
    #[arg(long = "code", value_name = "FILE")]
    pub code: Option<PathBuf>,

    /// Plain-language rule to generate code from.
    #[arg(long = "describe", value_name = "TEXT")]
    pub describe: Option<String>,

    /// Output directory for the transformed sheets (default: <DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,

    /// What the analysis should focus on.
    #[arg(long = "kind", value_enum, default_value = "general")]
    pub kind: AnalysisKindArg,
}

#[derive(Parser)]
pub struct AllocateArgs {
    #[arg(value_name = "DIR")]
    pub folder: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Clients,
    Workers,
    Tasks,
}

impl From<EntityArg> for EntityKind {
    fn from(value: EntityArg) -> Self {
        match value {
            EntityArg::Clients => EntityKind::Clients,
            EntityArg::Workers => EntityKind::Workers,
            EntityArg::Tasks => EntityKind::Tasks,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AnalysisKindArg {
    General,
    Capacity,
    Skills,
    Priority,
    Optimization,
}

impl From<AnalysisKindArg> for AnalysisKind {
    fn from(value: AnalysisKindArg) -> Self {
        match value {
            AnalysisKindArg::General => AnalysisKind::General,
            AnalysisKindArg::Capacity => AnalysisKind::Capacity,
            AnalysisKindArg::Skills => AnalysisKind::Skills,
            AnalysisKindArg::Priority => AnalysisKind::Priority,
            AnalysisKindArg::Optimization => AnalysisKind::Optimization,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
