//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use propcheck::{Config, PatternSpec, WhitelistCategory};
use std::path::PathBuf;

/// Propcheck: find mistyped and undeclared props in component scenarios
#[derive(Parser, Debug)]
#[command(name = "propcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scenario file and report prop diagnostics
    Check(CheckArgs),

    /// List built-in whitelist patterns
    Whitelist(WhitelistArgs),

    /// Print the edit distance between two names
    Distance(DistanceArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Scenario file (.yaml, .yml or .json)
    pub scenario: PathBuf,

    /// Configuration file, replacing the scenario's own `config` section
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,

    /// Exit with an error when any diagnostic is reported
    #[arg(long)]
    pub deny_warnings: bool,

    /// Largest edit distance reported as a typo
    #[arg(long, env = "PROPCHECK_MAX_DISTANCE")]
    pub max_distance: Option<usize>,

    /// Do not report props missing from the schema
    #[arg(long)]
    pub no_warn_undeclared: bool,

    /// Component names to instrument (`/regex/` or literal), repeatable
    #[arg(long)]
    pub include: Vec<String>,

    /// Component names to skip (`/regex/` or literal), repeatable
    #[arg(long)]
    pub exclude: Vec<String>,
}

impl CheckArgs {
    /// Apply command-line overrides on top of a file configuration
    #[must_use]
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(max_distance) = self.max_distance {
            config = config.with_max_distance(max_distance);
        }
        if self.no_warn_undeclared {
            config = config.with_warn_undeclared(false);
        }
        if !self.include.is_empty() {
            config = config.with_include(parse_patterns(&self.include));
        }
        if !self.exclude.is_empty() {
            config = config.with_exclude(parse_patterns(&self.exclude));
        }
        config
    }
}

fn parse_patterns(raw: &[String]) -> Vec<PatternSpec> {
    raw.iter().map(|text| PatternSpec::parse(text)).collect()
}

/// Arguments for the whitelist command
#[derive(Parser, Debug)]
pub struct WhitelistArgs {
    /// Only list this category (e.g. `aria-attributes`)
    #[arg(short, long)]
    pub category: Option<WhitelistCategory>,
}

/// Arguments for the distance command
#[derive(Parser, Debug)]
pub struct DistanceArgs {
    /// First name
    pub a: String,

    /// Second name
    pub b: String,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
