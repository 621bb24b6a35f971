//! Propcheck CLI Library
//!
//! Command-line interface for replaying component scenarios through an
//! instrumented host and reporting prop diagnostics.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod scenario;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, DistanceArgs, FormatArg, WhitelistArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_diagnostic, render_report_json, render_summary, OutputFormat, Printer};
pub use scenario::{ComponentSpec, RenderSpec, Scenario, ScenarioReport};
