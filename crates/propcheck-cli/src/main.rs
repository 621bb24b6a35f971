//! Propcheck CLI: replay component scenarios and report prop diagnostics
//!
//! ## Usage
//!
//! ```bash
//! propcheck check app.yaml                    # Report typos and undeclared props
//! propcheck check app.yaml --format json      # Machine-readable output
//! propcheck check app.yaml --deny-warnings    # Fail when anything is reported
//! propcheck whitelist --category aria-attributes
//! propcheck distance onClick onClik
//! ```

use clap::Parser;
use propcheck_cli::{handlers, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_logging(config.verbosity);

    match cli.command {
        Commands::Check(args) => handlers::execute_check(&config, &args),
        Commands::Whitelist(args) => {
            handlers::execute_whitelist(&config, &args);
            Ok(())
        }
        Commands::Distance(args) => {
            handlers::execute_distance(&config, &args);
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
