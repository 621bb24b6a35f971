//! Check command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Printer;
use crate::scenario::Scenario;
use crate::CheckArgs;
use propcheck::Config;

/// Execute the check command
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let validation = resolve_config(&scenario, args)?;

    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    if config.verbosity.is_verbose() {
        printer.info(&format!(
            "Replaying {} render(s) from {}",
            scenario.renders.len(),
            args.scenario.display()
        ));
    }

    let report = scenario.replay(&validation)?;
    printer.report(&report, args.format.into())?;

    if args.deny_warnings && !report.is_clean() {
        return Err(CliError::WarningsDenied {
            count: report.diagnostics.len(),
        });
    }
    Ok(())
}

/// Validation config for a run: `--config` file, else the scenario's own
/// section, else defaults, then command-line overrides on top
pub fn resolve_config(scenario: &Scenario, args: &CheckArgs) -> CliResult<Config> {
    let base = match &args.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration file");
            Config::load(path)?
        }
        None => scenario.config.clone().unwrap_or_default(),
    };
    Ok(args.apply_overrides(base))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::FormatArg;
    use std::io::Write;
    use std::path::PathBuf;

    fn args(config: Option<PathBuf>) -> CheckArgs {
        CheckArgs {
            scenario: PathBuf::from("unused.yaml"),
            config,
            format: FormatArg::Text,
            deny_warnings: false,
            max_distance: None,
            no_warn_undeclared: false,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    fn scenario_with_config() -> Scenario {
        Scenario::from_yaml_str("config:\n  maxDistance: 3\ncomponents: []\n").unwrap()
    }

    #[test]
    fn test_scenario_config_used_by_default() {
        let config = resolve_config(&scenario_with_config(), &args(None)).unwrap();
        assert_eq!(config.max_distance, 3);
    }

    #[test]
    fn test_defaults_without_any_config() {
        let scenario = Scenario::from_yaml_str("components: []\n").unwrap();
        let config = resolve_config(&scenario, &args(None)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_file_replaces_scenario_section() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "warnUndeclared: false").unwrap();

        let config = resolve_config(
            &scenario_with_config(),
            &args(Some(file.path().to_path_buf())),
        )
        .unwrap();
        assert_eq!(config.max_distance, 2);
        assert!(!config.warn_undeclared);
    }

    #[test]
    fn test_missing_config_file_is_library_error() {
        let err = resolve_config(
            &scenario_with_config(),
            &args(Some(PathBuf::from("/nonexistent/propcheck.yaml"))),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Propcheck(propcheck::PropcheckError::Io(_))
        ));
    }

    #[test]
    fn test_unsupported_config_extension_is_library_error() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = resolve_config(&scenario_with_config(), &args(Some(file.path().to_path_buf())))
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Propcheck(propcheck::PropcheckError::UnsupportedFormat { .. })
        ));
        assert!(err.to_string().contains("toml"));
    }

    #[test]
    fn test_flags_override_scenario() {
        let mut check = args(None);
        check.max_distance = Some(1);
        let config = resolve_config(&scenario_with_config(), &check).unwrap();
        assert_eq!(config.max_distance, 1);
    }
}
