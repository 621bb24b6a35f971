//! Distance command handler

use crate::config::CliConfig;
use crate::output::Printer;
use crate::DistanceArgs;
use propcheck::{distance, Config};

/// Execute the distance command
pub fn execute_distance(config: &CliConfig, args: &DistanceArgs) {
    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    printer.line(&distance(&args.a, &args.b).to_string());
    if config.verbosity.is_verbose() {
        printer.info(&describe_distance(&args.a, &args.b, Config::default().max_distance));
    }
}

/// Whether two names would be flagged as a likely typo
#[must_use]
pub fn describe_distance(a: &str, b: &str, max_distance: usize) -> String {
    let d = distance(a, b);
    if a == b {
        format!("\"{a}\" and \"{b}\" are identical")
    } else if d <= max_distance {
        format!("\"{a}\" would be suggested for \"{b}\" (distance {d} <= {max_distance})")
    } else {
        format!("\"{a}\" is too far from \"{b}\" to be suggested (distance {d} > {max_distance})")
    }
}
