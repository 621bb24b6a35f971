//! Which components get instrumented.

use crate::config::NormalizedConfig;

/// `true` iff `display_name` matches an include pattern and no exclude
/// pattern. Exclude always wins.
pub fn should_instrument(display_name: &str, config: &NormalizedConfig) -> bool {
    config.include.matches(display_name) && !config.exclude.matches(display_name)
}
