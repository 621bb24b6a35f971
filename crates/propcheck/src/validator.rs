//! Prop validation: typo detection and undeclared-prop detection.

use crate::config::NormalizedConfig;
use crate::diagnostic::Diagnostic;
use crate::host::{ComponentDef, Props, Schema};
use crate::reporter::Reporter;
use crate::similarity;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Check supplied props against a declared schema.
///
/// Diagnostics come out in supplied-prop order, and for each prop, typo
/// suggestions in schema order followed by the undeclared warning. Every
/// declared key within `max_distance` is suggested, not only the closest.
/// A missing or empty schema produces nothing.
pub fn validate_props(
    component_name: &str,
    schema: Option<&Schema>,
    props: &Props,
    config: &NormalizedConfig,
) -> Vec<Diagnostic> {
    let Some(schema) = schema.filter(|schema| !schema.is_empty()) else {
        return Vec::new();
    };

    let mut diagnostics = Vec::new();
    for prop in props.keys() {
        if schema.contains(prop) {
            continue;
        }

        for key in schema.keys() {
            if similarity::within(prop, key, config.max_distance) {
                diagnostics.push(Diagnostic::similarity(component_name, prop, key));
            }
        }

        if config.warn_undeclared && !config.whitelist.matches(prop) {
            diagnostics.push(Diagnostic::undeclared(component_name, prop));
        }
    }
    diagnostics
}

/// Validator bound to one installation's configuration and reporter
pub struct PropValidator {
    config: Arc<NormalizedConfig>,
    reporter: Arc<dyn Reporter>,
}

impl fmt::Debug for PropValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PropValidator {
    /// Create a validator
    #[must_use]
    pub fn new(config: Arc<NormalizedConfig>, reporter: Arc<dyn Reporter>) -> Self {
        Self { config, reporter }
    }

    /// Configuration in effect
    #[must_use]
    pub fn config(&self) -> &NormalizedConfig {
        &self.config
    }

    /// Diagnostics for one instantiation, without reporting them
    #[must_use]
    pub fn validate(&self, component: &ComponentDef, props: &Props) -> Vec<Diagnostic> {
        validate_props(
            component.display_name(),
            component.schema(),
            props,
            &self.config,
        )
    }

    /// Validate and report. Returns how many diagnostics were emitted.
    ///
    /// Never panics: a panic inside validation or the reporter is logged and
    /// swallowed so the instrumented call always goes ahead.
    pub fn check(&self, component: &ComponentDef, props: &Props) -> usize {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let diagnostics = self.validate(component, props);
            for diagnostic in &diagnostics {
                self.reporter.report(diagnostic);
            }
            diagnostics.len()
        }));

        match outcome {
            Ok(count) => count,
            Err(_) => {
                tracing::error!(
                    component = component.display_name(),
                    "prop validation panicked; diagnostics for this call were dropped"
                );
                0
            }
        }
    }
}
