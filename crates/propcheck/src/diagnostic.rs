//! Diagnostics produced by prop validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of mistake a diagnostic points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Supplied prop is a few edits away from a declared one
    Similarity,
    /// Supplied prop is not in the schema and not whitelisted
    UndeclaredProp,
}

impl DiagnosticKind {
    /// Short label used in structured logs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Similarity => "similarity",
            Self::UndeclaredProp => "undeclared_prop",
        }
    }
}

/// A single advisory finding about one supplied prop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic kind
    pub kind: DiagnosticKind,
    /// Display name of the component that received the prop
    pub component_name: String,
    /// The supplied prop name
    pub prop_name: String,
    /// Declared prop the caller probably meant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a similarity warning
    #[must_use]
    pub fn similarity(component: &str, prop: &str, suggestion: &str) -> Self {
        Self {
            kind: DiagnosticKind::Similarity,
            component_name: component.to_string(),
            prop_name: prop.to_string(),
            suggestion: Some(suggestion.to_string()),
        }
    }

    /// Create an undeclared-prop warning
    #[must_use]
    pub fn undeclared(component: &str, prop: &str) -> Self {
        Self {
            kind: DiagnosticKind::UndeclaredProp,
            component_name: component.to_string(),
            prop_name: prop.to_string(),
            suggestion: None,
        }
    }

    /// Human-readable message sent to the reporting channel
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let component = &self.component_name;
        let prop = &self.prop_name;
        match (self.kind, &self.suggestion) {
            (DiagnosticKind::Similarity, Some(suggestion)) => write!(
                f,
                "{component}: received prop \"{prop}\". Maybe you meant \"{suggestion}\"?"
            ),
            (DiagnosticKind::Similarity, None) => {
                write!(f, "{component}: received prop \"{prop}\".")
            }
            (DiagnosticKind::UndeclaredProp, _) => write!(
                f,
                "{component}: received prop \"{prop}\", but \"{prop}\" is not declared in the schema. \
                 Maybe you should add \"{prop}\" to the schema for {component}."
            ),
        }
    }
}
