//! Propcheck: development-time prop diagnostics for component trees
//!
//! Propcheck watches components as they are instantiated and warns about
//! props that look like typos of a declared prop, or that are missing from
//! the component's declared schema altogether.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PROPCHECK Architecture                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Config     │    │ Controller │    │ Host entry │            │
//! │   │ + Patterns │───►│ (intercept │───►│ point      │            │
//! │   │ + Whitelist│    │  + wrap)   │    │            │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │ every instantiation                  │
//! │                     ┌─────▼──────┐    ┌────────────┐            │
//! │                     │ Validator  │───►│ Reporter   │            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use propcheck::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let host = Arc::new(Host::new());
//! let controller = Controller::new(Arc::clone(&host));
//! let reporter = MemoryReporter::new();
//! controller.install_with_reporter(&Config::default(), Arc::new(reporter.clone()));
//!
//! let toggle = ComponentDef::stateless("Toggle", |_| "<input/>".to_string())
//!     .with_schema(Schema::new().with("checked", PropType::Bool))
//!     .into_ref();
//!
//! host.render(&toggle, props([("chekced", json!(true))])).unwrap();
//! assert_eq!(
//!     reporter.messages()[0],
//!     "Toggle: received prop \"chekced\". Maybe you meant \"checked\"?"
//! );
//! ```

#![warn(missing_docs)]

mod config;
mod diagnostic;
mod eligibility;
mod instrument;
mod pattern;
mod reporter;
mod result;
mod similarity;
mod validator;
mod whitelist;

/// Host component model: definitions, schemas, the creation entry point
pub mod host;

pub use config::{Config, NormalizedConfig, WhitelistEntry};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use eligibility::should_instrument;
pub use host::{
    props, Behavior, ComponentDef, ComponentId, ComponentKind, ComponentRef, DirectFactory,
    Element, ElementFactory, HookError, HookResult, Host, Lifecycle, Mounted, PropType, Props,
    Schema,
};
pub use instrument::{Controller, Installation, WRAPPER_PREFIX};
pub use pattern::{NamePattern, PatternList, PatternSet, PatternSpec};
pub use reporter::{FnReporter, MemoryReporter, Reporter, StderrReporter, TracingReporter};
pub use result::{PropcheckError, PropcheckResult};
pub use similarity::{distance, within};
pub use validator::{validate_props, PropValidator};
pub use whitelist::{Whitelist, WhitelistCategory};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        distance, props, ComponentDef, ComponentRef, Config, Controller, Diagnostic,
        DiagnosticKind, HookError, HookResult, Host, Lifecycle, MemoryReporter, PatternSpec,
        PropType, Props, Reporter, Schema, WhitelistCategory, WhitelistEntry,
    };
}
