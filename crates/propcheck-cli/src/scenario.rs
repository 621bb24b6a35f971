//! Scenario files: component definitions plus renders to replay.
//!
//! ```yaml
//! config:
//!   maxDistance: 2
//! components:
//!   - name: Toggle
//!     kind: stateless
//!     schema: { checked: bool, label: string }
//! renders:
//!   - component: Toggle
//!     props: { chekced: true }
//!     updates:
//!       - { checked: true, lable: "On" }
//! ```

use crate::error::{CliError, CliResult};
use propcheck::{
    ComponentDef, ComponentKind, ComponentRef, Config, Controller, Diagnostic, Host, Lifecycle,
    MemoryReporter, Props, Schema,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A component declared by a scenario
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Definition name, also used to refer to it from renders
    pub name: String,
    /// Optional display name used for eligibility and messages
    #[serde(default)]
    pub display_name: Option<String>,
    /// Shape of the component
    #[serde(default = "default_kind")]
    pub kind: ComponentKind,
    /// Declared props; absent means "no schema"
    #[serde(default)]
    pub schema: Option<Schema>,
}

const fn default_kind() -> ComponentKind {
    ComponentKind::Stateless
}

/// One instantiation, optionally followed by prop updates
#[derive(Debug, Clone, Deserialize)]
pub struct RenderSpec {
    /// Name of the component to render
    pub component: String,
    /// Initial props
    #[serde(default)]
    pub props: Props,
    /// Full prop sets applied one after another
    #[serde(default)]
    pub updates: Vec<Props>,
}

/// A replayable scenario
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Validation settings; defaults apply when absent
    #[serde(default)]
    pub config: Option<Config>,
    /// Component definitions
    pub components: Vec<ComponentSpec>,
    /// Renders in order
    #[serde(default)]
    pub renders: Vec<RenderSpec>,
}

impl Scenario {
    /// Parse a YAML scenario
    pub fn from_yaml_str(text: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Parse a JSON scenario
    pub fn from_json_str(text: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> CliResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = fs::read_to_string(path)?;

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(CliError::scenario(format!(
                "unsupported scenario format \"{extension}\" for {}",
                path.display()
            ))),
        }
    }

    /// Build every component, rejecting duplicate names
    fn build_components(&self) -> CliResult<HashMap<&str, ComponentRef>> {
        let mut components = HashMap::new();
        for spec in &self.components {
            let component = spec.build();
            if components.insert(spec.name.as_str(), component).is_some() {
                return Err(CliError::scenario(format!(
                    "component \"{}\" is defined twice",
                    spec.name
                )));
            }
        }
        Ok(components)
    }

    /// Replay every render through an instrumented host
    pub fn replay(&self, config: &Config) -> CliResult<ScenarioReport> {
        let components = self.build_components()?;

        let host = Arc::new(Host::new());
        let controller = Controller::new(Arc::clone(&host));
        let reporter = MemoryReporter::new();
        controller.install_with_reporter(config, Arc::new(reporter.clone()));

        let mut report = ScenarioReport::default();
        for render in &self.renders {
            let component = components.get(render.component.as_str()).ok_or_else(|| {
                CliError::scenario(format!("unknown component \"{}\"", render.component))
            })?;

            tracing::debug!(component = %render.component, updates = render.updates.len(), "replaying render");
            let mut mounted = host.render(component, render.props.clone())?;
            report.renders += 1;
            for update in &render.updates {
                mounted.set_props(update.clone())?;
                report.updates += 1;
            }
        }

        report.patched = controller.patched_count();
        report.diagnostics = reporter.diagnostics();
        controller.uninstall();
        Ok(report)
    }
}

impl ComponentSpec {
    fn build(&self) -> ComponentRef {
        let tag = self.name.clone();
        let def = match self.kind {
            ComponentKind::Stateless => {
                ComponentDef::stateless(&self.name, move |props| markup(&tag, props))
            }
            ComponentKind::Stateful => ComponentDef::stateful(&self.name, Replayed { tag }),
        };
        let def = def.with_optional_schema(self.schema.clone());
        match &self.display_name {
            Some(display_name) => def.with_display_name(display_name).into_ref(),
            None => def.into_ref(),
        }
    }
}

/// Stateful stand-in with no hooks of its own
struct Replayed {
    tag: String,
}

impl Lifecycle for Replayed {
    fn render(&self, props: &Props) -> String {
        markup(&self.tag, props)
    }
}

fn markup(tag: &str, props: &Props) -> String {
    let attrs: String = props.keys().map(|key| format!(" {key}")).collect();
    format!("<{tag}{attrs} />")
}

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Instantiations performed
    pub renders: usize,
    /// Prop updates applied
    pub updates: usize,
    /// Component definitions that were instrumented
    pub patched: usize,
    /// Every diagnostic, in emission order
    pub diagnostics: Vec<Diagnostic>,
}

impl ScenarioReport {
    /// Whether nothing was reported
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
