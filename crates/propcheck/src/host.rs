//! Minimal host component model.
//!
//! This is the surface the instrumentation talks to: component definitions
//! with an optional declared schema, a replaceable element-creation entry
//! point, and a mount/update cycle that drives stateful lifecycle hooks.
//! Rendering produces plain strings; nothing here knows about prop checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Props supplied at instantiation, in insertion order
pub type Props = Map<String, Value>;

/// Shared handle to a component definition. Identity is the allocation.
pub type ComponentRef = Arc<ComponentDef>;

/// Render function of a stateless component
pub type RenderFn = Arc<dyn Fn(&Props) -> String + Send + Sync>;

/// Result of a lifecycle hook
pub type HookResult = Result<(), HookError>;

/// A lifecycle hook reported a failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component}: lifecycle hook failed: {message}")]
pub struct HookError {
    /// Component whose hook failed
    pub component: String,
    /// Error message
    pub message: String,
}

impl HookError {
    /// Create a hook error
    #[must_use]
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Declared type of a prop. Only the key matters for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    /// Any value
    #[default]
    Any,
    /// Boolean
    Bool,
    /// Number
    Number,
    /// String
    String,
    /// Callback
    Func,
    /// Renderable child
    Node,
    /// Object
    Object,
    /// Array
    Array,
}

/// Declared props of a component, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Schema {
    entries: Vec<(String, PropType)>,
}

impl Schema {
    /// Empty schema
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a prop, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, prop_type: PropType) -> Self {
        self.declare(name, prop_type);
        self
    }

    /// Declare a prop. Redeclaring replaces the type and keeps the position.
    pub fn declare(&mut self, name: impl Into<String>, prop_type: PropType) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = prop_type,
            None => self.entries.push((name, prop_type)),
        }
    }

    /// Whether `name` is declared verbatim
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Declared type of `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PropType> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, prop_type)| *prop_type)
    }

    /// Declared names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of declared props
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PropType)> for Schema {
    fn from_iter<T: IntoIterator<Item = (S, PropType)>>(iter: T) -> Self {
        let mut schema = Self::new();
        for (name, prop_type) in iter {
            schema.declare(name, prop_type);
        }
        schema
    }
}

impl TryFrom<Map<String, Value>> for Schema {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(name, value)| {
                let prop_type = match value {
                    Value::Null => PropType::Any,
                    other => serde_json::from_value(other)
                        .map_err(|e| format!("prop \"{name}\": {e}"))?,
                };
                Ok((name, prop_type))
            })
            .collect()
    }
}

/// Post-mount and post-update hooks of a stateful component
pub trait Lifecycle: Send + Sync {
    /// Produce output for the given props
    fn render(&self, props: &Props) -> String;

    /// Called once after the first render
    fn did_mount(&self, _props: &Props) -> HookResult {
        Ok(())
    }

    /// Called after every re-render with new props
    fn did_update(&self, _props: &Props, _prev_props: &Props) -> HookResult {
        Ok(())
    }
}

/// How a component renders
#[derive(Clone)]
pub enum Behavior {
    /// Plain function of props
    Stateless(RenderFn),
    /// Object with lifecycle hooks
    Stateful(Arc<dyn Lifecycle>),
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stateless(_) => f.write_str("Stateless"),
            Self::Stateful(_) => f.write_str("Stateful"),
        }
    }
}

/// Shape tag of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Function-style component
    Stateless,
    /// Component with lifecycle hooks
    Stateful,
}

/// A component definition
#[derive(Clone)]
pub struct ComponentDef {
    name: String,
    display_name: Option<String>,
    schema: Option<Schema>,
    behavior: Behavior,
}

impl ComponentDef {
    /// Define a stateless component
    pub fn stateless<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Props) -> String + Send + Sync + 'static,
    {
        Self::with_behavior(name, Behavior::Stateless(Arc::new(render)))
    }

    /// Define a stateful component
    pub fn stateful<L>(name: impl Into<String>, lifecycle: L) -> Self
    where
        L: Lifecycle + 'static,
    {
        Self::with_behavior(name, Behavior::Stateful(Arc::new(lifecycle)))
    }

    /// Define a component from an existing behavior
    #[must_use]
    pub fn with_behavior(name: impl Into<String>, behavior: Behavior) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            schema: None,
            behavior,
        }
    }

    /// Swap the rendering behavior, keeping name and schema
    #[must_use]
    pub fn replace_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set an explicit display name
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Attach a declared schema
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Replace or remove the declared schema
    #[must_use]
    pub fn with_optional_schema(mut self, schema: Option<Schema>) -> Self {
        self.schema = schema;
        self
    }

    /// Freeze into a shared handle
    #[must_use]
    pub fn into_ref(self) -> ComponentRef {
        Arc::new(self)
    }

    /// Display name, then definition name, then `"Component"`
    #[must_use]
    pub fn display_name(&self) -> &str {
        match (&self.display_name, self.name.as_str()) {
            (Some(display_name), _) if !display_name.is_empty() => display_name,
            (_, "") => "Component",
            (_, name) => name,
        }
    }

    /// Definition name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared schema, if any
    #[must_use]
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Rendering behavior
    #[must_use]
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Shape tag
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self.behavior {
            Behavior::Stateless(_) => ComponentKind::Stateless,
            Behavior::Stateful(_) => ComponentKind::Stateful,
        }
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDef")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("schema", &self.schema)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Identity of a component definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Identity of the allocation behind `component`
    #[must_use]
    pub fn of(component: &ComponentRef) -> Self {
        Self(Arc::as_ptr(component).cast::<()>() as usize)
    }
}

/// Output of the creation entry point
#[derive(Debug, Clone)]
pub struct Element {
    component: ComponentRef,
    props: Props,
}

impl Element {
    /// Build an element directly, bypassing any entry point
    #[must_use]
    pub fn new(component: ComponentRef, props: Props) -> Self {
        Self { component, props }
    }

    /// Component that will render this element
    #[must_use]
    pub fn component(&self) -> &ComponentRef {
        &self.component
    }

    /// Props of this element
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Render for the first time, running the post-mount hook
    pub fn mount(self) -> Result<Mounted, HookError> {
        let output = match self.component.behavior() {
            Behavior::Stateless(render) => render(&self.props),
            Behavior::Stateful(lifecycle) => {
                let output = lifecycle.render(&self.props);
                lifecycle.did_mount(&self.props)?;
                output
            }
        };
        Ok(Mounted {
            element: self,
            output,
        })
    }
}

/// A mounted element
#[derive(Debug)]
pub struct Mounted {
    element: Element,
    output: String,
}

impl Mounted {
    /// Last rendered output
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Current props
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.element.props
    }

    /// Component rendering this element
    #[must_use]
    pub fn component(&self) -> &ComponentRef {
        &self.element.component
    }

    /// Re-render with new props, running the post-update hook
    pub fn set_props(&mut self, props: Props) -> HookResult {
        let prev = std::mem::replace(&mut self.element.props, props);
        let props = &self.element.props;
        self.output = match self.element.component.behavior() {
            Behavior::Stateless(render) => render(props),
            Behavior::Stateful(lifecycle) => {
                let output = lifecycle.render(props);
                lifecycle.did_update(props, &prev)?;
                output
            }
        };
        Ok(())
    }
}

/// Creation entry point: turns a component and props into an element
pub trait ElementFactory: Send + Sync {
    /// Create an element
    fn create_element(&self, component: &ComponentRef, props: Props) -> Element;
}

/// The host's own entry point
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectFactory;

impl ElementFactory for DirectFactory {
    fn create_element(&self, component: &ComponentRef, props: Props) -> Element {
        Element::new(Arc::clone(component), props)
    }
}

/// Host context owning the replaceable creation entry point
pub struct Host {
    entry: RwLock<Arc<dyn ElementFactory>>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}

impl Host {
    /// Host using [`DirectFactory`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(Arc::new(DirectFactory))
    }

    /// Host with a custom entry point
    #[must_use]
    pub fn with_factory(factory: Arc<dyn ElementFactory>) -> Self {
        Self {
            entry: RwLock::new(factory),
        }
    }

    /// Current entry point
    #[must_use]
    pub fn entry_point(&self) -> Arc<dyn ElementFactory> {
        Arc::clone(&self.entry.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap the entry point, returning the previous one
    pub fn replace_entry_point(&self, factory: Arc<dyn ElementFactory>) -> Arc<dyn ElementFactory> {
        let mut entry = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *entry, factory)
    }

    /// Create an element through the current entry point
    pub fn create_element(&self, component: &ComponentRef, props: Props) -> Element {
        let entry = self.entry_point();
        entry.create_element(component, props)
    }

    /// Create and mount in one step
    pub fn render(&self, component: &ComponentRef, props: Props) -> Result<Mounted, HookError> {
        self.create_element(component, props).mount()
    }
}

/// Build [`Props`] from `(name, value)` pairs, keeping their order
pub fn props<K, I>(pairs: I) -> Props
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
