//! Instrumentation controller.
//!
//! [`Controller::install`] swaps the host's creation entry point for an
//! interceptor. On the first creation of an eligible component the
//! interceptor wraps it so every instantiation and update runs the
//! validator; the wrapper is remembered in a side table keyed by component
//! identity, so each definition is wrapped at most once.
//!
//! ```text
//!  create_element(C, props)
//!        │
//!        ▼
//!  ┌──────────────┐  patched?   ┌───────────────┐
//!  │ Interceptor  │────yes─────►│ cached wrapper│──┐
//!  └──────┬───────┘             └───────────────┘  │
//!         │ no                                     ▼
//!         ├── ineligible ──────────────► C ──► original entry point
//!         │                                        ▲
//!         └── eligible ─► wrap(C) ─► record ───────┘
//! ```

use crate::config::{Config, NormalizedConfig};
use crate::eligibility::should_instrument;
use crate::host::{
    Behavior, ComponentDef, ComponentId, ComponentRef, Element, ElementFactory, HookResult, Host,
    Lifecycle, Props, RenderFn,
};
use crate::reporter::{Reporter, TracingReporter};
use crate::validator::PropValidator;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Prefix given to stateless wrappers: `PropCheck(Button)`
pub const WRAPPER_PREFIX: &str = "PropCheck";

/// Wrapping strategy, chosen once per component from its behavior
enum Shape<'a> {
    Stateless(&'a RenderFn),
    Stateful(&'a Arc<dyn Lifecycle>),
}

impl<'a> Shape<'a> {
    fn classify(component: &'a ComponentDef) -> Self {
        match component.behavior() {
            Behavior::Stateless(render) => Self::Stateless(render),
            Behavior::Stateful(lifecycle) => Self::Stateful(lifecycle),
        }
    }

    fn wrap(self, component: &ComponentRef, validator: Arc<PropValidator>) -> ComponentRef {
        // Wrappers validate against a copy so the side table never keeps the
        // original allocation alive.
        let target = ComponentDef::clone(component);
        match self {
            Self::Stateless(render) => {
                let render = Arc::clone(render);
                let wrapped: RenderFn = Arc::new(move |props: &Props| {
                    validator.check(&target, props);
                    render(props)
                });
                ComponentDef::with_behavior(component.name(), Behavior::Stateless(wrapped))
                    .with_display_name(format!(
                        "{WRAPPER_PREFIX}({})",
                        component.display_name()
                    ))
                    .with_optional_schema(component.schema().cloned())
                    .into_ref()
            }
            Self::Stateful(lifecycle) => {
                let chained = ValidatedLifecycle {
                    inner: Arc::clone(lifecycle),
                    target,
                    validator,
                };
                ComponentDef::clone(component)
                    .replace_behavior(Behavior::Stateful(Arc::new(chained)))
                    .into_ref()
            }
        }
    }
}

/// Runs validation before the wrapped post-mount and post-update hooks
struct ValidatedLifecycle {
    inner: Arc<dyn Lifecycle>,
    target: ComponentDef,
    validator: Arc<PropValidator>,
}

impl Lifecycle for ValidatedLifecycle {
    fn render(&self, props: &Props) -> String {
        self.inner.render(props)
    }

    fn did_mount(&self, props: &Props) -> HookResult {
        self.validator.check(&self.target, props);
        self.inner.did_mount(props)
    }

    fn did_update(&self, props: &Props, prev_props: &Props) -> HookResult {
        self.validator.check(&self.target, props);
        self.inner.did_update(props, prev_props)
    }
}

struct PatchRecord {
    owner: Weak<ComponentDef>,
    // `None` for wrappers, which pass through unchanged.
    substitute: Option<ComponentRef>,
}

impl PatchRecord {
    fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }

    const fn is_wrapper(&self) -> bool {
        self.substitute.is_none()
    }
}

/// Side table of patched components. Holds no strong reference to a
/// patched definition; records are pruned once their owner is dropped.
#[derive(Default)]
struct PatchTable {
    records: Mutex<HashMap<ComponentId, PatchRecord>>,
}

impl PatchTable {
    fn resolve(&self, component: &ComponentRef, validator: &Arc<PropValidator>) -> ComponentRef {
        let id = ComponentId::of(component);
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(record) = records.get(&id) {
            if record.is_live() {
                tracing::trace!(component = component.display_name(), "already patched");
                return record
                    .substitute
                    .as_ref()
                    .map_or_else(|| Arc::clone(component), Arc::clone);
            }
            // Address reused by a new allocation.
            records.remove(&id);
        }

        let display_name = component.display_name();
        if !should_instrument(display_name, validator.config()) {
            tracing::trace!(component = display_name, "not eligible, passing through");
            return Arc::clone(component);
        }

        let wrapped = Shape::classify(component).wrap(component, Arc::clone(validator));
        tracing::debug!(
            component = display_name,
            kind = ?component.kind(),
            "instrumented component"
        );

        Self::prune(&mut records);
        if !Arc::ptr_eq(&wrapped, component) {
            records.insert(
                ComponentId::of(&wrapped),
                PatchRecord {
                    owner: Arc::downgrade(&wrapped),
                    substitute: None,
                },
            );
        }
        records.insert(
            id,
            PatchRecord {
                owner: Arc::downgrade(component),
                substitute: Some(Arc::clone(&wrapped)),
            },
        );
        wrapped
    }

    /// Drop records of definitions that no longer exist. Originals go first
    /// so the wrappers they held can be released in the same pass.
    fn prune(records: &mut HashMap<ComponentId, PatchRecord>) {
        let before = records.len();
        records.retain(|_, record| record.is_wrapper() || record.is_live());
        records.retain(|_, record| record.is_live());
        let pruned = before - records.len();
        if pruned > 0 {
            tracing::trace!(pruned, "pruned dropped components from patch table");
        }
    }

    fn contains(&self, component: &ComponentRef) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ComponentId::of(component))
            .is_some_and(PatchRecord::is_live)
    }

    fn patched_count(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|record| !record.is_wrapper() && record.is_live())
            .count()
    }
}

/// Entry point installed on the host
struct Interceptor {
    original: Arc<dyn ElementFactory>,
    patches: Arc<PatchTable>,
    validator: Arc<PropValidator>,
}

impl ElementFactory for Interceptor {
    fn create_element(&self, component: &ComponentRef, props: Props) -> Element {
        let component = self.patches.resolve(component, &self.validator);
        self.original.create_element(&component, props)
    }
}

/// Handle describing one installation
#[derive(Debug, Clone)]
pub struct Installation {
    generation: u64,
    validator: Arc<PropValidator>,
}

impl Installation {
    /// Monotonic install counter, starting at 1
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Configuration this installation validates with
    #[must_use]
    pub fn config(&self) -> &NormalizedConfig {
        self.validator.config()
    }

    /// Validator this installation wraps components with
    #[must_use]
    pub fn validator(&self) -> &Arc<PropValidator> {
        &self.validator
    }
}

struct Active {
    original: Arc<dyn ElementFactory>,
    installation: Installation,
}

/// Installs and removes prop validation on a [`Host`]
pub struct Controller {
    host: Arc<Host>,
    patches: Arc<PatchTable>,
    active: Mutex<Option<Active>>,
    generation: AtomicU64,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("installed", &self.is_installed())
            .field("patched", &self.patched_count())
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Controller for `host`. Nothing is intercepted until [`Self::install`].
    #[must_use]
    pub fn new(host: Arc<Host>) -> Self {
        Self {
            host,
            patches: Arc::new(PatchTable::default()),
            active: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Host this controller instruments
    #[must_use]
    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }

    /// Install with diagnostics sent to [`TracingReporter`]
    pub fn install(&self, config: &Config) -> Installation {
        self.install_with_reporter(config, Arc::new(TracingReporter))
    }

    /// Install, sending diagnostics to `reporter`.
    ///
    /// Installing again replaces the interceptor in place; components
    /// patched by an earlier installation keep their wrappers.
    pub fn install_with_reporter(
        &self,
        config: &Config,
        reporter: Arc<dyn Reporter>,
    ) -> Installation {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);

        let validator = Arc::new(PropValidator::new(Arc::new(config.normalize()), reporter));
        let original = match active.as_ref() {
            Some(current) => Arc::clone(&current.original),
            None => self.host.entry_point(),
        };

        self.host.replace_entry_point(Arc::new(Interceptor {
            original: Arc::clone(&original),
            patches: Arc::clone(&self.patches),
            validator: Arc::clone(&validator),
        }));

        let installation = Installation {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            validator,
        };
        tracing::debug!(
            generation = installation.generation,
            replaced = active.is_some(),
            "installed prop validation"
        );

        *active = Some(Active {
            original,
            installation: installation.clone(),
        });
        installation
    }

    /// Restore the host's original entry point.
    ///
    /// Returns `false` when nothing was installed. Patched components stay
    /// patched.
    pub fn uninstall(&self) -> bool {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        match active.take() {
            Some(current) => {
                self.host.replace_entry_point(current.original);
                tracing::debug!(
                    generation = current.installation.generation,
                    "uninstalled prop validation"
                );
                true
            }
            None => false,
        }
    }

    /// Whether an installation is active
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The active installation, if any
    #[must_use]
    pub fn installation(&self) -> Option<Installation> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|current| current.installation.clone())
    }

    /// Whether `component` has been wrapped (or is itself a wrapper)
    #[must_use]
    pub fn is_patched(&self, component: &ComponentRef) -> bool {
        self.patches.contains(component)
    }

    /// Number of component definitions wrapped so far
    #[must_use]
    pub fn patched_count(&self) -> usize {
        self.patches.patched_count()
    }
}
