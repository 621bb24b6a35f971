//! End-to-end tests: host + controller + validator + reporter.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use propcheck::prelude::*;
use propcheck::{should_instrument, Installation};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

struct Harness {
    host: Arc<Host>,
    controller: Controller,
    reporter: MemoryReporter,
}

impl Harness {
    fn new(config: &Config) -> Self {
        let host = Arc::new(Host::new());
        let controller = Controller::new(Arc::clone(&host));
        let reporter = MemoryReporter::new();
        controller.install_with_reporter(config, Arc::new(reporter.clone()));
        Self {
            host,
            controller,
            reporter,
        }
    }

    fn reinstall(&self, config: &Config) -> Installation {
        self.controller
            .install_with_reporter(config, Arc::new(self.reporter.clone()))
    }
}

fn typos_only() -> Config {
    Config::new().with_warn_undeclared(false)
}

fn foobar_schema() -> Schema {
    Schema::new().with("foobar", PropType::Bool)
}

/// Stateful component whose hooks count their calls
struct Spy {
    mounts: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
    fail_update: bool,
}

impl Spy {
    fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let mounts = Arc::new(AtomicUsize::new(0));
        let updates = Arc::new(AtomicUsize::new(0));
        let spy = Self {
            mounts: Arc::clone(&mounts),
            updates: Arc::clone(&updates),
            fail_update: false,
        };
        (spy, mounts, updates)
    }
}

impl Lifecycle for Spy {
    fn render(&self, _props: &Props) -> String {
        "<div>foo</div>".to_string()
    }

    fn did_mount(&self, _props: &Props) -> HookResult {
        self.mounts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn did_update(&self, _props: &Props, _prev: &Props) -> HookResult {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_update {
            return Err(HookError::new("HasMethods", "update rejected"));
        }
        Ok(())
    }
}

/// Stateful component with no hooks of its own
struct NoMethods;

impl Lifecycle for NoMethods {
    fn render(&self, _props: &Props) -> String {
        "<div>foobar</div>".to_string()
    }
}

#[test]
fn warns_when_similar_prop_is_passed() {
    let h = Harness::new(&typos_only());
    let component = ComponentDef::stateful("HasNoMethods", NoMethods)
        .with_schema(foobar_schema())
        .into_ref();

    let mounted = h.host.render(&component, props([("foobbar", json!(true))])).unwrap();
    assert_eq!(mounted.output(), "<div>foobar</div>");
    assert_eq!(
        h.reporter.messages(),
        vec!["HasNoMethods: received prop \"foobbar\". Maybe you meant \"foobar\"?"]
    );
}

#[test]
fn chains_validation_into_mount_and_update_hooks() {
    let h = Harness::new(&typos_only());
    let (spy, mounts, updates) = Spy::new();
    let component = ComponentDef::stateful("HasMethods", spy)
        .with_schema(
            Schema::new()
                .with("foobar", PropType::Bool)
                .with("bang", PropType::Bool),
        )
        .into_ref();

    let mut mounted = h
        .host
        .render(&component, props([("foobbar", json!(true)), ("bang", json!(true))]))
        .unwrap();
    mounted
        .set_props(props([
            ("foobbar", json!(true)),
            ("bang", json!(true)),
            ("foobar", json!(true)),
            ("bangg", json!(true)),
        ]))
        .unwrap();

    assert_eq!(mounts.load(Ordering::SeqCst), 1);
    assert_eq!(updates.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.reporter.messages(),
        vec![
            "HasMethods: received prop \"foobbar\". Maybe you meant \"foobar\"?",
            "HasMethods: received prop \"foobbar\". Maybe you meant \"foobar\"?",
            "HasMethods: received prop \"bangg\". Maybe you meant \"bang\"?",
        ]
    );
}

#[test]
fn hook_errors_are_forwarded_unchanged() {
    let h = Harness::new(&typos_only());
    let (mut spy, _mounts, updates) = Spy::new();
    spy.fail_update = true;
    let component = ComponentDef::stateful("HasMethods", spy)
        .with_schema(foobar_schema())
        .into_ref();

    let mut mounted = h.host.render(&component, Props::new()).unwrap();
    let err = mounted
        .set_props(props([("foobbar", json!(true))]))
        .unwrap_err();

    assert_eq!(err, HookError::new("HasMethods", "update rejected"));
    assert_eq!(updates.load(Ordering::SeqCst), 1);
    assert_eq!(h.reporter.len(), 1);
}

#[test]
fn works_on_functional_components() {
    let h = Harness::new(&typos_only());
    let component = ComponentDef::stateless("Functional", |_| "<div>Functional</div>".to_string())
        .with_schema(foobar_schema())
        .into_ref();

    let mut mounted = h.host.render(&component, props([("foobbar", json!(true))])).unwrap();
    assert_eq!(mounted.output(), "<div>Functional</div>");
    mounted.set_props(props([("foobbar", json!(false))])).unwrap();

    assert_eq!(h.reporter.len(), 2);
    assert!(h.reporter.messages().iter().all(|m| m.starts_with("Functional: ")));
}

#[test]
fn include_and_exclude_options() {
    let config = typos_only()
        .with_include(vec![PatternSpec::parse("/^Include/"), PatternSpec::parse("PatchMe")])
        .with_exclude(vec![
            PatternSpec::parse("/^Exclude/"),
            PatternSpec::parse("DoNotPatchMe"),
        ]);
    let h = Harness::new(&config);

    let create = |display_name: &str| {
        ComponentDef::stateful("Comp", NoMethods)
            .with_display_name(display_name)
            .with_schema(foobar_schema())
            .into_ref()
    };

    for name in ["IncludeFoo", "PatchMe"] {
        let component = create(name);
        h.host.render(&component, props([("foobbar", json!(true))])).unwrap();
        assert_eq!(
            h.reporter.messages(),
            vec![format!(
                "{name}: received prop \"foobbar\". Maybe you meant \"foobar\"?"
            )]
        );
        assert!(h.controller.is_patched(&component));
        h.reporter.clear();
    }

    for name in ["ExcludeBar", "DoNotPatchMe"] {
        let component = create(name);
        h.host.render(&component, props([("foobbar", json!(true))])).unwrap();
        assert!(h.reporter.is_empty(), "{name} should not be instrumented");
        assert!(!h.controller.is_patched(&component));
    }
}

#[test]
fn empty_schema_never_warns() {
    let h = Harness::new(&Config::default());
    let component = ComponentDef::stateless("Loose", |_| String::new())
        .with_schema(Schema::new())
        .into_ref();
    h.host.render(&component, props([("bang", json!("bar"))])).unwrap();

    let unschemed = ComponentDef::stateless("Unschemed", |_| String::new()).into_ref();
    h.host.render(&unschemed, props([("bang", json!("bar"))])).unwrap();

    assert!(h.reporter.is_empty());
}

#[test]
fn whitelisted_props_do_not_warn() {
    let h = Harness::new(&Config::default());
    let component = ComponentDef::stateless("Strict", |_| String::new())
        .with_schema(Schema::new().with("x", PropType::Bool))
        .into_ref();
    h.host
        .render(
            &component,
            props([
                ("onClick", json!(null)),
                ("data-bar", json!("x")),
                ("aria-expanded", json!("false")),
            ]),
        )
        .unwrap();
    assert!(h.reporter.is_empty(), "{:?}", h.reporter.messages());
}

#[test]
fn undeclared_prop_is_reported_once() {
    let h = Harness::new(&Config::default());
    let component = ComponentDef::stateless("Card", |_| String::new())
        .with_schema(Schema::new().with("title", PropType::String))
        .into_ref();
    h.host
        .render(&component, props([("subtitleText", json!("x"))]))
        .unwrap();

    let diagnostics = h.reporter.diagnostics();
    assert_eq!(diagnostics, vec![Diagnostic::undeclared("Card", "subtitleText")]);
    assert_eq!(
        diagnostics[0].message(),
        "Card: received prop \"subtitleText\", but \"subtitleText\" is not declared in the schema. \
         Maybe you should add \"subtitleText\" to the schema for Card."
    );
}

#[test]
fn wraps_each_definition_once() {
    let h = Harness::new(&typos_only());
    let component = ComponentDef::stateless("Repeated", |_| String::new())
        .with_schema(foobar_schema())
        .into_ref();

    let first = h.host.create_element(&component, Props::new());
    for _ in 0..10 {
        let again = h.host.create_element(&component, Props::new());
        assert!(Arc::ptr_eq(again.component(), first.component()));
    }
    assert_eq!(h.controller.patched_count(), 1);
}

#[test]
fn patching_does_not_extend_definition_lifetime() {
    let h = Harness::new(&typos_only());
    let (spy, _mounts, _updates) = Spy::new();
    let stateful = ComponentDef::stateful("Tracked", spy)
        .with_schema(foobar_schema())
        .into_ref();
    let stateless = ComponentDef::stateless("TrackedFn", |_| String::new())
        .with_schema(foobar_schema())
        .into_ref();

    h.host.render(&stateful, props([("foobbar", json!(true))])).unwrap();
    h.host.render(&stateless, props([("foobbar", json!(true))])).unwrap();

    assert_eq!(Arc::strong_count(&stateful), 1);
    assert_eq!(Arc::strong_count(&stateless), 1);
    assert_eq!(h.controller.patched_count(), 2);
    assert_eq!(h.reporter.len(), 2);
}

#[test]
fn dropped_definitions_leave_no_patch_records() {
    let h = Harness::new(&typos_only());
    for i in 0..1000 {
        let transient = ComponentDef::stateless(format!("Transient{i}"), |_| String::new())
            .with_schema(foobar_schema())
            .into_ref();
        h.host.render(&transient, Props::new()).unwrap();
    }
    assert_eq!(h.controller.patched_count(), 0);

    let kept = ComponentDef::stateless("Kept", |_| String::new())
        .with_schema(foobar_schema())
        .into_ref();
    h.host.render(&kept, Props::new()).unwrap();
    assert_eq!(h.controller.patched_count(), 1);
    assert!(h.controller.is_patched(&kept));
}

#[test]
fn identity_not_name_decides_patching() {
    let h = Harness::new(&typos_only());
    let a = ComponentDef::stateless("Twin", |_| "a".to_string())
        .with_schema(foobar_schema())
        .into_ref();
    let b = ComponentDef::stateless("Twin", |_| "b".to_string())
        .with_schema(foobar_schema())
        .into_ref();

    assert_eq!(h.host.render(&a, Props::new()).unwrap().output(), "a");
    assert!(!h.controller.is_patched(&b));
    assert_eq!(h.host.render(&b, Props::new()).unwrap().output(), "b");
    assert_eq!(h.controller.patched_count(), 2);
}

#[test]
fn uninstall_keeps_existing_wrappers() {
    let h = Harness::new(&typos_only());
    let component = ComponentDef::stateless("Sticky", |_| String::new())
        .with_schema(foobar_schema())
        .into_ref();

    let element = h.host.create_element(&component, props([("foobbar", json!(true))]));
    assert!(h.controller.uninstall());

    element.mount().unwrap();
    assert_eq!(h.reporter.len(), 1);
    assert!(h.controller.is_patched(&component));

    // New creations go straight to the original entry point.
    let direct = h.host.create_element(&component, Props::new());
    assert!(Arc::ptr_eq(direct.component(), &component));
}

#[test]
fn reinstall_with_same_config_is_deterministic() {
    let config = Config::default();
    let h = Harness::new(&config);
    let run = |h: &Harness| {
        let component = ComponentDef::stateless("Form", |_| String::new())
            .with_schema(
                Schema::new()
                    .with("value", PropType::String)
                    .with("onSubmit", PropType::Func),
            )
            .into_ref();
        h.host
            .render(
                &component,
                props([("valeu", json!("x")), ("onSubmitt", json!(null)), ("id", json!("f"))]),
            )
            .unwrap();
        let messages = h.reporter.messages();
        h.reporter.clear();
        messages
    };

    let first = run(&h);
    h.reinstall(&config);
    let second = run(&h);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn concurrent_instantiation_wraps_once() {
    let h = Harness::new(&typos_only());
    let component = ComponentDef::stateless("Shared", |_| String::new())
        .with_schema(foobar_schema())
        .into_ref();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    h.host
                        .render(&component, props([("foobbar", json!(true))]))
                        .expect("render");
                }
            });
        }
    });

    assert_eq!(h.controller.patched_count(), 1);
    assert_eq!(h.reporter.len(), 200);
}

#[test]
fn eligibility_matches_controller_decision() {
    let h = Harness::new(&Config::default());
    let installation = h.controller.installation().expect("installed");
    for name in ["Button", "Connect(Button)", "my_widget"] {
        let component = ComponentDef::stateless(name, |_| String::new()).into_ref();
        h.host.create_element(&component, Props::new());
        assert_eq!(
            h.controller.is_patched(&component),
            should_instrument(name, installation.config())
        );
    }
}
