#![allow(clippy::unwrap_used)]

use crate::helpers::fixtures::{fixture, program};
use composer::registry::ClassSpec;
use composer::settings::builder::{child, dict, entry};
use composer::tree::Replacement;
use composer::{Notice, Registry, Session, Severity};
use std::sync::Arc;

fn small_registry() -> Arc<Registry> {
    Arc::new(Registry::from_specs([
        ClassSpec::new("Foo")
            .runnable()
            .slot("first", &["Bar"])
            .slot("second", &["Integer"]),
        ClassSpec::new("Parent")
            .runnable()
            .slot("child", &["Child"])
            .defaults(dict([entry("x", "1"), child(0)])),
        ClassSpec::new("Child").defaults(dict([entry("y", dict([]))])),
        ClassSpec::new("Bar"),
    ]))
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_foo_bar_three() {
    let mut session = Session::with_registry(small_registry());
    assert_eq!(
        session.parse_source(&program("Foo<Bar,3>"), true),
        Notice::info("parsed source successfully")
    );
    let tree = session.tree();
    let foo = tree.top_level().unwrap();
    assert_eq!(tree[foo].name(), "Foo");
    let names: Vec<_> = tree.real_children(foo).map(|id| tree[id].name()).collect();
    assert_eq!(names, vec!["Bar", "3"]);

    let collapsed: String = session.serialize_source().split_whitespace().collect();
    assert!(collapsed.contains("Foo<Bar,3>problem(settings);"), "Got: {collapsed}");
}

#[test]
fn test_unknown_key_goes_to_child() {
    let mut session = Session::with_registry(small_registry());
    session.parse_source(&program("Parent<Child>"), true);
    let notices = session.apply_settings(
        "config = {\n  \"x\": 1,\n  \"y\": {\"z\": 2}\n}\n",
        None,
    );
    assert!(
        notices.iter().all(|notice| notice.severity == Severity::Info),
        "Got: {notices:?}"
    );

    let tree = session.tree();
    let parent = tree.top_level().unwrap();
    let child_id = tree.child_in_slot(parent, 0).unwrap();
    assert!(tree.config(parent).has_key("x"));
    assert!(!tree.config(parent).has_key("y"));
    assert!(tree.config(child_id).has_key("y"));
}

#[test]
fn test_history_boundary() {
    let mut session = Session::new();
    assert_eq!(session.undo(), Notice::error("cannot undo"));
    assert_eq!(session.history().index(), 0);

    session.parse_source(&fixture("sources", "laplace_2d.cpp"), true);
    let before = session.serialize_source();
    let top = session.tree().top_level().unwrap();
    let quadrature = session.tree().child_in_slot(top, 2).unwrap();
    let notice = session.replace_node(quadrature, &Replacement::new("Quadrature::None", false));
    assert!(!notice.is_error(), "Got: {notice}");
    assert_ne!(session.serialize_source(), before);

    assert_eq!(session.undo(), Notice::info("undo successful"));
    assert_eq!(session.serialize_source(), before);
}

#[test]
fn test_laplace_settings_are_spread_over_nodes() {
    let mut session = Session::new();
    let parsed = session.parse_source(&fixture("sources", "laplace_2d.cpp"), true);
    assert_eq!(parsed, Notice::info("parsed source successfully"));

    let notices = session.apply_settings(&fixture("settings", "laplace_2d.py"), None);
    assert!(notices.iter().all(|notice| !notice.is_error()), "Got: {notices:?}");

    let tree = session.tree();
    let root = tree.root();
    let fem = tree.top_level().unwrap();
    let mesh = tree.child_in_slot(fem, 0).unwrap();
    assert!(tree.config(root).has_key("scenarioName"));
    assert!(tree.config(root).has_key("Meshes"));
    assert!(tree.config(fem).has_key("FiniteElementMethod"));
    assert!(tree.config(mesh).has_key("meshName"));

    let rendered = session.serialize_settings();
    assert!(rendered.starts_with("# Laplace 2D\n"), "Got: {rendered}");
    assert!(rendered.ends_with("  print(config)\n"), "Got: {rendered}");

    session.apply_settings(&rendered, None);
    assert_eq!(session.serialize_settings(), rendered);
}
