#![allow(clippy::unwrap_used)]

use super::*;
use crate::base::{FormatOptions, Severity};
use crate::registry::{ClassSpec, Registry};
use crate::settings::builder::{child, choice, dict, entry, list, list_entry, mesh, solver};
use crate::settings::{parse_dict, render_container};
use crate::tree::Replacement;
use rstest::rstest;
use std::sync::Arc;

fn registry() -> Arc<Registry> {
    Arc::new(Registry::from_specs([
        ClassSpec::new("Parent")
            .runnable()
            .slot("child", &["Child", "Other"])
            .defaults(dict([entry("x", "1"), child(0)])),
        ClassSpec::new("Pair")
            .runnable()
            .slot("left", &["Child"])
            .slot("right", &["Other"])
            .defaults(dict([entry(
                "Pair",
                dict([
                    entry("a", "1"),
                    entry("Left", dict([child(0)])),
                    entry("Right", dict([child(1)])),
                ]),
            )])),
        ClassSpec::new("Child").defaults(dict([entry("y", dict([]))])),
        ClassSpec::new("Other").defaults(dict([
            entry("w", "0"),
            entry(
                "writers",
                list([list_entry(dict([entry("format", "\"Paraview\""), entry("every", "1")]))]),
            ),
        ])),
        ClassSpec::new("Blocks").runnable().defaults(dict([
            choice(
                vec![entry("physicalExtent", "[1.0]")],
                vec![entry("meshName", "\"m\"")],
            ),
            mesh(vec![entry("nElements", "[2]"), entry("inputMeshIsGlobal", "True")]),
            solver(vec![entry("solverType", "\"gmres\""), entry("maxIterations", "1e4")]),
            entry("endTime", "1.0"),
        ])),
    ]))
}

fn build(top: &str, children: &[&str]) -> (Tree, NodeId) {
    let mut tree = Tree::new(registry());
    let top = tree
        .replace_next_placeholder(tree.root(), &Replacement::new(top, true), "")
        .unwrap();
    for name in children {
        tree.replace_next_placeholder(top, &Replacement::new(name, false), "")
            .unwrap();
    }
    (tree, top)
}

fn render(container: &Container) -> String {
    render_container(container, 0, &FormatOptions::default())
}

fn warnings(notices: &[Notice]) -> Vec<&str> {
    notices
        .iter()
        .filter(|notice| notice.severity == Severity::Warning)
        .map(|notice| notice.message.as_str())
        .collect()
}

// ============================================================================
// SYNC
// ============================================================================

#[test]
fn test_unknown_key_is_delegated_to_child() {
    let (mut tree, parent) = build("Parent", &["Child"]);
    let child_id = tree.real_children(parent).next().unwrap();

    let notices = sync(
        &mut tree,
        parent,
        parse_dict(r#"{"x": 1, "y": {"z": 2}}"#).unwrap(),
        SyncOptions::default(),
    );

    assert!(warnings(&notices).is_empty(), "Got: {notices:?}");
    assert_eq!(
        notices.last().unwrap().message,
        "written settings for Parent"
    );
    assert_eq!(
        render(tree.config(parent)),
        "{\n  \"x\" : 1,\n  ### CHILD 0 ###\n}"
    );
    assert_eq!(render(tree.config(child_id)), "{\n  \"y\" : {\"z\": 2}\n}");
}

#[rstest]
#[case::kept(true, "\"q\" is an unknown setting -> added it to Parent anyway", true)]
#[case::dropped(false, "\"q\" is an unknown setting -> it was NOT added to Parent", false)]
fn test_unknown_key_nobody_takes(
    #[case] keep_unknown: bool,
    #[case] expected: &str,
    #[case] kept: bool,
) {
    let (mut tree, parent) = build("Parent", &["Child"]);
    let notices = sync(
        &mut tree,
        parent,
        parse_dict(r#"{"q": 5}"#).unwrap(),
        SyncOptions::default().with_keep_unknown(keep_unknown),
    );

    assert_eq!(warnings(&notices), vec![expected]);
    assert_eq!(tree.config(parent).has_key("q"), kept);
    let child_id = tree.real_children(parent).next().unwrap();
    assert!(!tree.config(child_id).has_key("q"));
}

#[test]
fn test_nested_placeholders_route_to_their_slot() {
    let (mut tree, pair) = build("Pair", &["Child", "Other"]);
    let settings = parse_dict(
        r#"{"Pair": {"a": 2, "Left": {"y": 3}, "Right": {"w": 4, "writers": [{"format": "Csv", "extra": 1}]}}}"#,
    )
    .unwrap();

    let notices = sync(&mut tree, pair, settings, SyncOptions::default());

    let children: Vec<_> = tree.real_children(pair).collect();
    assert_eq!(
        warnings(&notices),
        vec!["\"extra\" is an unknown setting -> added it to Other anyway"]
    );
    assert_eq!(
        render(tree.config(pair)),
        "{\n  \"Pair\" : {\n    \"a\" : 2,\n    \"Left\" : {\n      ### CHILD 0 ###\n    },\n    \"Right\" : {\n      ### CHILD 1 ###\n    }\n  }\n}"
    );
    assert_eq!(render(tree.config(children[0])), "{\n  \"y\" : 3\n}");
    assert_eq!(
        render(tree.config(children[1])),
        "{\n  \"w\" : 4,\n  \"writers\" : [\n    {\n      \"format\" : \"Csv\",\n      \"extra\" : 1\n    }\n  ]\n}"
    );
}

#[test]
fn test_reserved_keys_stay_in_place() {
    let (mut tree, parent) = build("Parent", &["Child"]);
    let notices = sync(
        &mut tree,
        parent,
        parse_dict(r#"{"Meshes": {"m": {}}, "meta": 1}"#).unwrap(),
        SyncOptions::default().with_keep_unknown(false),
    );
    assert!(warnings(&notices).is_empty());
    assert!(tree.config(parent).has_key("Meshes"));
    assert!(tree.config(parent).has_key("meta"));
}

#[test]
fn test_comments_kept_and_placeholders_not_duplicated() {
    let (mut tree, parent) = build("Parent", &["Child"]);
    let settings = parse_dict("{\n  # hello\n  \"x\": 1,\n  ### CHILD 0 ###\n}").unwrap();
    sync(&mut tree, parent, settings, SyncOptions::default());
    assert_eq!(
        render(tree.config(parent)),
        "{\n  # hello\n  \"x\" : 1,\n  ### CHILD 0 ###\n}"
    );
}

#[test]
fn test_choice_and_aggregate_keys_are_known() {
    let (mut tree, blocks) = build("Blocks", &[]);
    let settings =
        parse_dict(r#"{"meshName": "m", "solverName": "s", "inputMeshIsGlobal": False, "maxIterations": 3}"#)
            .unwrap();
    let notices = sync(&mut tree, blocks, settings, SyncOptions::default());
    assert!(warnings(&notices).is_empty(), "Got: {notices:?}");
    assert_eq!(tree.config(blocks).len(), 4);
}

#[test]
fn test_without_recursion_children_are_untouched() {
    let (mut tree, parent) = build("Parent", &["Child"]);
    let child_id = tree.real_children(parent).next().unwrap();
    tree.set_config(child_id, dict([entry("y", "7")]));
    let before = tree.config(child_id).clone();

    let notices = sync(
        &mut tree,
        parent,
        parse_dict(r#"{"y": 1}"#).unwrap(),
        SyncOptions::default().with_recurse_children(false),
    );

    assert_eq!(warnings(&notices).len(), 1);
    assert_eq!(tree.config(child_id), &before);
    assert_eq!(render(tree.config(child_id)), "{\n  \"y\" : 7\n}");
}

#[test]
fn test_program_settings_reassemble() {
    let (mut tree, _) = build("Parent", &["Child"]);
    let root = tree.root();
    let notices = sync(
        &mut tree,
        root,
        parse_dict(r#"{"x": 1, "y": {"z": 2}}"#).unwrap(),
        SyncOptions::default(),
    );
    assert!(warnings(&notices).is_empty(), "Got: {notices:?}");
    assert_eq!(
        render(&tree.settings()),
        "{\n  \"x\" : 1,\n  \"y\" : {\"z\": 2}\n}"
    );
}

// ============================================================================
// MISSING DEFAULTS
// ============================================================================

#[test]
fn test_missing_defaults_are_added_once() {
    let (mut tree, parent) = build("Parent", &["Other"]);
    let root = tree.root();
    tree.clear_configs(root);

    let first = add_missing_defaults(&mut tree, parent);
    // x, w and the two scalars of the copied list entry
    assert_eq!(first.settings, 4);
    assert!(first.modified);
    let other = tree.real_children(parent).next().unwrap();
    assert_eq!(
        render(tree.config(other)),
        "{\n  \"w\" : 0,\n  \"writers\" : [\n    {\n      \"format\" : \"Paraview\",\n      \"every\" : 1\n    }\n  ]\n}"
    );
    assert_eq!(add_missing_defaults(&mut tree, parent), Additions::default());
}

#[test]
fn test_choice_follows_written_alternative() {
    let (mut tree, blocks) = build("Blocks", &[]);
    tree.set_config(blocks, dict([entry("meshName", "\"m\"")]));

    add_missing_defaults(&mut tree, blocks);
    let config = tree.config(blocks);
    assert!(!config.has_key("physicalExtent"));
    assert!(config.has_key("endTime"));
}

#[test]
fn test_aggregates_are_hoisted_into_global_dicts() {
    let (mut tree, blocks) = build("Blocks", &[]);
    let root = tree.root();
    tree.clear_configs(root);

    add_missing_defaults(&mut tree, blocks);

    let config = tree.config(blocks);
    assert_eq!(
        config.get("meshName").unwrap().value.as_literal(),
        Some("\"mesh0\"")
    );
    assert_eq!(
        config.get("solverName").unwrap().value.as_literal(),
        Some("\"solver0\"")
    );
    let global = tree.config(root);
    let meshes = global.get("Meshes").unwrap().value.as_container().unwrap();
    let mesh0 = meshes.get("mesh0").unwrap().value.as_container().unwrap();
    assert!(mesh0.has_key("inputMeshIsGlobal"));
    let solvers = global.get("Solvers").unwrap().value.as_container().unwrap();
    assert!(solvers.get("solver0").unwrap().value.as_container().unwrap().has_key("maxIterations"));

    assert_eq!(add_missing_defaults(&mut tree, blocks), Additions::default());
}

#[test]
fn test_aggregate_with_first_key_present_fills_in_place() {
    let (mut tree, blocks) = build("Blocks", &[]);
    let root = tree.root();
    tree.clear_configs(root);
    tree.set_config(blocks, dict([entry("solverType", "\"cg\"")]));

    add_missing_defaults(&mut tree, blocks);

    let config = tree.config(blocks);
    assert!(config.has_key("maxIterations"));
    assert!(!config.has_key("solverName"));
    assert!(!tree.config(root).has_key("Solvers"));
    assert!(tree.config(root).has_key("Meshes"));
}

#[test]
fn test_generated_names_skip_taken_ones() {
    let (mut tree, blocks) = build("Blocks", &[]);
    let root = tree.root();
    tree.set_config(
        root,
        dict([entry("Meshes", dict([entry("mesh0", dict([]))])), child(0)]),
    );
    tree.set_config(blocks, Container::dict());

    add_missing_defaults(&mut tree, blocks);
    assert_eq!(
        tree.config(blocks).get("meshName").unwrap().value.as_literal(),
        Some("\"mesh1\"")
    );
}

#[test]
fn test_container_defaults_count_as_modification() {
    let (mut tree, parent) = build("Parent", &["Child"]);
    let root = tree.root();
    tree.clear_configs(root);
    tree.set_config(parent, dict([entry("x", "1"), child(0)]));

    let added = add_missing_defaults(&mut tree, parent);
    assert_eq!(
        added,
        Additions {
            settings: 0,
            modified: true
        }
    );
    let child_id = tree.real_children(parent).next().unwrap();
    assert_eq!(render(tree.config(child_id)), "{\n  \"y\" : {}\n}");
    assert_eq!(add_missing_defaults(&mut tree, parent), Additions::default());
}
