#![allow(clippy::unwrap_used)]

use super::*;
use crate::registry::ClassSpec;
use crate::settings::builder::{child, dict, entry};
use crate::settings::render_container;
use crate::base::FormatOptions;
use rstest::rstest;

fn registry() -> Arc<Registry> {
    Arc::new(Registry::from_specs([
        ClassSpec::new("Split")
            .runnable()
            .slot("first term", &["Leaf", "Split"])
            .slot("second term", &["Leaf", "Split"])
            .defaults(dict([entry(
                "Split",
                dict([
                    entry("Term1", dict([child(0)])),
                    entry("Term2", dict([child(1)])),
                ]),
            )])),
        ClassSpec::new("Optional")
            .runnable()
            .needed(1)
            .slot("required", &["Leaf"])
            .slot("optional", &["Integer"]),
        ClassSpec::new("Leaf").defaults(dict([entry("value", "1")])),
        ClassSpec::new("Bare"),
    ]))
}

fn class(name: &str) -> Replacement {
    Replacement::new(name, true)
}

fn leaf(name: &str) -> Replacement {
    Replacement::new(name, false)
}

// ============================================================================
// SLOTS
// ============================================================================

#[test]
fn test_new_tree_has_one_required_root_slot() {
    let tree = Tree::new(registry());
    let root = &tree[tree.root()];

    assert_eq!(root.name(), ROOT_NAME);
    assert_eq!(root.slots().len(), 1);
    assert!(tree[root.slots()[0]].is_required());
    assert_eq!(tree.top_level(), None);
}

#[test]
fn test_slots_follow_registry_arity() {
    let mut tree = Tree::new(registry());
    let optional = tree
        .replace_next_placeholder(tree.root(), &class("Optional"), "")
        .unwrap();

    let kinds: Vec<_> = tree[optional].slots().iter().map(|&s| tree[s].kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Placeholder { required: true },
            NodeKind::Placeholder { required: false },
        ]
    );
}

#[test]
fn test_materialize_slots_is_idempotent() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    let before = tree[split].slots().to_vec();
    tree.materialize_slots(split);
    assert_eq!(tree[split].slots(), before.as_slice());
}

#[test]
fn test_unknown_name_has_no_slots() {
    let mut tree = Tree::new(registry());
    let unknown = tree
        .replace_next_placeholder(tree.root(), &class("Mystery"), "")
        .unwrap();
    assert!(tree[unknown].slots().is_empty());
}

// ============================================================================
// EDITS
// ============================================================================

#[test]
fn test_replace_next_placeholder_fills_left_to_right() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    let first = tree.replace_next_placeholder(split, &leaf("Leaf"), "a").unwrap();
    let second = tree.replace_next_placeholder(split, &leaf("Leaf"), "b").unwrap();

    assert_eq!(tree.real_children(split).collect::<Vec<_>>(), vec![first, second]);
    assert_eq!(tree.slot_index(second), Some(1));
    assert_eq!(tree[first].comment(), "a");
    assert_eq!(tree[first].parent(), Some(split));
}

#[test]
fn test_replace_next_placeholder_appends_past_arity() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    for _ in 0..3 {
        tree.replace_next_placeholder(split, &leaf("Leaf"), "").unwrap();
    }
    assert_eq!(tree[split].slots().len(), 3);
    assert_eq!(tree.real_children(split).count(), 3);
}

#[test]
fn test_delete_reverts_slot_to_placeholder() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    let first = tree.replace_next_placeholder(split, &leaf("Leaf"), "").unwrap();
    tree.replace_next_placeholder(split, &leaf("Leaf"), "").unwrap();

    let placeholder = tree.delete(first).unwrap();

    assert_eq!(tree[split].slots().len(), 2);
    assert_eq!(tree[split].slots()[0], placeholder);
    assert!(tree[placeholder].is_required());
    assert_eq!(tree[first].parent(), None);
    assert_eq!(tree.real_children(split).count(), 1);
}

#[test]
fn test_replace_swaps_subtree() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    let placeholder = tree[split].slots()[1];
    let inner = tree.replace(placeholder, &class("Split")).unwrap();

    assert_eq!(tree.child_in_slot(split, 1), Some(inner));
    assert_eq!(tree[inner].slots().len(), 2);
    assert!(tree.config(inner).has_key("Split"));
}

#[rstest]
#[case::root(true)]
#[case::detached(false)]
fn test_edits_reject_root_and_detached_nodes(#[case] root: bool) {
    let mut tree = Tree::new(registry());
    let target = if root {
        tree.root()
    } else {
        let leaf_id = tree
            .replace_next_placeholder(tree.root(), &leaf("Leaf"), "")
            .unwrap();
        tree.delete(leaf_id).unwrap();
        leaf_id
    };

    let error = tree.delete(target).unwrap_err();
    let expected = if root {
        TreeError::RootNode
    } else {
        TreeError::Detached(target)
    };
    assert_eq!(error, expected);
}

#[test]
fn test_replaced_subtrees_free_their_entries() {
    let mut tree = Tree::new(registry());
    let mut top = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    tree.replace_placeholder(top, 0, &leaf("Leaf")).unwrap();
    top = tree.replace(top, &class("Split")).unwrap();
    let size = tree.nodes.len();

    for _ in 0..5 {
        tree.replace_placeholder(top, 0, &leaf("Leaf")).unwrap();
        top = tree.replace(top, &class("Split")).unwrap();
    }

    assert_eq!(tree.nodes.len(), size, "Expected: a stable arena size");
    assert_eq!(tree.top_level(), Some(top));
    assert_eq!(tree[top].slots().len(), 2);
    assert!(tree.real_children(top).next().is_none());
}

#[test]
fn test_replace_placeholder_rejects_missing_slot() {
    let mut tree = Tree::new(registry());
    let error = tree
        .replace_placeholder(tree.root(), 3, &leaf("Leaf"))
        .unwrap_err();
    assert_eq!(
        error,
        TreeError::NoSuchSlot {
            name: ROOT_NAME.to_string(),
            slot: 3
        }
    );
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_possible_replacements_from_parent_slot() {
    let mut tree = Tree::new(registry());
    let optional = tree
        .replace_next_placeholder(tree.root(), &class("Optional"), "")
        .unwrap();

    let first = tree.possible_replacements(tree[optional].slots()[0]).unwrap();
    assert_eq!(first.description, "required");
    assert_eq!(first.candidates, vec![Replacement::new("Leaf", false)]);
    assert!(!first.accepts_integer);

    let second = tree.possible_replacements(tree[optional].slots()[1]).unwrap();
    assert!(second.candidates.is_empty());
    assert!(second.accepts_integer);
}

#[test]
fn test_root_slot_offers_runnables() {
    let tree = Tree::new(registry());
    let options = tree.possible_replacements(tree[tree.root()].slots()[0]).unwrap();
    let names: Vec<_> = options.candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Split", "Optional"]);
    assert!(options.candidates.iter().all(|c| c.can_have_children));
}

#[test]
fn test_contextual_description() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    assert_eq!(tree.contextual_description(tree.root()), None);
    assert_eq!(
        tree.contextual_description(tree[split].slots()[1]),
        Some("second term")
    );
}

#[test]
fn test_same_structure_ignores_settings() {
    let mut a = Tree::new(registry());
    let mut b = Tree::new(registry());
    for tree in [&mut a, &mut b] {
        let split = tree
            .replace_next_placeholder(tree.root(), &class("Split"), "")
            .unwrap();
        tree.replace_next_placeholder(split, &leaf("Leaf"), "note").unwrap();
    }
    let top = b.top_level().unwrap();
    b.config_mut(top).push(entry("extra", "1"));
    assert!(a.same_structure(&b));

    let leaf_id = b.real_children(top).next().unwrap();
    b.set_comment(leaf_id, "other").unwrap();
    assert!(!a.same_structure(&b));
}

#[test]
fn test_walk_is_pre_order_with_depth() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    tree.replace_next_placeholder(split, &leaf("Leaf"), "").unwrap();

    let walked: Vec<_> = tree
        .walk()
        .map(|(id, depth)| (tree[id].name().to_string(), depth))
        .collect();
    assert_eq!(
        walked,
        vec![
            (ROOT_NAME.to_string(), 0),
            ("Split".to_string(), 1),
            ("Leaf".to_string(), 2),
            (String::new(), 2),
        ]
    );
}

#[test]
fn test_clone_keeps_parent_links() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    let snapshot = tree.clone();
    tree.delete(split).unwrap();

    assert_eq!(snapshot.top_level(), Some(split));
    assert_eq!(snapshot[split].parent(), Some(snapshot.root()));
    assert_eq!(tree.top_level(), None);
}

// ============================================================================
// SETTINGS ASSEMBLY
// ============================================================================

#[test]
fn test_config_recursive_splices_children_by_slot() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    tree.replace_placeholder(split, 1, &leaf("Leaf")).unwrap();
    let second = tree.real_children(split).next().unwrap();
    tree.config_mut(second).push(entry("second", "2"));

    let config = tree.config_recursive(split);
    let rendered = render_container(&config, 0, &FormatOptions::default());
    assert_eq!(
        rendered,
        "{\n  \"Split\" : {\n    \"Term1\" : {\n      ### CHILD 0 ###\n    },\n    \"Term2\" : {\n      \"value\" : 1,\n      \"second\" : 2\n    }\n  }\n}"
    );
    // the node's own fragment is untouched
    assert!(tree.config(split).get("Split").is_some());
    assert_eq!(tree.config(tree.root()).child_placeholders(), vec![0]);
}

#[test]
fn test_config_recursive_skips_integer_children() {
    let mut tree = Tree::new(registry());
    let optional = tree
        .replace_next_placeholder(tree.root(), &class("Optional"), "")
        .unwrap();
    tree.replace_next_placeholder(optional, &leaf("Leaf"), "").unwrap();
    tree.replace_next_placeholder(optional, &Replacement::integer(3), "").unwrap();
    tree.config_mut(optional).push(child(1));

    let config = tree.config_recursive(optional);
    // no placeholder for the leaf, and the integer keeps its placeholder
    assert_eq!(config.child_placeholders(), vec![1]);
}

#[test]
fn test_program_settings_drop_leftover_placeholders() {
    let mut tree = Tree::new(registry());
    tree.set_config(tree.root(), dict([entry("a", "1"), child(0)]));
    tree.replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();

    let settings = tree.settings();
    let rendered = render_container(&settings, 0, &FormatOptions::default());
    assert_eq!(
        rendered,
        "{\n  \"a\" : 1,\n  \"Split\" : {\n    \"Term1\" : {},\n    \"Term2\" : {}\n  }\n}"
    );
}

#[test]
fn test_clear_configs_reaches_real_descendants() {
    let mut tree = Tree::new(registry());
    let split = tree
        .replace_next_placeholder(tree.root(), &class("Split"), "")
        .unwrap();
    let leaf_id = tree.replace_next_placeholder(split, &leaf("Leaf"), "").unwrap();

    tree.clear_configs(tree.root());
    assert!(tree.config(tree.root()).is_empty());
    assert!(tree.config(split).is_empty());
    assert!(tree.config(leaf_id).is_empty());
}
