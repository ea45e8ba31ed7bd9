#![allow(clippy::unwrap_used)]

use crate::helpers::fixtures::sources;
use composer::Registry;
use composer::source::{DEFAULT_TEMPLATE, parse, render_source};
use composer::validate::validate;

// ============================================================================
// SOURCE ROUND TRIP
// ============================================================================

#[test]
fn test_fixture_sources_are_valid() {
    for fixture in sources() {
        let tree = parse(&fixture.text, Registry::global()).unwrap();
        let result = validate(&tree);
        assert!(
            result.is_ok(),
            "Input: {}\nExpected: valid tree\nGot: {result:?}",
            fixture.name()
        );
    }
}

#[test]
fn test_rendered_sources_parse_to_same_tree() {
    for fixture in sources() {
        let first = parse(&fixture.text, Registry::global()).unwrap();
        let rendered = render_source(&first, DEFAULT_TEMPLATE);
        let second = parse(&rendered, Registry::global()).unwrap();
        assert!(
            first.same_structure(&second),
            "Input: {}\nExpected: same structure after rendering\nGot: {rendered}",
            fixture.name()
        );
        assert_eq!(
            render_source(&second, DEFAULT_TEMPLATE),
            rendered,
            "Input: {}",
            fixture.name()
        );
    }
}

#[test]
fn test_typedefs_and_comments_resolved() {
    let source = crate::helpers::fixtures::fixture("sources", "diffusion_typedef.cpp");
    let tree = parse(&source, Registry::global()).unwrap();
    let top = tree.top_level().unwrap();
    assert_eq!(tree[top].name(), "TimeSteppingScheme::ExplicitEuler");
    assert_eq!(tree[top].comment(), " explicit time stepping");

    let fem = tree.child_in_slot(top, 0).unwrap();
    let mesh = tree.child_in_slot(fem, 0).unwrap();
    assert_eq!(tree[mesh].name(), "Mesh::StructuredDeformableOfDimension");
    assert_eq!(tree[mesh].comment(), " the fiber mesh");
    let dimension = tree.child_in_slot(mesh, 0).unwrap();
    assert_eq!(tree[dimension].name(), "1");
}
