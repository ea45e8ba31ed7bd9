#![allow(clippy::unwrap_used)]

use crate::helpers::fixtures::program;
use crate::helpers::trees::{Fill, runnable_expressions};
use composer::{Notice, Registry, Session, SettingsDocument};

const EMPTY_SETTINGS: &str = "config = {\n}\n";

fn added(notice: &Notice) -> usize {
    notice
        .message
        .strip_prefix("added ")
        .and_then(|rest| rest.split(' ').next())
        .and_then(|count| count.parse().ok())
        .unwrap_or_else(|| panic!("unexpected notice: {notice}"))
}

// ============================================================================
// MISSING DEFAULTS
// ============================================================================

#[test]
fn test_defaults_are_idempotent_for_every_runnable() {
    let registry = Registry::global();
    for (name, written) in runnable_expressions(&registry, Fill::Required) {
        let mut session = Session::new();
        let parsed = session.parse_source(&program(&written), true);
        assert!(!parsed.is_error(), "Input: {written}\nGot: {parsed}");
        session.apply_settings(EMPTY_SETTINGS, None);

        let first = added(&session.add_missing_defaults(None));
        assert!(first > 0, "Input: {name}\nExpected: defaults added");
        let second = added(&session.add_missing_defaults(None));
        assert_eq!(
            second, 0,
            "Input: {name}\nExpected: nothing left to add\nGot: {second}"
        );

        let rendered = session.serialize_settings();
        let reparsed = SettingsDocument::parse(&rendered);
        assert!(
            reparsed.is_ok(),
            "Input: {name}\nExpected: parseable settings\nGot: {rendered}"
        );
    }
}

#[test]
fn test_solver_and_mesh_blocks_are_hoisted() {
    let mut session = Session::new();
    session.parse_source(
        &program(
            "SpatialDiscretization::FiniteElementMethod<Mesh::StructuredRegularFixedOfDimension<2>, BasisFunction::LagrangeOfOrder<1>, Quadrature::Gauss<2>, Equation::Static::Laplace>",
        ),
        true,
    );
    session.apply_settings(EMPTY_SETTINGS, None);
    session.add_missing_defaults(None);

    let settings = session.settings_document();
    let meshes = settings.get("Meshes").unwrap().value.as_container().unwrap();
    assert!(meshes.get("mesh0").is_some());
    let solvers = settings.get("Solvers").unwrap().value.as_container().unwrap();
    assert!(solvers.get("solver0").is_some());

    let fem = settings
        .get("FiniteElementMethod")
        .unwrap()
        .value
        .as_container()
        .unwrap();
    assert_eq!(
        fem.get("meshName").unwrap().value.as_literal(),
        Some("\"mesh0\"")
    );
    assert_eq!(
        fem.get("solverName").unwrap().value.as_literal(),
        Some("\"solver0\"")
    );
}
