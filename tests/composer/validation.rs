#![allow(clippy::unwrap_used)]

use crate::helpers::fixtures::program;
use crate::helpers::trees::{Fill, expression, runnable_expressions};
use composer::Registry;
use composer::source::parse;
use composer::validate::{ValidationError, validate};
use rstest::rstest;

fn errors(expression: &str) -> Vec<ValidationError> {
    let tree = parse(&program(expression), Registry::global()).unwrap();
    validate(&tree).err().unwrap_or_default()
}

// ============================================================================
// SOUNDNESS
// ============================================================================

#[rstest]
#[case::required(Fill::Required)]
#[case::all_slots(Fill::All)]
fn test_generated_trees_validate(#[case] fill: Fill) {
    let registry = Registry::global();
    for (name, written) in runnable_expressions(&registry, fill) {
        let got = errors(&written);
        assert!(
            got.is_empty(),
            "Input: {name} as {written}\nExpected: no errors\nGot: {got:?}"
        );
    }
}

// ============================================================================
// COMPLETENESS
// ============================================================================

#[test]
fn test_missing_required_argument_is_reported() {
    let registry = Registry::global();
    for name in registry.runnables() {
        let entry = registry.get(name).unwrap();
        if entry.min_arity() == 0 {
            continue;
        }
        let written = expression(&registry, name, Fill::Required, 8).unwrap();
        let inner = &written[name.len() + 1..written.len() - 1];
        let arguments = split_top_level(inner);
        let shortened = format!(
            "{name}<{}>",
            arguments[..arguments.len() - 1].join(", ")
        );

        let got = errors(&shortened);
        assert!(
            matches!(got.first(), Some(ValidationError::TooFewArguments { .. })),
            "Input: {shortened}\nExpected: too few arguments\nGot: {got:?}"
        );
    }
}

#[test]
fn test_extra_argument_is_reported() {
    let registry = Registry::global();
    for name in registry.runnables() {
        if !registry.get(name).unwrap().has_template_arguments() {
            continue;
        }
        let written = expression(&registry, name, Fill::All, 8).unwrap();
        let extended = if written.ends_with("<>") {
            format!("{name}<1>")
        } else {
            format!("{}, 1>", &written[..written.len() - 1])
        };
        let got = errors(&extended);
        let arity = registry.get(name).unwrap().arity();
        assert!(
            got.iter().any(|error| matches!(
                error,
                ValidationError::TooManyArguments { accepted, .. } if *accepted == arity
            )),
            "Input: {extended}\nExpected: too many arguments\nGot: {got:?}"
        );
    }
}

#[test]
fn test_foreign_argument_is_reported() {
    let registry = Registry::global();
    for name in registry.runnables() {
        let entry = registry.get(name).unwrap();
        let Some(slot) = entry.slot(0) else {
            continue;
        };
        if slot.accepts_integer() || entry.min_arity() == 0 {
            continue;
        }
        let written = expression(&registry, name, Fill::Required, 8).unwrap();
        let inner = &written[name.len() + 1..written.len() - 1];
        let mut arguments = split_top_level(inner);
        arguments[0] = "Unknown::Class".to_string();
        let replaced = format!("{name}<{}>", arguments.join(", "));

        let got = errors(&replaced);
        assert!(
            matches!(got.first(), Some(ValidationError::NotAccepted { .. })),
            "Input: {replaced}\nExpected: argument not accepted\nGot: {got:?}"
        );
    }
}

#[rstest]
#[case::not_runnable("Mesh::StructuredRegularFixedOfDimension<2>", "does not exist or is not runnable")]
#[case::unknown("NoSuchSolver<1>", "does not exist or is not runnable")]
#[case::brackets_on_leaf(
    "SpatialDiscretization::FiniteElementMethod<Mesh::StructuredRegularFixedOfDimension<2>, BasisFunction::LagrangeOfOrder<1>, Quadrature::Gauss<2>, Equation::Static::Laplace<>>",
    "Equation::Static::Laplace can not have any template_arguments (not even <>)"
)]
#[case::bad_quadrature(
    "SpatialDiscretization::FiniteElementMethod<Mesh::StructuredRegularFixedOfDimension<2>, BasisFunction::LagrangeOfOrder<1>, Quadrature::Gauss<9>, Equation::Static::Laplace>",
    "9 is not in the list of possible template_arguments for Quadrature::Gauss"
)]
fn test_single_error(#[case] expression: &str, #[case] expected: &str) {
    let got: Vec<String> = errors(expression).iter().map(ToString::to_string).collect();
    assert_eq!(got.len(), 1, "Input: {expression}\nGot: {got:?}");
    assert!(
        got[0].contains(expected),
        "Input: {expression}\nExpected: {expected}\nGot: {got:?}"
    );
}

/// Split at the commas not nested in angle brackets
fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    parts.push(current.trim().to_string());
    parts
}
