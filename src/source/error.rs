//! Error types for program source parsing.

use crate::tree::TreeError;
use thiserror::Error;

/// Errors produced while reading the template expression out of a program
/// source. Offsets are byte offsets into the whitespace-collapsed expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceParseError {
    #[error("no `settings(argc, argv);` found in source")]
    MissingSettingsConstructor,

    #[error("no `problem(settings);` found after `settings(argc, argv);`")]
    MissingProblemDeclaration,

    #[error("unbalanced angle brackets at offset {offset}")]
    UnbalancedBrackets { offset: usize },

    #[error("empty template argument at offset {offset}")]
    EmptyArgument { offset: usize },

    #[error("no template expression between settings and problem")]
    EmptyExpression,

    #[error("expected one top-level template but found {count}")]
    MultipleTopLevel { count: usize },

    #[error(transparent)]
    Tree(#[from] TreeError),
}
