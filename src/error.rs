//! Error type for session operations.

use crate::history::HistoryError;
use crate::settings::SettingsParseError;
use crate::source::SourceParseError;
use crate::tree::TreeError;
use crate::validate::ValidationError;
use thiserror::Error;

/// Everything a session operation can fail with.
///
/// The session reports these as error [`Notice`](crate::Notice)s; they only
/// surface as values through the fallible building blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    #[error("failed to parse source: {0}")]
    Source(#[from] SourceParseError),

    #[error("failed to parse settings: {0}")]
    Settings(#[from] SettingsParseError),

    /// Every problem the validator found, in tree order.
    #[error("{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl From<Vec<ValidationError>> for ComposerError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
