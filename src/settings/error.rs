//! Error types for settings parsing.

use crate::base::{Position, TextSize};
use thiserror::Error;

/// Errors produced while parsing a settings document.
///
/// Parsing never yields a partial document: any of these aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsParseError {
    /// The document has no `config = {` line.
    #[error("no `config = {{` found in settings")]
    MissingAnchor,

    /// The `config = {` block is never closed by a line starting with `}`.
    #[error("no closing `}}` line found for `config = {{`")]
    MissingClosingLine,

    /// Malformed dict-literal syntax.
    #[error("{message} at {position}")]
    Syntax {
        message: String,
        offset: TextSize,
        position: Position,
    },
}

impl SettingsParseError {
    /// Create a syntax error located at `offset` in `text`.
    pub fn syntax(text: &str, offset: TextSize, message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
            position: Position::of_offset(text, offset),
        }
    }

    /// Byte offset of a syntax error
    pub fn offset(&self) -> Option<TextSize> {
        match self {
            Self::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
