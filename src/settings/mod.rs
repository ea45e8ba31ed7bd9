//! Settings document model
//!
//! Parses and re-renders the Python-dict-literal configuration of a solver
//! program. Parsing is lossless: a document that is not modified renders back
//! byte for byte. Registry default fragments are built with [`builder`] and
//! use the two element kinds the parser never produces, choice groups and
//! named aggregates.

pub mod builder;
mod document;
mod error;
pub mod lexer;
mod model;
mod parser;
mod render;

pub use document::SettingsDocument;
pub use error::SettingsParseError;
pub use model::{
    Aggregate, AggregateKind, ChoiceGroup, Conditional, Container, ContainerKind, DictEntry, Item,
    ListEntry, Value, unquote,
};
pub use parser::child_placeholder_slot;
pub use render::{render_container, render_value};

/// Parse a bare `{ ... }` dict literal
pub fn parse_dict(text: &str) -> Result<Container, SettingsParseError> {
    parser::parse_dict_literal(text)
}
