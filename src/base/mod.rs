//! Foundation types for the composer.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Notice`], [`Severity`] - Human-readable operation outcomes
//! - [`Position`] - Line/column positions for error reporting
//! - [`FormatOptions`] - Indentation settings for the renderers
//!
//! This module has NO dependencies on other composer modules.

mod notice;
mod options;
mod position;

pub use notice::{Notice, Severity};
pub use options::FormatOptions;
pub use position::Position;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
