//! # solver-composer
//!
//! Core library for composing templated solver instantiations: parsing the
//! templated type expression of a solver program into a combination tree,
//! validating it against a schema of template classes, and keeping the
//! program's settings document in sync with the tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! session   → Public facade: parse, apply settings, edit, undo/redo
//!   ↓
//! history   → Snapshot stack with duplicate-on-mutate discipline
//!   ↓
//! sync      → Settings synchronizer and default injection
//!   ↓
//! validate  → Schema checks over a combination tree
//!   ↓
//! source    → Source-text parser and renderer
//!   ↓
//! tree      → Combination-tree arena with registry-sized slot arrays
//!   ↓
//! settings  → Logos lexer, document model, parser, serializer
//!   ↓
//! registry  → Schema registry of template classes
//!   ↓
//! base      → Primitives (Notice, Severity, Position, FormatOptions)
//! ```

// ============================================================================
// MODULES (dependency order: base → registry → settings → tree → source → ...)
// ============================================================================

/// Foundation types: notices, severities, positions, format options
pub mod base;

/// Schema registry: template classes, slots, default settings fragments
pub mod registry;

/// Settings document model: lexer, parser, serializer, builders
pub mod settings;

/// Combination tree: nodes, slots, placeholders, recursive config assembly
pub mod tree;

/// Source-text parser and renderer for templated instantiations
pub mod source;

/// Validation of combination trees against the registry
pub mod validate;

/// Settings synchronizer: mapping settings documents onto trees
pub mod sync;

/// Undo/redo history of tree snapshots
pub mod history;

/// Editing session facade
pub mod session;

mod error;

pub use base::{Notice, Position, Severity};
pub use error::ComposerError;
pub use registry::Registry;
pub use session::{Session, SessionOptions};
pub use settings::{Container, SettingsDocument};
pub use tree::{NodeId, Tree};
