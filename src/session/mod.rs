//! Editing session
//!
//! [`Session`] owns the undo history of one program and is the single entry
//! point a front end talks to. Every operation reports its outcome as a
//! [`Notice`]; a mutating operation works on a fresh copy of the current tree
//! and takes the copy back when it fails or changes nothing.
//!
//! ```ignore
//! let mut session = Session::new();
//! session.parse_source(&source, true);
//! session.apply_settings(&settings, None);
//! let program = session.serialize_source();
//! let settings = session.serialize_settings();
//! ```

use crate::base::{FormatOptions, Notice};
use crate::error::ComposerError;
use crate::history::History;
use crate::registry::Registry;
use crate::settings::{Container, SettingsDocument, parse_dict};
use crate::source::{self, DEFAULT_TEMPLATE};
use crate::sync::{self, SyncOptions};
use crate::tree::{NodeId, Replacement, ReplacementOptions, Tree, TreeError};
use crate::validate::validate;
use std::sync::Arc;

/// Session-wide settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Keep settings no node has a default for when applying settings
    pub keep_unknown_settings: bool,
    /// Boilerplate program the rendered expression is spliced into
    pub template: String,
    /// Indentation of the serialized source and settings
    pub format: FormatOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            keep_unknown_settings: true,
            template: DEFAULT_TEMPLATE.to_string(),
            format: FormatOptions::default(),
        }
    }
}

impl SessionOptions {
    pub fn with_keep_unknown_settings(mut self, keep: bool) -> Self {
        self.keep_unknown_settings = keep;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }
}

pub struct Session {
    registry: Arc<Registry>,
    options: SessionOptions,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session over the built-in solver catalog
    pub fn new() -> Self {
        Self::with_registry(Registry::global())
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        let history = History::new(Tree::new(Arc::clone(&registry)));
        Self {
            registry,
            options: SessionOptions::default(),
            history,
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The tree of the current snapshot
    pub fn tree(&self) -> &Tree {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ------------------------------------------------------------------------
    // Source
    // ------------------------------------------------------------------------

    /// Read a program source into a new snapshot.
    ///
    /// Nothing is committed when the source does not parse, fails validation
    /// (with `validate_semantics`) or has the structure of the current tree.
    pub fn parse_source(&mut self, text: &str, validate_semantics: bool) -> Notice {
        match self.try_parse_source(text, validate_semantics) {
            Ok(notice) => notice,
            Err(error) => {
                tracing::debug!(%error, "source rejected");
                Notice::error(error.to_string())
            }
        }
    }

    fn try_parse_source(
        &mut self,
        text: &str,
        validate_semantics: bool,
    ) -> Result<Notice, ComposerError> {
        let mut tree = source::parse(text, Arc::clone(&self.registry))?;
        if validate_semantics {
            validate(&tree)?;
        }
        if tree.same_structure(self.tree()) {
            return Ok(Notice::info("no changes found in source"));
        }

        let current = self.tree();
        tree.set_settings_frame(
            current.settings_prefix().to_string(),
            current.settings_postfix().to_string(),
        );
        self.history.commit(tree);
        tracing::info!(snapshot = self.history.index(), "committed parsed source");
        Ok(Notice::info("parsed source successfully"))
    }

    pub fn serialize_source(&self) -> String {
        source::render_source_with(self.tree(), &self.options.template, &self.options.format)
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Map settings onto the tree.
    ///
    /// Without a target `text` is a whole settings file and is spread over
    /// every node from the root. With a target it is a bare `{...}` literal
    /// for that node alone; its children keep their settings.
    pub fn apply_settings(&mut self, text: &str, target: Option<NodeId>) -> Vec<Notice> {
        match self.try_apply_settings(text, target) {
            Ok(notices) => notices,
            Err(error) => vec![Notice::error(error.to_string())],
        }
    }

    fn try_apply_settings(
        &mut self,
        text: &str,
        target: Option<NodeId>,
    ) -> Result<Vec<Notice>, ComposerError> {
        let options =
            SyncOptions::default().with_keep_unknown(self.options.keep_unknown_settings);
        let notices = match target {
            None => {
                let (prefix, config, postfix) = SettingsDocument::parse(text)?.into_parts();
                let tree = self.history.duplicate_current();
                tree.set_settings_frame(prefix, postfix);
                let root = tree.root();
                sync::sync(tree, root, config, options)
            }
            Some(node) => {
                self.check_node(node)?;
                let config = parse_dict(text)?;
                let tree = self.history.duplicate_current();
                sync::sync(tree, node, config, options.with_recurse_children(false))
            }
        };
        tracing::info!(snapshot = self.history.index(), "applied settings");
        Ok(notices)
    }

    /// Settings of the whole program, assembled from every node
    pub fn settings_document(&self) -> Container {
        self.tree().settings()
    }

    /// The settings file: the frame around the last applied settings with
    /// the assembled dict in between
    pub fn serialize_settings(&self) -> String {
        let tree = self.tree();
        SettingsDocument::new(
            tree.settings_prefix(),
            tree.settings(),
            tree.settings_postfix(),
        )
        .render_with(&self.options.format)
    }

    /// Complete the settings of `target` (the whole program by default) from
    /// the registry defaults
    pub fn add_missing_defaults(&mut self, target: Option<NodeId>) -> Notice {
        if let Some(node) = target {
            if let Err(error) = self.check_node(node) {
                return Notice::from(&error);
            }
        }
        let tree = self.history.duplicate_current();
        let node = target.unwrap_or_else(|| tree.root());
        let changes = sync::add_missing_defaults(tree, node);
        if changes.modified {
            tracing::info!(
                settings = changes.settings,
                snapshot = self.history.index(),
                "added defaults"
            );
        } else {
            self.history.roll_back();
        }
        Notice::info(format!(
            "added {} missing default settings",
            changes.settings
        ))
    }

    // ------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------

    pub fn replace_node(&mut self, node: NodeId, replacement: &Replacement) -> Notice {
        let old = match self.check_node(node) {
            Ok(name) => name,
            Err(error) => return Notice::from(&error),
        };
        let result = self.history.duplicate_current().replace(node, replacement);
        match result {
            Ok(_) => {
                tracing::info!(%old, new = %replacement.name, "replaced node");
                Notice::info(format!("replaced {old} with {}", replacement.name))
            }
            Err(error) => {
                self.history.roll_back();
                Notice::from(&error)
            }
        }
    }

    /// Put a placeholder where `node` is
    pub fn delete_node(&mut self, node: NodeId) -> Notice {
        let old = match self.check_node(node) {
            Ok(name) => name,
            Err(error) => return Notice::from(&error),
        };
        let result = self.history.duplicate_current().delete(node);
        match result {
            Ok(_) => {
                tracing::info!(%old, "deleted node");
                Notice::info(format!("deleted {old}"))
            }
            Err(error) => {
                self.history.roll_back();
                Notice::from(&error)
            }
        }
    }

    pub fn possible_replacements(&self, node: NodeId) -> Option<ReplacementOptions> {
        self.tree().possible_replacements(node)
    }

    pub fn validate(&self) -> Vec<Notice> {
        match validate(self.tree()) {
            Ok(()) => vec![Notice::info("source is valid")],
            Err(errors) => errors.iter().map(Notice::from).collect(),
        }
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    pub fn undo(&mut self) -> Notice {
        match self.history.undo() {
            Ok(_) => Notice::info("undo successful"),
            Err(error) => Notice::from(&error),
        }
    }

    pub fn redo(&mut self) -> Notice {
        match self.history.redo() {
            Ok(_) => Notice::info("redo successful"),
            Err(error) => Notice::from(&error),
        }
    }

    /// Commit an empty program
    pub fn reset(&mut self) -> Notice {
        self.history.commit(Tree::new(Arc::clone(&self.registry)));
        tracing::info!(snapshot = self.history.index(), "reset");
        Notice::info("loaded empty simulation")
    }

    fn check_node(&self, node: NodeId) -> Result<String, TreeError> {
        self.tree()
            .get(node)
            .map(|found| found.name().to_string())
            .ok_or(TreeError::UnknownNode(node))
    }
}
