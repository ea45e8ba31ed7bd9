//! Validation of a combination tree against the registry
//!
//! The checker walks every real node below the root and collects all
//! violations instead of stopping at the first one:
//!
//! - the root's only child must be a runnable class;
//! - the number of written arguments must lie within the class's arity;
//! - a class without template arguments must not be written `Name<>`;
//! - every argument must be accepted by its slot.
//!
//! Names the registry does not know are leaves and always valid.

use crate::registry::{ClassEntry, INTEGER_MARKER, Registry, Slot};
use crate::tree::{NodeId, Tree};
use thiserror::Error;

/// A way in which a tree breaks the registry's rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{name} does not exist or is not runnable")]
    NotRunnable { node: NodeId, name: String },

    #[error("GLOBAL needs exactly 1 child (0 given)")]
    EmptyProgram,

    #[error(
        "{name} has the wrong number of template_arguments: needs at least {needed} but {given} given"
    )]
    TooFewArguments {
        node: NodeId,
        name: String,
        needed: usize,
        given: usize,
    },

    #[error(
        "{name} has the wrong number of template_arguments: accepts at most {accepted} but {given} given"
    )]
    TooManyArguments {
        node: NodeId,
        name: String,
        accepted: usize,
        given: usize,
    },

    #[error("{name} is missing template_argument {slot} ({description})")]
    MissingArgument {
        node: NodeId,
        name: String,
        slot: usize,
        description: String,
    },

    #[error("{name} can not have any template_arguments (not even <>)")]
    UnexpectedArguments { node: NodeId, name: String },

    #[error("{name} is not an Integer")]
    NotAnInteger { node: NodeId, name: String },

    #[error(
        "{name} is not in the list of possible template_arguments for {parent}\npossible template_arguments are: {possible}"
    )]
    NotAccepted {
        node: NodeId,
        name: String,
        parent: String,
        possible: String,
    },
}

impl ValidationError {
    /// The offending node, if there is one
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::EmptyProgram => None,
            Self::NotRunnable { node, .. }
            | Self::TooFewArguments { node, .. }
            | Self::TooManyArguments { node, .. }
            | Self::MissingArgument { node, .. }
            | Self::UnexpectedArguments { node, .. }
            | Self::NotAnInteger { node, .. }
            | Self::NotAccepted { node, .. } => Some(*node),
        }
    }
}

/// Check the whole tree, returning every violation found
pub fn validate(tree: &Tree) -> Result<(), Vec<ValidationError>> {
    let mut checker = Checker::new(tree);
    checker.check_root();
    checker.finish()
}

struct Checker<'a> {
    tree: &'a Tree,
    registry: &'a Registry,
    errors: Vec<ValidationError>,
}

impl<'a> Checker<'a> {
    fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            registry: tree.registry(),
            errors: Vec::new(),
        }
    }

    fn check_root(&mut self) {
        let Some(top) = self.tree.top_level() else {
            self.errors.push(ValidationError::EmptyProgram);
            return;
        };
        let name = self.tree[top].name();
        if !self.registry.is_runnable(name) {
            self.errors.push(ValidationError::NotRunnable {
                node: top,
                name: name.to_string(),
            });
        }
        self.check_node(top);
    }

    fn check_node(&mut self, id: NodeId) {
        let node = &self.tree[id];
        let Some(entry) = self.registry.get(node.name()) else {
            return;
        };

        if !entry.has_template_arguments() {
            if node.can_have_children() {
                self.errors.push(ValidationError::UnexpectedArguments {
                    node: id,
                    name: node.name().to_string(),
                });
            }
            return;
        }

        self.check_arity(id, entry);

        let slots: Vec<(usize, NodeId)> = node.slots().iter().copied().enumerate().collect();
        for (index, child) in slots {
            if self.tree[child].is_placeholder() {
                continue;
            }
            if let Some(slot) = entry.slot(index) {
                self.check_argument(id, child, slot);
            }
            self.check_node(child);
        }
    }

    fn check_arity(&mut self, id: NodeId, entry: &ClassEntry) {
        let name = self.tree[id].name();
        let given = self.tree.real_children(id).count();
        if given < entry.min_arity() {
            self.errors.push(ValidationError::TooFewArguments {
                node: id,
                name: name.to_string(),
                needed: entry.min_arity(),
                given,
            });
            return;
        }
        if given > entry.arity() {
            self.errors.push(ValidationError::TooManyArguments {
                node: id,
                name: name.to_string(),
                accepted: entry.arity(),
                given,
            });
            return;
        }

        // enough arguments, but written into optional slots
        for (index, slot) in entry.slots().iter().enumerate().take(entry.min_arity()) {
            let filled = self
                .tree
                .child_in_slot(id, index)
                .is_some_and(|child| !self.tree[child].is_placeholder());
            if !filled {
                self.errors.push(ValidationError::MissingArgument {
                    node: id,
                    name: name.to_string(),
                    slot: index,
                    description: slot.description().to_string(),
                });
            }
        }
    }

    fn check_argument(&mut self, parent: NodeId, child: NodeId, slot: &Slot) {
        let name = self.tree[child].name();
        if slot.accepts(name) {
            return;
        }
        let error = if slot.accepts_integer() && slot.names().next().is_none() {
            ValidationError::NotAnInteger {
                node: child,
                name: name.to_string(),
            }
        } else {
            ValidationError::NotAccepted {
                node: child,
                name: name.to_string(),
                parent: self.tree[parent].name().to_string(),
                possible: possible_arguments(slot),
            }
        };
        self.errors.push(error);
    }

    fn finish(self) -> Result<(), Vec<ValidationError>> {
        tracing::debug!(errors = self.errors.len(), "validated tree");
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// `['A', 'B', 'Integer']`
fn possible_arguments(slot: &Slot) -> String {
    let mut names: Vec<String> = slot.names().map(|name| format!("'{name}'")).collect();
    if slot.accepts_integer() {
        names.push(format!("'{}'", INTEGER_MARKER));
    }
    format!("[{}]", names.join(", "))
}
