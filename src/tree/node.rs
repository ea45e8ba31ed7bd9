use crate::settings::Container;
use smol_str::SmolStr;
use std::fmt;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A template class or an integer literal
    Template,
    /// An unfilled slot; `required` while the slot index is below the
    /// parent's minimum arity
    Placeholder { required: bool },
}

/// One position of the combination tree
#[derive(Debug, Clone)]
pub struct Node {
    pub(super) name: SmolStr,
    pub(super) comment: String,
    pub(super) can_have_children: bool,
    pub(super) kind: NodeKind,
    /// `None` until the slots are materialized from the registry
    pub(super) slots: Option<Vec<NodeId>>,
    pub(super) config: Container,
    pub(super) parent: Option<NodeId>,
}

impl Node {
    pub(super) fn template(name: SmolStr, comment: String, can_have_children: bool) -> Self {
        Self {
            name,
            comment,
            can_have_children,
            kind: NodeKind::Template,
            slots: None,
            config: Container::dict(),
            parent: None,
        }
    }

    pub(super) fn placeholder(required: bool) -> Self {
        Self {
            name: SmolStr::default(),
            comment: String::new(),
            can_have_children: false,
            kind: NodeKind::Placeholder { required },
            slots: Some(Vec::new()),
            config: Container::dict(),
            parent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Whether the node is written with angle brackets
    pub fn can_have_children(&self) -> bool {
        self.can_have_children
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder { .. })
    }

    pub fn is_required(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder { required: true })
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's own settings, with child placeholders where the settings
    /// of its children belong
    pub fn config(&self) -> &Container {
        &self.config
    }

    /// Child slots; empty until materialized
    pub fn slots(&self) -> &[NodeId] {
        self.slots.as_deref().unwrap_or(&[])
    }
}

/// A candidate for filling a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub name: SmolStr,
    pub can_have_children: bool,
}

impl Replacement {
    pub fn new(name: &str, can_have_children: bool) -> Self {
        Self {
            name: SmolStr::new(name),
            can_have_children,
        }
    }

    /// An integer literal argument
    pub fn integer(value: i64) -> Self {
        Self {
            name: SmolStr::new(value.to_string()),
            can_have_children: false,
        }
    }
}

/// What may fill a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementOptions {
    pub description: String,
    pub candidates: Vec<Replacement>,
    /// The slot also takes an integer literal, to be asked from the user
    pub accepts_integer: bool,
}
