use super::NodeId;
use thiserror::Error;

/// A structural edit that does not apply to the tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("the root node can not be replaced or deleted")]
    RootNode,

    #[error("node {0} is not attached to a parent")]
    Detached(NodeId),

    #[error("{name} has no template argument slot {slot}")]
    NoSuchSlot { name: String, slot: usize },
}
