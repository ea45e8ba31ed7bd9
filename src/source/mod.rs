//! Program source
//!
//! Reads the template expression of a solver program (the text between
//! `settings(argc, argv);` and `problem(settings);`) into a [`Tree`], and
//! renders a tree back into a boilerplate program.

mod brackets;
mod error;
pub mod preprocess;
mod render;

pub use brackets::{ParsedNode, parse_expression};
pub use error::SourceParseError;
pub use render::{PROBLEM_ANCHOR, render_node, render_source, render_source_with};

use crate::registry::Registry;
use crate::tree::{NodeId, Replacement, Tree};
use std::sync::Arc;

/// Boilerplate program the rendered expression is spliced into
pub const DEFAULT_TEMPLATE: &str = include_str!("template.cpp");

/// Parse a program source into a fresh tree.
///
/// Nodes fill their parent's slots left to right as they are written; the
/// tree is not checked against the registry here.
pub fn parse(source: &str, registry: Arc<Registry>) -> Result<Tree, SourceParseError> {
    let expression = preprocess::template_expression(source)?;
    let top = parse_expression(&expression)?;
    let mut tree = Tree::new(registry);
    let root = tree.root();
    attach(&mut tree, root, &top)?;
    Ok(tree)
}

fn attach(tree: &mut Tree, parent: NodeId, node: &ParsedNode) -> Result<(), SourceParseError> {
    let replacement = Replacement::new(&node.name, node.can_have_children);
    let id = tree.replace_next_placeholder(parent, &replacement, &node.comment)?;
    for child in &node.children {
        attach(tree, id, child)?;
    }
    Ok(())
}
