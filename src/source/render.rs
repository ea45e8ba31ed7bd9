//! Rendering a combination tree back to program source.

use crate::base::FormatOptions;
use crate::tree::{NodeId, Tree};

/// Where the rendered expression goes in the boilerplate
pub const PROBLEM_ANCHOR: &str = " problem(settings)";

/// Splice the tree's top-level template into `template` in front of
/// [`PROBLEM_ANCHOR`]. Without a top-level node, or without the anchor, the
/// template comes back unchanged.
pub fn render_source(tree: &Tree, template: &str) -> String {
    render_source_with(tree, template, &FormatOptions::default())
}

/// [`render_source`] with the given indentation
pub fn render_source_with(tree: &Tree, template: &str, options: &FormatOptions) -> String {
    let Some(top) = tree.top_level() else {
        return template.to_string();
    };
    let Some(anchor) = template.find(PROBLEM_ANCHOR) else {
        tracing::warn!("boilerplate has no `{}` anchor", PROBLEM_ANCHOR.trim());
        return template.to_string();
    };

    let mut expression = String::new();
    let comment = tree[top].comment();
    if !comment.is_empty() {
        expression.push_str("//");
        expression.push_str(comment);
        expression.push('\n');
    }
    expression.push_str(&render_node(tree, top, 0, options));

    let pad = options.indent(1);
    let indented = format!("{pad}{}", expression.replace('\n', &format!("\n{pad}")));
    format!("{}{indented}{}", &template[..anchor], &template[anchor..])
}

/// `Name<child, child //comment>` with one indentation level per depth
pub fn render_node(tree: &Tree, id: NodeId, depth: usize, options: &FormatOptions) -> String {
    let node = &tree[id];
    let children: Vec<NodeId> = tree.real_children(id).collect();
    if children.is_empty() {
        return if node.can_have_children() {
            format!("{}<>", node.name())
        } else {
            node.name().to_string()
        };
    }

    let mut out = format!("{}<", node.name());
    let last = children.len() - 1;
    for (index, &child) in children.iter().enumerate() {
        out.push('\n');
        out.push_str(&options.indent(depth + 1));
        out.push_str(&render_node(tree, child, depth + 1, options));
        if index < last {
            out.push(',');
        }
        let comment = tree[child].comment();
        if !comment.is_empty() {
            out.push_str(" //");
            out.push_str(comment);
        }
    }
    out.push('\n');
    out.push_str(&options.indent(depth));
    out.push('>');
    out
}
