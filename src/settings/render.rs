//! Settings serializer.
//!
//! Untouched containers are emitted exactly as parsed. Everything else is
//! written in the canonical layout: one item per line, one indentation level
//! per depth, `key : value`, a comma after every item but the last and
//! attached comments separated by a single space.

use super::model::{Container, Item, Value};
use crate::base::FormatOptions;

/// Render a container whose opening bracket sits at indentation `depth`
pub fn render_container(container: &Container, depth: usize, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_container(&mut out, container, depth, options);
    out
}

/// Render a value whose line sits at indentation `depth`
pub fn render_value(value: &Value, depth: usize, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, value, depth, options);
    out
}

fn write_container(out: &mut String, container: &Container, depth: usize, options: &FormatOptions) {
    if let Some(text) = container.source_text() {
        out.push_str(text);
        return;
    }

    let (open, close) = container.kind().delimiters();
    let items = flatten(container.items());
    if items.is_empty() {
        out.push(open);
        out.push(close);
        return;
    }

    let last_entry = items.iter().rposition(|item| item.is_entry());
    let indent = options.indent(depth + 1);

    out.push(open);
    for (index, item) in items.iter().enumerate() {
        out.push('\n');
        let separator = if index + 1 < items.len() { "," } else { "" };
        match item {
            Item::DictEntry(entry) => {
                out.push_str(&indent);
                out.push_str(&entry.key);
                out.push_str(" : ");
                write_value(out, &entry.value, depth + 1, options);
                out.push_str(separator);
                write_comments(out, &entry.comments);
            }
            Item::ListEntry(entry) => {
                out.push_str(&indent);
                write_value(out, &entry.value, depth + 1, options);
                if Some(index) == last_entry {
                    if let Some(comprehension) = container.comprehension() {
                        out.push(' ');
                        out.push_str(comprehension);
                    }
                }
                out.push_str(separator);
                write_comments(out, &entry.comments);
            }
            Item::Comment(text) => {
                out.push_str(&indent);
                out.push_str(text);
            }
            Item::EmptyLine => {}
            Item::ChildPlaceholder(slot) => {
                out.push_str(&indent);
                out.push_str(&format!("### CHILD {slot} ###"));
            }
            // flattened away above
            Item::Choice(_) | Item::Aggregate(_) => {}
        }
    }
    out.push('\n');
    out.push_str(&options.indent(depth));
    out.push(close);
}

fn write_value(out: &mut String, value: &Value, depth: usize, options: &FormatOptions) {
    match value {
        Value::Literal(text) => out.push_str(text),
        Value::Container(container) => write_container(out, container, depth, options),
        Value::Conditional(conditional) => {
            write_value(out, &conditional.if_value, depth, options);
            out.push_str(" if ");
            out.push_str(&conditional.condition);
            out.push_str(" else ");
            write_value(out, &conditional.else_value, depth, options);
        }
    }
}

fn write_comments(out: &mut String, comments: &[String]) {
    for comment in comments {
        out.push(' ');
        out.push_str(comment);
    }
}

/// Choice groups render their default alternative, aggregates their entries.
fn flatten(items: &[Item]) -> Vec<&Item> {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Choice(group) => flat.extend(flatten(&group.defaults)),
            Item::Aggregate(aggregate) => flat.extend(flatten(&aggregate.items)),
            other => flat.push(other),
        }
    }
    flat
}
