//! Template expressions generated from the registry.

use composer::Registry;

/// How many slots of each class get an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Required,
    All,
}

/// A valid expression for `name`: every filled slot gets `1` when it takes
/// an integer, otherwise the first candidate that can itself be written
/// within `depth` nesting levels. `None` when no such expression exists.
pub fn expression(registry: &Registry, name: &str, fill: Fill, depth: usize) -> Option<String> {
    let Some(entry) = registry.get(name) else {
        return Some(name.to_string());
    };
    if !entry.has_template_arguments() {
        return Some(name.to_string());
    }
    if depth == 0 {
        return None;
    }

    let count = match fill {
        Fill::Required => entry.min_arity(),
        Fill::All => entry.arity(),
    };
    let mut arguments = Vec::with_capacity(count);
    for slot in entry.slots().iter().take(count) {
        let argument = if slot.accepts_integer() {
            Some("1".to_string())
        } else {
            slot.names()
                .find_map(|candidate| expression(registry, candidate, Fill::Required, depth - 1))
        }?;
        arguments.push(argument);
    }
    Some(format!("{name}<{}>", arguments.join(", ")))
}

/// Every runnable class with its minimal expression
pub fn runnable_expressions(registry: &Registry, fill: Fill) -> Vec<(String, String)> {
    registry
        .runnables()
        .map(|name| {
            let written = expression(registry, name, fill, 8)
                .unwrap_or_else(|| panic!("no expression for {name}"));
            (name.to_string(), written)
        })
        .collect()
}
