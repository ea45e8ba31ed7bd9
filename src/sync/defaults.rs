//! Completing node settings from the registry defaults.

use crate::registry::is_integer;
use crate::settings::{Aggregate, Container, ContainerKind, DictEntry, Item, ListEntry, Value};
use crate::tree::{NodeId, Tree};
use rustc_hash::FxHashSet;
use std::ops::AddAssign;
use std::sync::Arc;

/// What [`add_missing_defaults`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Additions {
    /// Scalar settings added
    pub settings: usize,
    /// Set when anything was added, empty containers and placeholders included
    pub modified: bool,
}

impl Additions {
    fn scalar() -> Self {
        Self {
            settings: 1,
            modified: true,
        }
    }

    fn structural() -> Self {
        Self {
            settings: 0,
            modified: true,
        }
    }

    /// One addition for `value`; only scalars are counted
    fn of_value(value: &Value) -> Self {
        match value {
            Value::Container(_) => Self::structural(),
            _ => Self::scalar(),
        }
    }
}

impl AddAssign for Additions {
    fn add_assign(&mut self, other: Self) {
        self.settings += other.settings;
        self.modified |= other.modified;
    }
}

/// Add every default setting of `node` and the nodes below it that is not
/// there yet.
///
/// Containers are added empty and then completed themselves. Solver and mesh
/// blocks are completed in place when their first key is already written,
/// otherwise under their name in the program's global `Solvers`/`Meshes`
/// dict, generating a name when the node has none.
pub fn add_missing_defaults(tree: &mut Tree, node: NodeId) -> Additions {
    let global = tree.take_config(tree.root());
    let mut filler = Filler {
        tree: &mut *tree,
        global,
    };
    let changes = filler.fill_node(node);
    let global = filler.global;
    let root = tree.root();
    tree.set_config(root, global);
    tracing::debug!(
        settings = changes.settings,
        modified = changes.modified,
        "added missing default settings"
    );
    changes
}

struct Filler<'t> {
    tree: &'t mut Tree,
    /// Settings of the root node, where solver and mesh blocks are hoisted
    global: Container,
}

impl Filler<'_> {
    fn fill_node(&mut self, id: NodeId) -> Additions {
        let registry = Arc::clone(self.tree.registry());
        let Some(defaults) = registry.defaults(self.tree[id].name()) else {
            return Additions::default();
        };

        let at_root = id == self.tree.root();
        let mut own = if at_root {
            std::mem::take(&mut self.global)
        } else {
            self.tree.take_config(id)
        };
        let mut slots = Vec::new();
        let global = if at_root { None } else { Some(&mut self.global) };
        let mut changes = fill_level(&mut own, defaults, global, &mut slots);
        if at_root {
            self.global = own;
        } else {
            self.tree.set_config(id, own);
        }

        let mut seen = FxHashSet::default();
        for slot in slots {
            if !seen.insert(slot) {
                continue;
            }
            let Some(child) = self.tree.child_in_slot(id, slot) else {
                continue;
            };
            let child_node = &self.tree[child];
            if child_node.is_placeholder() || is_integer(child_node.name()) {
                continue;
            }
            changes += self.fill_node(child);
        }
        changes
    }
}

/// Complete one container against its defaults. `global` is `None` where
/// solver and mesh blocks can only be completed in place. Slots of the child
/// placeholders seen on the way are pushed to `slots`.
fn fill_level(
    target: &mut Container,
    defaults: &Container,
    mut global: Option<&mut Container>,
    slots: &mut Vec<usize>,
) -> Additions {
    let mut changes = Additions::default();

    if target.is_list() && defaults.is_list() {
        if target.is_empty() && !defaults.is_empty() {
            target.set_comprehension(defaults.comprehension().map(str::to_string));
            for item in defaults.items() {
                if let Item::ListEntry(entry) = item {
                    changes += Additions::of_value(&entry.value);
                    target.push(Item::ListEntry(ListEntry {
                        value: emptied(&entry.value),
                        comments: entry.comments.clone(),
                    }));
                }
            }
        }
        let Some(first) = defaults
            .first_list_entry()
            .and_then(|entry| entry.value.as_container())
        else {
            return changes;
        };
        for item in target.items_mut() {
            if let Item::ListEntry(ListEntry {
                value: Value::Container(nested),
                ..
            }) = item
            {
                changes += fill_level(nested, first, global.as_deref_mut(), slots);
            }
        }
        return changes;
    }

    if !(target.is_dict() && defaults.is_dict()) {
        return changes;
    }

    let resolved = resolve_choices(defaults, target);
    for item in resolved.items() {
        match item {
            Item::ChildPlaceholder(slot) => {
                slots.push(*slot);
                if !target.has_child_placeholder(*slot) {
                    target.push(Item::ChildPlaceholder(*slot));
                    changes += Additions::structural();
                }
            }
            Item::DictEntry(entry) if !target.has_key(&entry.key) => {
                changes += Additions::of_value(&entry.value);
                tracing::trace!(key = %entry.key, "adding default setting");
                target.push(Item::DictEntry(DictEntry {
                    key: entry.key.clone(),
                    value: emptied(&entry.value),
                    comments: entry.comments.clone(),
                }));
            }
            Item::Aggregate(aggregate) => {
                changes += fill_aggregate(target, aggregate, global.as_deref_mut(), slots);
            }
            _ => {}
        }
    }

    for item in target.items_mut() {
        let Item::DictEntry(entry) = item else {
            continue;
        };
        let Some(default) = resolved
            .get(&entry.key)
            .and_then(|default| default.value.as_container())
        else {
            continue;
        };
        if let Some(nested) = entry.value.as_container_mut() {
            changes += fill_level(nested, default, global.as_deref_mut(), slots);
        }
    }
    changes
}

fn fill_aggregate(
    target: &mut Container,
    aggregate: &Aggregate,
    global: Option<&mut Container>,
    slots: &mut Vec<usize>,
) -> Additions {
    let defaults = Container::from_items(ContainerKind::Dict, aggregate.items.iter().cloned());
    let inline = aggregate
        .first_key()
        .is_none_or(|key| target.has_key(key));
    let Some(global) = global.filter(|_| !inline) else {
        return fill_level(target, &defaults, None, slots);
    };

    let mut changes = Additions::default();
    let kind = aggregate.kind;
    if !global.has_key(kind.global_key()) {
        changes += Additions::structural();
        global.push(Item::DictEntry(DictEntry::new(
            format!("\"{}\"", kind.global_key()),
            Container::dict(),
        )));
    }
    let Some(blocks) = global
        .get_mut(kind.global_key())
        .and_then(|entry| entry.value.as_container_mut())
        .filter(|blocks| blocks.is_dict())
    else {
        tracing::warn!(
            key = kind.global_key(),
            "global block dict is not a dict literal, can not add to it"
        );
        return changes;
    };

    let written = target
        .get(kind.name_key())
        .and_then(|entry| entry.value.as_literal())
        .map(str::to_string);
    let name = match written {
        Some(name) => name,
        None => {
            let name = (0..)
                .map(|index| format!("\"{}{index}\"", kind.name_prefix()))
                .find(|name| !blocks.has_key(name))
                .unwrap_or_default();
            target.push(Item::DictEntry(DictEntry::new(
                format!("\"{}\"", kind.name_key()),
                name.as_str(),
            )));
            changes += Additions::structural();
            name
        }
    };

    if !blocks.has_key(&name) {
        blocks.push(Item::DictEntry(DictEntry::new(name.clone(), Container::dict())));
        changes += Additions::structural();
    }
    if let Some(block) = blocks
        .get_mut(&name)
        .and_then(|entry| entry.value.as_container_mut())
    {
        changes += fill_level(block, &defaults, None, slots);
    }
    changes
}

/// Replace each choice group by its alternatives when one of their keys is
/// already written, by its defaults otherwise
fn resolve_choices(defaults: &Container, target: &Container) -> Container {
    let mut resolved = defaults.emptied();
    for item in defaults.items() {
        match item {
            Item::Choice(group) => {
                let alternative_written = group.alternatives.iter().any(|alternative| {
                    matches!(alternative, Item::DictEntry(entry) if target.has_key(&entry.key))
                });
                let chosen = if alternative_written {
                    &group.alternatives
                } else {
                    &group.defaults
                };
                resolved.extend(chosen.iter().cloned());
            }
            other => resolved.push(other.clone()),
        }
    }
    resolved
}

fn emptied(value: &Value) -> Value {
    match value {
        Value::Container(container) => Value::Container(container.emptied()),
        other => other.clone(),
    }
}
