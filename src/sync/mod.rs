//! Settings synchronization
//!
//! Maps a settings dict written for the whole program (or one node) onto the
//! nodes of a [`Tree`]. Every node keeps the entries its registry defaults
//! know about; an unknown entry is offered to the children whose settings
//! sit in a child placeholder at that level, one after the other, until one
//! of them takes it. Whatever nobody takes is kept with a warning or dropped,
//! depending on [`SyncOptions::keep_unknown`].
//!
//! [`add_missing_defaults`] goes the other way and completes node settings
//! from the registry defaults.

mod defaults;

pub use defaults::{Additions, add_missing_defaults};

use crate::base::Notice;
use crate::settings::{Container, ContainerKind, DictEntry, Item, ListEntry, Value};
use crate::tree::{NodeId, Tree};

/// Keys that always stay where they are written
pub const RESERVED_KEYS: &[&str] = &["Solvers", "Meshes", "meta", "MappingsBetweenMeshes"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Keep entries no node has a default for
    pub keep_unknown: bool,
    /// Offer unknown entries to child nodes
    pub recurse_children: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            keep_unknown: true,
            recurse_children: true,
        }
    }
}

impl SyncOptions {
    pub fn with_keep_unknown(mut self, keep_unknown: bool) -> Self {
        self.keep_unknown = keep_unknown;
        self
    }

    pub fn with_recurse_children(mut self, recurse_children: bool) -> Self {
        self.recurse_children = recurse_children;
        self
    }
}

/// Replace the settings of `node` (and, when recursing, of every node below
/// it) by `settings`. Returns one warning per unknown entry and a trailing
/// info notice.
pub fn sync(tree: &mut Tree, node: NodeId, settings: Container, options: SyncOptions) -> Vec<Notice> {
    if options.recurse_children {
        tree.clear_configs(node);
    } else {
        tree.set_config(node, Container::dict());
    }

    let mut synchronizer = Synchronizer {
        tree: &mut *tree,
        options,
        notices: Vec::new(),
    };
    synchronizer.sync_node(node, settings, false);

    let mut notices = synchronizer.notices;
    notices.push(Notice::info(format!("written settings for {}", tree[node].name())));
    notices
}

struct Synchronizer<'t> {
    tree: &'t mut Tree,
    options: SyncOptions,
    notices: Vec<Notice>,
}

impl Synchronizer<'_> {
    /// Merge `incoming` into the top level of `id`'s settings. A call made
    /// on behalf of the parent returns what the node did not take.
    fn sync_node(&mut self, id: NodeId, incoming: Container, on_child: bool) -> Container {
        let defaults = self
            .tree
            .registry()
            .defaults(self.tree[id].name())
            .cloned()
            .unwrap_or_default();
        let mut own = self.tree.take_config(id);
        let rest = self.sync_level(id, incoming, &mut own, &defaults, on_child);
        self.tree.set_config(id, own);
        rest
    }

    fn sync_level(
        &mut self,
        id: NodeId,
        incoming: Container,
        target: &mut Container,
        defaults: &Container,
        on_child: bool,
    ) -> Container {
        let placeholders = defaults.child_placeholders();
        let known = flatten_defaults(defaults);
        let mut rest = Container::dict();

        for item in incoming.into_items() {
            match item {
                Item::DictEntry(entry) if RESERVED_KEYS.contains(&entry.name()) => {
                    target.push(Item::DictEntry(entry));
                }
                Item::DictEntry(entry) => match known.get(&entry.key) {
                    Some(default) => {
                        tracing::trace!(key = %entry.key, node = %self.tree[id].name(), "known setting");
                        let DictEntry {
                            key,
                            value,
                            comments,
                        } = entry;
                        let value = self.merge_value(id, value, Some(&default.value));
                        target.push(Item::DictEntry(DictEntry {
                            key,
                            value,
                            comments,
                        }));
                    }
                    None => self.delegate(id, entry, &placeholders, target, &mut rest, on_child),
                },
                Item::ListEntry(ListEntry { value, comments }) => {
                    let default = known.first_list_entry().map(|entry| &entry.value);
                    let value = self.merge_value(id, value, default);
                    target.push(Item::ListEntry(ListEntry { value, comments }));
                }
                Item::ChildPlaceholder(_) => {}
                other => target.push(other),
            }
        }

        for slot in placeholders {
            if !target.has_child_placeholder(slot) {
                target.push(Item::ChildPlaceholder(slot));
            }
        }
        rest
    }

    /// Containers are rebuilt against a non-empty default container; every
    /// other value is taken as written.
    fn merge_value(&mut self, id: NodeId, value: Value, default: Option<&Value>) -> Value {
        let default = default
            .and_then(Value::as_container)
            .filter(|container| !container.is_empty());
        match (value, default) {
            (Value::Container(incoming), Some(default)) => {
                let mut merged = incoming.emptied();
                self.sync_level(id, incoming, &mut merged, default, false);
                Value::Container(merged)
            }
            (value, _) => value,
        }
    }

    fn delegate(
        &mut self,
        id: NodeId,
        entry: DictEntry,
        placeholders: &[usize],
        target: &mut Container,
        rest: &mut Container,
        on_child: bool,
    ) {
        let mut pending = Container::from_items(ContainerKind::Dict, [Item::DictEntry(entry)]);
        if self.options.recurse_children {
            for &slot in placeholders {
                let Some(child) = self.tree.child_in_slot(id, slot) else {
                    continue;
                };
                if self.tree[child].is_placeholder() {
                    continue;
                }
                pending = self.sync_node(child, pending, true);
                if pending.is_empty() {
                    return;
                }
            }
        }

        for item in pending.into_items() {
            let Item::DictEntry(entry) = item else {
                continue;
            };
            let name = self.tree[id].name().to_string();
            if on_child {
                rest.push(Item::DictEntry(entry));
            } else if self.options.keep_unknown {
                tracing::warn!(key = %entry.key, node = %name, "keeping unknown setting");
                self.notices.push(Notice::warning(format!(
                    "{} is an unknown setting -> added it to {name} anyway",
                    entry.key
                )));
                target.push(Item::DictEntry(entry));
            } else {
                tracing::warn!(key = %entry.key, node = %name, "dropping unknown setting");
                self.notices.push(Notice::warning(format!(
                    "{} is an unknown setting -> it was NOT added to {name}",
                    entry.key
                )));
            }
        }
    }
}

/// One level of a default fragment with aggregates resolved to their name
/// key plus their entries, and choice groups to both alternatives
fn flatten_defaults(defaults: &Container) -> Container {
    let mut flat = defaults.emptied();
    for item in defaults.items() {
        match item {
            Item::Aggregate(aggregate) => {
                flat.push(Item::DictEntry(DictEntry::new(
                    aggregate.kind.name_key(),
                    "\"\"",
                )));
                flatten_choices(&aggregate.items, &mut flat);
            }
            other => flatten_choices(std::slice::from_ref(other), &mut flat),
        }
    }
    flat
}

fn flatten_choices(items: &[Item], out: &mut Container) {
    for item in items {
        match item {
            Item::Choice(group) => {
                out.extend(group.defaults.iter().cloned());
                out.extend(group.alternatives.iter().cloned());
            }
            other => out.push(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests;
