//! Assembling the settings of a subtree.

use super::{NodeId, Tree};
use crate::registry::is_integer;
use crate::settings::Container;
use rustc_hash::FxHashSet;

impl Tree {
    /// The settings of `id` with the settings of its children spliced in.
    ///
    /// A child goes into the placeholder tagged with its own slot. Without
    /// one it takes the first placeholder whose slot holds no real child.
    /// Integer-literal children carry no settings and are skipped.
    pub fn config_recursive(&self, id: NodeId) -> Container {
        let mut config = self.config(id).clone();
        let filled: Vec<(usize, NodeId)> = self[id]
            .slots()
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, child)| !self[child].is_placeholder())
            .collect();
        let claimed: FxHashSet<usize> = filled.iter().map(|&(slot, _)| slot).collect();

        for (slot, child) in filled {
            if is_integer(self[child].name()) {
                continue;
            }
            let child_config = self.config_recursive(child);
            if !config.replace_child_placeholder_at(slot, &child_config)
                && !config.replace_child_placeholder_where(|tagged| !claimed.contains(&tagged), &child_config)
            {
                tracing::trace!(
                    parent = %self[id].name(),
                    child = %self[child].name(),
                    "no placeholder left for child settings"
                );
            }
        }
        config
    }

    /// The settings of the whole program, without leftover placeholders
    pub fn settings(&self) -> Container {
        let mut config = self.config_recursive(self.root());
        config.remove_child_placeholders();
        config
    }

    /// Reset the settings of `id` and every real node below it to empty
    /// dicts
    pub fn clear_configs(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            self.set_config(current, Container::dict());
            stack.extend(self.real_children(current));
        }
    }
}
