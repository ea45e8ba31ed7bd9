//! Combination tree
//!
//! The template instantiation a solver program is built from, as a tree of
//! class names. Every node owns an ordered array of child slots whose length
//! is the class's arity in the [`Registry`]; unfilled slots hold placeholder
//! nodes. Nodes live in an arena owned by the [`Tree`] and refer to each other
//! by [`NodeId`], so cloning a tree clones every parent link along with it.
//! The arena entries of a replaced or deleted subtree are reused by the next
//! nodes created.
//!
//! Each node also carries its own settings fragment. [`Tree::config_recursive`]
//! assembles the settings of a whole subtree by splicing every child's
//! fragment into the child placeholder of its slot.

mod config;
mod error;
mod node;

pub use error::TreeError;
pub use node::{Node, NodeId, NodeKind, Replacement, ReplacementOptions};

use crate::registry::{ClassEntry, ROOT_NAME, Registry, Slot};
use crate::settings::Container;
use smol_str::SmolStr;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

#[derive(Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    registry: Arc<Registry>,
    settings_prefix: String,
    settings_postfix: String,
    /// Arena entries of detached subtrees, free for reuse
    free: Vec<NodeId>,
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl Tree {
    /// An empty program: the root with one unfilled slot and the global
    /// default settings.
    pub fn new(registry: Arc<Registry>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            registry,
            settings_prefix: String::new(),
            settings_postfix: String::new(),
            free: Vec::new(),
        };
        tree.root = tree.create(ROOT_NAME, String::new(), true);
        tree
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// The program's outermost class, the root's only real child
    pub fn top_level(&self) -> Option<NodeId> {
        self.real_children(self.root).next()
    }

    /// Filled slots of `id` in slot order
    pub fn real_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self[id]
            .slots()
            .iter()
            .copied()
            .filter(|&child| !self[child].is_placeholder())
    }

    /// Position of `id` in its parent's slot array
    pub fn slot_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.get(id)?.parent?;
        self[parent].slots().iter().position(|&child| child == id)
    }

    pub fn child_in_slot(&self, id: NodeId, slot: usize) -> Option<NodeId> {
        self.get(id)?.slots().get(slot).copied()
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn config(&self, id: NodeId) -> &Container {
        &self[id].config
    }

    pub fn config_mut(&mut self, id: NodeId) -> &mut Container {
        &mut self.nodes[id.index()].config
    }

    pub fn set_config(&mut self, id: NodeId, config: Container) {
        self.nodes[id.index()].config = config;
    }

    /// Move the settings of `id` out, leaving an empty dict
    pub fn take_config(&mut self, id: NodeId) -> Container {
        std::mem::take(&mut self.nodes[id.index()].config)
    }

    /// Text before `config = ` in the settings file
    pub fn settings_prefix(&self) -> &str {
        &self.settings_prefix
    }

    /// Text after the closing line of the settings dict
    pub fn settings_postfix(&self) -> &str {
        &self.settings_postfix
    }

    pub fn set_settings_frame(&mut self, prefix: String, postfix: String) {
        self.settings_prefix = prefix;
        self.settings_postfix = postfix;
    }

    // ------------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------------

    /// Build the slot array of `id` from the registry; a no-op once built.
    /// Names without a registry entry get no slots.
    pub fn materialize_slots(&mut self, id: NodeId) {
        if self[id].slots.is_some() {
            return;
        }
        let arity = self
            .registry
            .get(self[id].name())
            .map_or(0, ClassEntry::arity);
        let slots = (0..arity)
            .map(|slot| self.new_placeholder(id, slot))
            .collect();
        self.nodes[id.index()].slots = Some(slots);
    }

    /// Put a fresh node for `replacement` where `target` is; the replaced
    /// subtree is detached.
    pub fn replace(
        &mut self,
        target: NodeId,
        replacement: &Replacement,
    ) -> Result<NodeId, TreeError> {
        let (parent, slot) = self.position(target)?;
        let id = self.create(
            &replacement.name,
            String::new(),
            replacement.can_have_children,
        );
        self.put(parent, slot, id);
        Ok(id)
    }

    /// Fill slot `slot` of `parent`, whatever it currently holds
    pub fn replace_placeholder(
        &mut self,
        parent: NodeId,
        slot: usize,
        replacement: &Replacement,
    ) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        let target = self
            .child_in_slot(parent, slot)
            .ok_or_else(|| TreeError::NoSuchSlot {
                name: self[parent].name().to_string(),
                slot,
            })?;
        self.replace(target, replacement)
    }

    /// Fill the first unfilled slot of `parent`. Without one the node is
    /// appended past the arity, which the validator then reports.
    pub fn replace_next_placeholder(
        &mut self,
        parent: NodeId,
        replacement: &Replacement,
        comment: &str,
    ) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        self.materialize_slots(parent);
        let next = self[parent]
            .slots()
            .iter()
            .position(|&child| self[child].is_placeholder());

        let id = self.create(
            &replacement.name,
            comment.to_string(),
            replacement.can_have_children,
        );
        match next {
            Some(slot) => self.put(parent, slot, id),
            None => {
                self.nodes[id.index()].parent = Some(parent);
                if let Some(slots) = self.nodes[parent.index()].slots.as_mut() {
                    slots.push(id);
                }
            }
        }
        Ok(id)
    }

    /// Revert the slot holding `target` to a fresh placeholder; the slot
    /// array keeps its length.
    pub fn delete(&mut self, target: NodeId) -> Result<NodeId, TreeError> {
        let (parent, slot) = self.position(target)?;
        let placeholder = self.new_placeholder(parent, slot);
        self.put(parent, slot, placeholder);
        Ok(placeholder)
    }

    pub fn set_comment(&mut self, id: NodeId, comment: &str) -> Result<(), TreeError> {
        self.check(id)?;
        self.nodes[id.index()].comment = comment.to_string();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// What may take the place of `id`, from its parent's slot. `None` for
    /// the root and for slots the registry does not describe.
    pub fn possible_replacements(&self, id: NodeId) -> Option<ReplacementOptions> {
        let slot = self.describing_slot(id)?;
        let candidates = slot
            .names()
            .map(|name| {
                let can_have_children = self
                    .registry
                    .get(name)
                    .is_some_and(ClassEntry::has_template_arguments);
                Replacement::new(name, can_have_children)
            })
            .collect();
        Some(ReplacementOptions {
            description: slot.description().to_string(),
            candidates,
            accepts_integer: slot.accepts_integer(),
        })
    }

    /// Description of the parent slot holding `id`
    pub fn contextual_description(&self, id: NodeId) -> Option<&str> {
        self.describing_slot(id)
            .map(Slot::description)
    }

    /// Same class names, comments, bracket usage and real children, ignoring
    /// settings.
    pub fn same_structure(&self, other: &Tree) -> bool {
        self.same_subtree(self.root, other, other.root)
    }

    fn same_subtree(&self, id: NodeId, other: &Tree, other_id: NodeId) -> bool {
        let (a, b) = (&self[id], &other[other_id]);
        if a.name != b.name
            || a.comment != b.comment
            || a.can_have_children != b.can_have_children
        {
            return false;
        }
        let mine: Vec<_> = self.real_children(id).collect();
        let theirs: Vec<_> = other.real_children(other_id).collect();
        mine.len() == theirs.len()
            && mine
                .into_iter()
                .zip(theirs)
                .all(|(a, b)| self.same_subtree(a, other, b))
    }

    /// Pre-order walk from the root with depths, placeholders included
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(self.root, 0)],
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        match self.get(id) {
            Some(_) => Ok(()),
            None => Err(TreeError::UnknownNode(id)),
        }
    }

    /// Parent and slot index of an attached, non-root node
    fn position(&self, id: NodeId) -> Result<(NodeId, usize), TreeError> {
        self.check(id)?;
        if id == self.root {
            return Err(TreeError::RootNode);
        }
        let parent = self[id].parent.ok_or(TreeError::Detached(id))?;
        let slot = self.slot_index(id).ok_or(TreeError::Detached(id))?;
        Ok((parent, slot))
    }

    fn describing_slot(&self, id: NodeId) -> Option<&Slot> {
        let parent = self.get(id)?.parent?;
        let slot = self.slot_index(id)?;
        self.registry.get(self[parent].name())?.slot(slot)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Hand the entries of the detached subtree at `id` back to the arena.
    /// Each one is left as a parentless placeholder until it is reused.
    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let vacant = std::mem::replace(&mut self.nodes[current.index()], Node::placeholder(false));
            stack.extend(vacant.slots.unwrap_or_default());
            self.free.push(current);
        }
    }

    /// A detached node with its registry defaults and materialized slots
    fn create(&mut self, name: &str, comment: String, can_have_children: bool) -> NodeId {
        let mut node = Node::template(SmolStr::new(name), comment, can_have_children);
        if let Some(defaults) = self.registry.defaults(name) {
            node.config = defaults.materialized();
        }
        let id = self.alloc(node);
        self.materialize_slots(id);
        id
    }

    fn new_placeholder(&mut self, parent: NodeId, slot: usize) -> NodeId {
        let required = slot
            < self
                .registry
                .get(self[parent].name())
                .map_or(0, ClassEntry::min_arity);
        let mut node = Node::placeholder(required);
        node.parent = Some(parent);
        self.alloc(node)
    }

    /// Store `id` in `slot` of `parent`, detaching the previous occupant
    fn put(&mut self, parent: NodeId, slot: usize, id: NodeId) {
        let previous = self.nodes[parent.index()]
            .slots
            .as_mut()
            .and_then(|slots| slots.get_mut(slot))
            .map(|entry| std::mem::replace(entry, id));
        self.nodes[id.index()].parent = Some(parent);
        if let Some(previous) = previous {
            self.release(previous);
        }
    }
}

/// Iterator returned by [`Tree::walk`]
pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        self.stack.extend(
            self.tree[id]
                .slots()
                .iter()
                .rev()
                .map(|&child| (child, depth + 1)),
        );
        Some((id, depth))
    }
}

#[cfg(test)]
mod tests;
