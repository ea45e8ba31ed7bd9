//! Undo/redo over whole-tree snapshots.


use crate::tree::Tree;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("cannot undo")]
    NothingToUndo,

    #[error("cannot redo")]
    NothingToRedo,
}

/// A linear list of snapshots and the index of the one in use.
///
/// Mutating operations first [`duplicate_current`](History::duplicate_current)
/// and edit the copy; a failed or empty edit is taken back with
/// [`roll_back`](History::roll_back), which also restores the redo snapshots
/// the duplicate displaced.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Tree>,
    current: usize,
    /// Snapshots cut off by the last `duplicate_current`
    displaced: Vec<Tree>,
}

impl History {
    pub fn new(tree: Tree) -> Self {
        Self {
            snapshots: vec![tree],
            current: 0,
            displaced: Vec::new(),
        }
    }

    pub fn current(&self) -> &Tree {
        &self.snapshots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Tree {
        &mut self.snapshots[self.current]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Drop every snapshot after the current one and make `tree` current
    pub fn commit(&mut self, tree: Tree) {
        self.displaced.clear();
        self.truncate_future();
        self.snapshots.push(tree);
        self.current = self.snapshots.len() - 1;
    }

    /// Commit a deep copy of the current snapshot. The redo snapshots it
    /// cuts off are kept until the next commit, undo or redo so that
    /// [`roll_back`](History::roll_back) can put them back.
    pub fn duplicate_current(&mut self) -> &mut Tree {
        let copy = self.current().clone();
        self.displaced = self.snapshots.split_off(self.current + 1);
        self.snapshots.push(copy);
        self.current += 1;
        self.current_mut()
    }

    pub fn undo(&mut self) -> Result<&Tree, HistoryError> {
        if self.current == 0 {
            return Err(HistoryError::NothingToUndo);
        }
        self.displaced.clear();
        self.current -= 1;
        Ok(self.current())
    }

    pub fn redo(&mut self) -> Result<&Tree, HistoryError> {
        if self.current + 1 >= self.snapshots.len() {
            return Err(HistoryError::NothingToRedo);
        }
        self.displaced.clear();
        self.current += 1;
        Ok(self.current())
    }

    pub fn truncate_future(&mut self) {
        self.snapshots.truncate(self.current + 1);
    }

    /// Take back the edit made on the current snapshot and forget it. Right
    /// after [`duplicate_current`](History::duplicate_current) this leaves
    /// the history exactly as it was before the duplicate.
    pub fn roll_back(&mut self) {
        let displaced = std::mem::take(&mut self.displaced);
        if self.current == 0 {
            return;
        }
        self.current -= 1;
        self.truncate_future();
        self.snapshots.extend(displaced);
    }
}
