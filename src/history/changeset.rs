use indexmap::IndexMap;

use super::{BlockChange, Change, UndoContext};
use crate::block_state::BaseBlock;
use crate::error::EditError;
use crate::math::BlockVector3;

/// An append-only record of the changes made by one edit.
pub trait ChangeSet {
    /// Records `change` unless recording is paused.
    fn add(&mut self, change: Change);

    fn is_recording_changes(&self) -> bool;
    fn set_record_changes(&mut self, record: bool);

    /// Changes in the order they were made.
    fn forward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_>;

    /// Changes from last to first.
    fn backward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_>;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn undo(&self, context: &mut UndoContext<'_>) -> Result<(), EditError> {
        for change in self.backward_iter() {
            change.undo(context)?;
        }
        Ok(())
    }

    fn redo(&self, context: &mut UndoContext<'_>) -> Result<(), EditError> {
        for change in self.forward_iter() {
            change.redo(context)?;
        }
        Ok(())
    }
}

impl<C: ChangeSet + ?Sized> ChangeSet for &mut C {
    fn add(&mut self, change: Change) {
        (**self).add(change)
    }

    fn is_recording_changes(&self) -> bool {
        (**self).is_recording_changes()
    }

    fn set_record_changes(&mut self, record: bool) {
        (**self).set_record_changes(record)
    }

    fn forward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        (**self).forward_iter()
    }

    fn backward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        (**self).backward_iter()
    }

    fn size(&self) -> usize {
        (**self).size()
    }
}

/// Keeps every change in a list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayListHistory {
    changes: Vec<Change>,
    paused: bool,
}

impl ArrayListHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChangeSet for ArrayListHistory {
    fn add(&mut self, change: Change) {
        if !self.paused {
            self.changes.push(change);
        }
    }

    fn is_recording_changes(&self) -> bool {
        !self.paused
    }

    fn set_record_changes(&mut self, record: bool) {
        self.paused = !record;
    }

    fn forward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        Box::new(self.changes.iter().cloned())
    }

    fn backward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        Box::new(self.changes.iter().rev().cloned())
    }

    fn size(&self) -> usize {
        self.changes.len()
    }
}

/// Collapses block changes per position: the first previous value and the
/// last current value survive, so several writes to one position undo as a
/// single step. Other changes are kept as a list.
///
/// `size()` counts distinct block positions plus non-block changes, not the
/// number of writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockOptimizedHistory {
    previous: IndexMap<BlockVector3, BaseBlock>,
    current: IndexMap<BlockVector3, BaseBlock>,
    others: ArrayListHistory,
}

impl BlockOptimizedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn block_changes(&self) -> impl DoubleEndedIterator<Item = Change> + '_ {
        self.previous.iter().filter_map(move |(position, previous)| {
            let current = self.current.get(position)?;
            Some(Change::Block(BlockChange {
                position: *position,
                previous: previous.clone(),
                current: current.clone(),
            }))
        })
    }
}

impl ChangeSet for BlockOptimizedHistory {
    fn add(&mut self, change: Change) {
        if !self.is_recording_changes() {
            return;
        }
        match change {
            Change::Block(c) => {
                self.previous.entry(c.position).or_insert(c.previous);
                self.current.insert(c.position, c.current);
            }
            other => self.others.add(other),
        }
    }

    fn is_recording_changes(&self) -> bool {
        self.others.is_recording_changes()
    }

    fn set_record_changes(&mut self, record: bool) {
        self.others.set_record_changes(record);
    }

    fn forward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        Box::new(self.others.forward_iter().chain(self.block_changes()))
    }

    fn backward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        Box::new(self.others.backward_iter().chain(self.block_changes().rev()))
    }

    fn size(&self) -> usize {
        self.previous.len() + self.others.size()
    }
}

/// The storage strategy chosen for a session's edits.
#[derive(Debug, Clone, PartialEq)]
pub enum History {
    ArrayList(ArrayListHistory),
    BlockOptimized(BlockOptimizedHistory),
}

impl History {
    pub fn new(block_optimized: bool) -> Self {
        if block_optimized {
            History::BlockOptimized(BlockOptimizedHistory::new())
        } else {
            History::ArrayList(ArrayListHistory::new())
        }
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(true)
    }
}

impl ChangeSet for History {
    fn add(&mut self, change: Change) {
        match self {
            History::ArrayList(h) => h.add(change),
            History::BlockOptimized(h) => h.add(change),
        }
    }

    fn is_recording_changes(&self) -> bool {
        match self {
            History::ArrayList(h) => h.is_recording_changes(),
            History::BlockOptimized(h) => h.is_recording_changes(),
        }
    }

    fn set_record_changes(&mut self, record: bool) {
        match self {
            History::ArrayList(h) => h.set_record_changes(record),
            History::BlockOptimized(h) => h.set_record_changes(record),
        }
    }

    fn forward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        match self {
            History::ArrayList(h) => h.forward_iter(),
            History::BlockOptimized(h) => h.forward_iter(),
        }
    }

    fn backward_iter(&self) -> Box<dyn Iterator<Item = Change> + '_> {
        match self {
            History::ArrayList(h) => h.backward_iter(),
            History::BlockOptimized(h) => h.backward_iter(),
        }
    }

    fn size(&self) -> usize {
        match self {
            History::ArrayList(h) => h.size(),
            History::BlockOptimized(h) => h.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(history: &mut dyn ChangeSet, pos: BlockVector3, from: &str, to: &str) {
        history.add(Change::block(pos, from.into(), to.into()));
    }

    #[test]
    fn test_optimized_collapses_per_position() {
        let mut history = BlockOptimizedHistory::new();
        let pos = BlockVector3::new(1, 1, 1);
        set(&mut history, pos, "minecraft:a", "minecraft:b");
        set(&mut history, pos, "minecraft:b", "minecraft:c");
        let changes: Vec<_> = history.forward_iter().collect();
        assert_eq!(
            changes,
            vec![Change::block(pos, "minecraft:a".into(), "minecraft:c".into())]
        );
        assert_eq!(history.size(), 1);
    }

    #[test]
    fn test_array_list_keeps_every_write() {
        let mut history = ArrayListHistory::new();
        let pos = BlockVector3::new(1, 1, 1);
        set(&mut history, pos, "minecraft:a", "minecraft:b");
        set(&mut history, pos, "minecraft:b", "minecraft:c");
        assert_eq!(history.size(), 2);
        let backward: Vec<_> = history.backward_iter().collect();
        assert_eq!(backward[0], Change::block(pos, "minecraft:b".into(), "minecraft:c".into()));
    }

    #[test]
    fn test_backward_order_is_reversed() {
        let mut history = BlockOptimizedHistory::new();
        let first = BlockVector3::new(0, 0, 0);
        let second = BlockVector3::new(1, 0, 0);
        set(&mut history, first, "minecraft:a", "minecraft:b");
        set(&mut history, second, "minecraft:a", "minecraft:b");
        let order: Vec<_> = history
            .backward_iter()
            .map(|c| match c {
                Change::Block(b) => b.position,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn test_paused_recording_drops_changes() {
        let mut history = History::new(false);
        history.set_record_changes(false);
        set(&mut history, BlockVector3::ZERO, "minecraft:a", "minecraft:b");
        assert!(history.is_empty());
        history.set_record_changes(true);
        set(&mut history, BlockVector3::ZERO, "minecraft:a", "minecraft:b");
        assert_eq!(history.size(), 1);
    }
}
