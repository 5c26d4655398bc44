//! Block supplies that edits take from and give back to.

use log::debug;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::blocks::{dropped_block, is_liquid, is_unplaceable, substitute_block};
use crate::error::BlockBagError;
use crate::math::BlockVector3;

/// A source and sink of block items.
///
/// Only [`fetch_block`](BlockBag::fetch_block) and
/// [`store_block`](BlockBag::store_block) talk to the backing inventory;
/// the placement rules are layered on top.
pub trait BlockBag {
    /// Removes one unit of `name`.
    fn fetch_block(&mut self, name: &str) -> Result<(), BlockBagError>;

    /// Adds one unit of `name`.
    fn store_block(&mut self, name: &str) -> Result<(), BlockBagError>;

    /// Stores what mining `name` yields. Blocks that yield nothing are ignored.
    fn store_dropped_block(&mut self, name: &str) -> Result<(), BlockBagError> {
        match dropped_block(name) {
            Some(drop) => self.store_block(&drop),
            None => Ok(()),
        }
    }

    /// Takes the item needed to place `name`, falling back to its
    /// substitute when the exact block has run out. Returns the item taken,
    /// `None` for liquids, which cost nothing.
    fn fetch_placed_block(&mut self, name: &str) -> Result<Option<SmolStr>, BlockBagError> {
        if is_unplaceable(name) {
            return Err(BlockBagError::UnplaceableBlock(SmolStr::new(name)));
        }
        if is_liquid(name) {
            return Ok(None);
        }
        match self.fetch_block(name) {
            Ok(()) => Ok(Some(SmolStr::new(name))),
            Err(BlockBagError::OutOfBlocks(missing)) => match substitute_block(name) {
                Some(substitute) => {
                    debug!("out of {}, using {}", name, substitute);
                    self.fetch_block(substitute)?;
                    Ok(Some(SmolStr::new(substitute)))
                }
                None => Err(BlockBagError::OutOfBlocks(missing)),
            },
            Err(e) => Err(e),
        }
    }

    /// Whether one unit of `name` is available. Not atomic.
    fn peek_block(&mut self, name: &str) -> Result<(), BlockBagError> {
        self.fetch_block(name)?;
        self.store_block(name)
    }

    /// Pushes buffered changes to the backing inventory.
    fn flush_changes(&mut self) {}

    /// Registers a position whose contents feed this bag.
    fn add_source_position(&mut self, _position: BlockVector3) {}
}

/// Counted supply held in memory. An unlimited bag hands out anything
/// and accepts anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryBlockBag {
    counts: Option<FxHashMap<SmolStr, u32>>,
    capacity: Option<u32>,
    sources: Vec<BlockVector3>,
}

impl MemoryBlockBag {
    pub fn new() -> Self {
        MemoryBlockBag {
            counts: Some(FxHashMap::default()),
            capacity: None,
            sources: Vec::new(),
        }
    }

    pub fn unlimited() -> Self {
        MemoryBlockBag::default()
    }

    /// Caps how many units of a single item the bag holds.
    pub fn with_capacity(mut self, per_item: u32) -> Self {
        self.capacity = Some(per_item);
        self
    }

    pub fn with_block(mut self, name: &str, count: u32) -> Self {
        if let Some(counts) = &mut self.counts {
            *counts.entry(SmolStr::new(name)).or_default() += count;
        }
        self
    }

    pub fn count(&self, name: &str) -> Option<u32> {
        self.counts
            .as_ref()
            .map(|counts| counts.get(name).copied().unwrap_or(0))
    }

    pub fn is_unlimited(&self) -> bool {
        self.counts.is_none()
    }

    pub fn source_positions(&self) -> &[BlockVector3] {
        &self.sources
    }
}

impl BlockBag for MemoryBlockBag {
    fn fetch_block(&mut self, name: &str) -> Result<(), BlockBagError> {
        let Some(counts) = &mut self.counts else {
            return Ok(());
        };
        match counts.get_mut(name) {
            Some(n) if *n > 0 => {
                *n -= 1;
                Ok(())
            }
            _ => Err(BlockBagError::OutOfBlocks(SmolStr::new(name))),
        }
    }

    fn store_block(&mut self, name: &str) -> Result<(), BlockBagError> {
        let Some(counts) = &mut self.counts else {
            return Ok(());
        };
        let n = counts.entry(SmolStr::new(name)).or_default();
        if self.capacity.is_some_and(|cap| *n >= cap) {
            return Err(BlockBagError::OutOfSpace(SmolStr::new(name)));
        }
        *n += 1;
        Ok(())
    }

    fn add_source_position(&mut self, position: BlockVector3) {
        self.sources.push(position);
    }
}
