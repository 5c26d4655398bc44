use indexmap::IndexMap;
use log::{debug, warn};

use super::Extent;
use crate::block_state::{BaseBlock, BlockState};
use crate::error::EditError;
use crate::math::BlockVector3;

/// Buffers block writes and applies them to the inner extent on commit.
/// Reads see buffered writes first.
pub struct BatchingExtent<E> {
    extent: E,
    enabled: bool,
    batch: IndexMap<BlockVector3, BaseBlock>,
}

impl<E: Extent> BatchingExtent<E> {
    pub fn new(extent: E) -> Self {
        BatchingExtent::with_enabled(extent, true)
    }

    pub fn with_enabled(extent: E, enabled: bool) -> Self {
        BatchingExtent {
            extent,
            enabled,
            batch: IndexMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling flushes anything already buffered.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), EditError> {
        if self.enabled && !enabled {
            self.flush()?;
        }
        self.enabled = enabled;
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    pub fn inner(&self) -> &E {
        &self.extent
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.extent
    }

    pub fn into_inner(self) -> E {
        self.extent
    }

    /// Writes the buffer out in insertion order and clears it. Returns how
    /// many writes changed something.
    ///
    /// On error the failing write and everything after it stay buffered.
    fn flush(&mut self) -> Result<usize, EditError> {
        let size = self.batch.len();
        let mut applied = 0;
        let mut changed = 0;
        let mut result = Ok(());
        for (position, block) in &self.batch {
            match self.extent.set_block(*position, block.clone()) {
                Ok(true) => changed += 1,
                Ok(false) => {}
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
            applied += 1;
        }
        self.batch.drain(..applied);
        if let Err(e) = result {
            warn!("batch flush stopped after {} of {} blocks: {}", applied, size, e);
            return Err(e);
        }
        if size > 0 {
            debug!("flushed batch of {} blocks ({} changed)", size, changed);
        }
        Ok(changed)
    }
}

impl<E: Extent> Extent for BatchingExtent<E> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_biome, set_biome,
        entities, entity, add_entity, remove_entity,
    );

    fn get_full_block(&self, position: BlockVector3) -> BaseBlock {
        match self.batch.get(&position) {
            Some(block) => block.clone(),
            None => self.extent.get_full_block(position),
        }
    }

    fn get_block(&self, position: BlockVector3) -> BlockState {
        match self.batch.get(&position) {
            Some(block) => block.state.clone(),
            None => self.extent.get_block(position),
        }
    }

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        if !self.enabled {
            return self.extent.set_block(position, block);
        }
        let differs = self.get_full_block(position) != block;
        self.batch.insert(position, block);
        Ok(differs)
    }

    fn commit(&mut self) -> Result<(), EditError> {
        self.flush()?;
        self.extent.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::MemoryWorld;

    #[test]
    fn test_reads_see_buffered_writes() {
        let mut world = MemoryWorld::default();
        let pos = BlockVector3::new(3, 3, 3);
        let mut batching = BatchingExtent::new(&mut world);
        assert!(batching.set_block(pos, "minecraft:stone".into()).unwrap());
        assert!(!batching.set_block(pos, "minecraft:stone".into()).unwrap());
        assert_eq!(batching.get_block(pos).name, "minecraft:stone");
        assert_eq!(batching.inner().get_block(pos).name, "minecraft:air");
        assert_eq!(batching.pending(), 1);
        batching.commit().unwrap();
        assert_eq!(batching.pending(), 0);
        drop(batching);
        assert_eq!(world.get_block(pos).name, "minecraft:stone");
        assert_eq!(world.write_count(), 1);
    }

    struct RejectAt {
        world: MemoryWorld,
        reject: Option<BlockVector3>,
    }

    impl Extent for RejectAt {
        forward_extent!(world: minimum_point, maximum_point, get_full_block);

        fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
            if self.reject == Some(position) {
                return Err(EditError::Other("rejected".into()));
            }
            self.world.set_block(position, block)
        }
    }

    #[test]
    fn test_failed_flush_keeps_unwritten_blocks() {
        let inner = RejectAt {
            world: MemoryWorld::default(),
            reject: Some(BlockVector3::new(1, 0, 0)),
        };
        let mut batching = BatchingExtent::new(inner);
        for x in 0..3 {
            batching.set_block(BlockVector3::new(x, 0, 0), "minecraft:stone".into()).unwrap();
        }
        assert!(batching.commit().is_err());
        assert_eq!(batching.pending(), 2);
        assert_eq!(batching.inner().world.get_block(BlockVector3::ZERO).name, "minecraft:stone");
        assert_eq!(batching.get_block(BlockVector3::new(2, 0, 0)).name, "minecraft:stone");

        batching.inner_mut().reject = None;
        batching.commit().unwrap();
        assert_eq!(batching.pending(), 0);
        assert_eq!(batching.inner().world.block_count(), 3);
    }

    #[test]
    fn test_disabling_flushes() {
        let mut world = MemoryWorld::default();
        let mut batching = BatchingExtent::new(&mut world);
        batching.set_block(BlockVector3::ZERO, "minecraft:dirt".into()).unwrap();
        batching.set_enabled(false).unwrap();
        assert_eq!(batching.inner().get_block(BlockVector3::ZERO).name, "minecraft:dirt");
        batching.set_block(BlockVector3::ONE, "minecraft:dirt".into()).unwrap();
        assert_eq!(batching.pending(), 0);
    }
}
