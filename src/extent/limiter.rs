use log::warn;

use super::Extent;
use crate::block_state::BaseBlock;
use crate::error::EditError;
use crate::math::BlockVector3;

/// Counts writes the inner extent reports as successful and aborts the
/// operation once `limit` of them have gone through.
pub struct BlockChangeLimiter<E> {
    extent: E,
    limit: Option<usize>,
    count: usize,
}

impl<E: Extent> BlockChangeLimiter<E> {
    /// `None` means unlimited.
    pub fn new(extent: E, limit: Option<usize>) -> Self {
        BlockChangeLimiter {
            extent,
            limit,
            count: 0,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn count(&self) -> usize {
        self.count
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
}

impl<E: Extent> Extent for BlockChangeLimiter<E> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_full_block, get_block,
        get_biome, set_biome, entities, entity, add_entity, remove_entity, commit,
    );

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        if let Some(limit) = self.limit {
            if self.count >= limit {
                warn!("change limit of {} reached at {}", limit, position);
                return Err(EditError::MaxChangedBlocks { limit });
            }
        }
        let changed = self.extent.set_block(position, block)?;
        if changed {
            self.count += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::NullExtent;

    /// Accepts every write, changed or not.
    struct Accepting;

    impl Extent for Accepting {
        fn minimum_point(&self) -> BlockVector3 {
            BlockVector3::ZERO
        }

        fn maximum_point(&self) -> BlockVector3 {
            BlockVector3::ZERO
        }

        fn get_full_block(&self, _position: BlockVector3) -> BaseBlock {
            BaseBlock::air()
        }

        fn set_block(&mut self, _position: BlockVector3, _block: BaseBlock) -> Result<bool, EditError> {
            Ok(true)
        }
    }

    #[test]
    fn test_trips_on_the_call_after_the_limit() {
        let mut limiter = BlockChangeLimiter::new(Accepting, Some(3));
        let pos = BlockVector3::ZERO;
        for _ in 0..3 {
            assert!(limiter.set_block(pos, "minecraft:stone".into()).unwrap());
        }
        assert!(matches!(
            limiter.set_block(pos, "minecraft:stone".into()),
            Err(EditError::MaxChangedBlocks { limit: 3 })
        ));
        assert_eq!(limiter.count(), 3);
    }

    #[test]
    fn test_rejected_writes_are_not_counted() {
        let mut limiter = BlockChangeLimiter::new(NullExtent, Some(1));
        for _ in 0..10 {
            assert!(!limiter.set_block(BlockVector3::ZERO, "minecraft:stone".into()).unwrap());
        }
        assert_eq!(limiter.count(), 0);
    }

    #[test]
    fn test_unlimited() {
        let mut limiter = BlockChangeLimiter::new(Accepting, None);
        for _ in 0..100 {
            limiter.set_block(BlockVector3::ZERO, "minecraft:stone".into()).unwrap();
        }
        assert_eq!(limiter.count(), 100);
    }
}
