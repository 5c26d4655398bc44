use log::debug;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::Extent;
use crate::block_state::BaseBlock;
use crate::error::{BlockBagError, EditError};
use crate::inventory::BlockBag;
use crate::math::BlockVector3;

/// Pays for placed blocks from a [`BlockBag`] and refunds the drops of the
/// blocks they replace. Without a bag every write passes through.
pub struct BlockBagExtent<'b, E> {
    extent: E,
    bag: Option<&'b mut dyn BlockBag>,
    missing: FxHashMap<SmolStr, usize>,
}

impl<'b, E: Extent> BlockBagExtent<'b, E> {
    pub fn new(extent: E, bag: Option<&'b mut dyn BlockBag>) -> Self {
        BlockBagExtent {
            extent,
            bag,
            missing: FxHashMap::default(),
        }
    }

    pub fn set_block_bag(&mut self, bag: Option<&'b mut dyn BlockBag>) {
        self.bag = bag;
    }

    /// Blocks that could not be placed because the bag ran out, with counts.
    pub fn missing_blocks(&self) -> &FxHashMap<SmolStr, usize> {
        &self.missing
    }

    pub fn take_missing_blocks(&mut self) -> FxHashMap<SmolStr, usize> {
        std::mem::take(&mut self.missing)
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

impl<E: Extent> Extent for BlockBagExtent<'_, E> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_full_block, get_block,
        get_biome, set_biome, entities, entity, add_entity, remove_entity,
    );

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        let Some(bag) = self.bag.as_deref_mut() else {
            return self.extent.set_block(position, block);
        };
        let existing = self.extent.get_block(position);
        if existing.same_type(&block.state) {
            return self.extent.set_block(position, block);
        }
        let mut taken = None;
        if !block.state.is_air() {
            match bag.fetch_placed_block(block.state.get_name()) {
                Ok(item) => taken = item,
                Err(BlockBagError::UnplaceableBlock(_)) => return Ok(false),
                Err(_) => {
                    *self.missing.entry(block.state.name.clone()).or_default() += 1;
                    return Ok(false);
                }
            }
        }

        let placed = self.extent.set_block(position, block);
        if matches!(placed, Ok(true)) {
            if !existing.is_air() {
                if let Err(e) = bag.store_dropped_block(existing.get_name()) {
                    debug!("could not store drop of {}: {}", existing, e);
                }
            }
        } else if let Some(item) = taken {
            // rejected below
            if let Err(e) = bag.store_block(&item) {
                debug!("could not refund {}: {}", item, e);
            }
        }
        placed
    }

    fn commit(&mut self) -> Result<(), EditError> {
        if let Some(bag) = self.bag.as_deref_mut() {
            bag.flush_changes();
        }
        self.extent.commit()
    }
}
