use super::Extent;
use crate::block_state::BaseBlock;
use crate::blocks::BlockRegistry;
use crate::error::EditError;
use crate::math::BlockVector3;

/// Drops writes outside the world's height range or of unregistered blocks.
pub struct DataValidatorExtent<E> {
    extent: E,
    min_y: i32,
    max_y: i32,
    registry: BlockRegistry,
}

impl<E: Extent> DataValidatorExtent<E> {
    pub fn new(extent: E, min_y: i32, max_y: i32, registry: BlockRegistry) -> Self {
        DataValidatorExtent {
            extent,
            min_y,
            max_y,
            registry,
        }
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

    fn accepts(&self, position: BlockVector3, block: &BaseBlock) -> bool {
        (self.min_y..=self.max_y).contains(&position.y)
            && (block.state.is_air() || self.registry.is_registered(block.state.get_name()))
    }
}

impl<E: Extent> Extent for DataValidatorExtent<E> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_full_block, get_block,
        get_biome, set_biome, entities, entity, add_entity, remove_entity, commit,
    );

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        if !self.accepts(position, &block) {
            return Ok(false);
        }
        self.extent.set_block(position, block)
    }
}
