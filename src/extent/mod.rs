//! The read/write surface over a block grid, and the delegating extents that
//! stack on top of one another to form an edit pipeline.

pub use bag::BlockBagExtent;
pub use batching::BatchingExtent;
pub use changeset::ChangeSetExtent;
pub use clipboard::BlockArrayClipboard;
pub use limiter::BlockChangeLimiter;
pub use memory::MemoryWorld;
pub use transform::{transform_block, BlockTransformExtent};
pub use validator::DataValidatorExtent;

use uuid::Uuid;

use crate::block_state::{BaseBlock, BiomeType, BlockState};
use crate::blocks::BlockRegistry;
use crate::entity::{BaseEntity, EntitySnapshot, Location};
use crate::error::EditError;
use crate::math::BlockVector3;
use crate::regions::{Region, RegionShape};

/// Anything blocks can be read from and written to.
///
/// `set_block` returns `Ok(true)` when the write changed something,
/// `Ok(false)` when this one write was rejected or had no effect, and `Err`
/// when the whole operation has to stop.
pub trait Extent {
    fn minimum_point(&self) -> BlockVector3;
    fn maximum_point(&self) -> BlockVector3;

    fn get_full_block(&self, position: BlockVector3) -> BaseBlock;

    fn get_block(&self, position: BlockVector3) -> BlockState {
        self.get_full_block(position).state
    }

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError>;

    fn get_biome(&self, _position: BlockVector3) -> Option<BiomeType> {
        None
    }

    fn set_biome(&mut self, _position: BlockVector3, _biome: BiomeType) -> Result<bool, EditError> {
        Ok(false)
    }

    fn entities(&self) -> Vec<EntitySnapshot> {
        Vec::new()
    }

    fn entity(&self, uuid: Uuid) -> Option<EntitySnapshot> {
        self.entities().into_iter().find(|e| e.uuid == uuid)
    }

    /// Places an entity under the snapshot's id.
    fn add_entity(&mut self, _snapshot: EntitySnapshot) -> bool {
        false
    }

    /// Spawns a new entity and returns its id.
    fn create_entity(&mut self, location: Location, entity: BaseEntity) -> Option<Uuid> {
        let snapshot = EntitySnapshot::new(location, entity);
        let uuid = snapshot.uuid;
        self.add_entity(snapshot).then_some(uuid)
    }

    fn remove_entity(&mut self, _uuid: Uuid) -> bool {
        false
    }

    /// Flushes anything held back by this extent or the ones below it.
    fn commit(&mut self) -> Result<(), EditError> {
        Ok(())
    }

    fn entities_in(&self, region: &Region) -> Vec<EntitySnapshot> {
        self.entities()
            .into_iter()
            .filter(|e| region.contains(e.location.position.to_block_point()))
            .collect()
    }
}

/// A whole world: an extent with a height range and a set of known blocks.
pub trait World: Extent {
    fn name(&self) -> &str;
    fn min_y(&self) -> i32;
    fn max_y(&self) -> i32;
    fn block_registry(&self) -> &BlockRegistry;
}

/// Generates pass-through implementations of `Extent` methods that forward
/// to the wrapped extent in `$field`.
macro_rules! forward_extent {
    ($field:ident: $($method:ident),* $(,)?) => {
        $( forward_extent!(@one $field $method); )*
    };
    (@one $f:ident minimum_point) => {
        fn minimum_point(&self) -> $crate::math::BlockVector3 { self.$f.minimum_point() }
    };
    (@one $f:ident maximum_point) => {
        fn maximum_point(&self) -> $crate::math::BlockVector3 { self.$f.maximum_point() }
    };
    (@one $f:ident get_full_block) => {
        fn get_full_block(&self, position: $crate::math::BlockVector3) -> $crate::block_state::BaseBlock {
            self.$f.get_full_block(position)
        }
    };
    (@one $f:ident get_block) => {
        fn get_block(&self, position: $crate::math::BlockVector3) -> $crate::block_state::BlockState {
            self.$f.get_block(position)
        }
    };
    (@one $f:ident set_block) => {
        fn set_block(
            &mut self,
            position: $crate::math::BlockVector3,
            block: $crate::block_state::BaseBlock,
        ) -> Result<bool, $crate::error::EditError> {
            self.$f.set_block(position, block)
        }
    };
    (@one $f:ident get_biome) => {
        fn get_biome(&self, position: $crate::math::BlockVector3) -> Option<$crate::block_state::BiomeType> {
            self.$f.get_biome(position)
        }
    };
    (@one $f:ident set_biome) => {
        fn set_biome(
            &mut self,
            position: $crate::math::BlockVector3,
            biome: $crate::block_state::BiomeType,
        ) -> Result<bool, $crate::error::EditError> {
            self.$f.set_biome(position, biome)
        }
    };
    (@one $f:ident entities) => {
        fn entities(&self) -> Vec<$crate::entity::EntitySnapshot> { self.$f.entities() }
    };
    (@one $f:ident entity) => {
        fn entity(&self, uuid: uuid::Uuid) -> Option<$crate::entity::EntitySnapshot> { self.$f.entity(uuid) }
    };
    (@one $f:ident add_entity) => {
        fn add_entity(&mut self, snapshot: $crate::entity::EntitySnapshot) -> bool {
            self.$f.add_entity(snapshot)
        }
    };
    (@one $f:ident remove_entity) => {
        fn remove_entity(&mut self, uuid: uuid::Uuid) -> bool { self.$f.remove_entity(uuid) }
    };
    (@one $f:ident commit) => {
        fn commit(&mut self) -> Result<(), $crate::error::EditError> { self.$f.commit() }
    };
}

mod bag;
mod batching;
mod changeset;
mod clipboard;
mod limiter;
mod memory;
mod transform;
mod validator;

impl<E: Extent + ?Sized> Extent for &mut E {
    fn minimum_point(&self) -> BlockVector3 {
        (**self).minimum_point()
    }

    fn maximum_point(&self) -> BlockVector3 {
        (**self).maximum_point()
    }

    fn get_full_block(&self, position: BlockVector3) -> BaseBlock {
        (**self).get_full_block(position)
    }

    fn get_block(&self, position: BlockVector3) -> BlockState {
        (**self).get_block(position)
    }

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        (**self).set_block(position, block)
    }

    fn get_biome(&self, position: BlockVector3) -> Option<BiomeType> {
        (**self).get_biome(position)
    }

    fn set_biome(&mut self, position: BlockVector3, biome: BiomeType) -> Result<bool, EditError> {
        (**self).set_biome(position, biome)
    }

    fn entities(&self) -> Vec<EntitySnapshot> {
        (**self).entities()
    }

    fn entity(&self, uuid: Uuid) -> Option<EntitySnapshot> {
        (**self).entity(uuid)
    }

    fn add_entity(&mut self, snapshot: EntitySnapshot) -> bool {
        (**self).add_entity(snapshot)
    }

    fn create_entity(&mut self, location: Location, entity: BaseEntity) -> Option<Uuid> {
        (**self).create_entity(location, entity)
    }

    fn remove_entity(&mut self, uuid: Uuid) -> bool {
        (**self).remove_entity(uuid)
    }

    fn commit(&mut self) -> Result<(), EditError> {
        (**self).commit()
    }
}

/// Reads air everywhere and accepts nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullExtent;

impl Extent for NullExtent {
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
        Ok(false)
    }
}
