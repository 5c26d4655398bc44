//! Reversible change records and the change sets that collect them.

mod changeset;

pub use changeset::{ArrayListHistory, BlockOptimizedHistory, ChangeSet, History};

use log::trace;

use crate::block_state::{BaseBlock, BiomeType};
use crate::entity::EntitySnapshot;
use crate::error::EditError;
use crate::extent::Extent;
use crate::math::BlockVector3;

/// Where undo and redo write their values.
pub struct UndoContext<'a> {
    extent: Option<&'a mut dyn Extent>,
}

impl<'a> UndoContext<'a> {
    pub fn new(extent: &'a mut dyn Extent) -> Self {
        UndoContext {
            extent: Some(extent),
        }
    }

    /// A context with nothing to replay into; every replay fails.
    pub fn empty() -> Self {
        UndoContext { extent: None }
    }

    pub fn extent(&mut self) -> Result<&mut (dyn Extent + 'a), EditError> {
        self.extent.as_deref_mut().ok_or(EditError::MissingExtent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockChange {
    pub position: BlockVector3,
    pub previous: BaseBlock,
    pub current: BaseBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiomeChange {
    pub position: BlockVector3,
    pub previous: BiomeType,
    pub current: BiomeType,
}

/// One reversible edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Block(BlockChange),
    Biome(BiomeChange),
    /// An entity that was spawned; undo removes it.
    EntityCreate(EntitySnapshot),
    /// An entity that was removed; undo puts it back under the same id.
    EntityRemove(EntitySnapshot),
}

impl Change {
    pub fn block(position: BlockVector3, previous: BaseBlock, current: BaseBlock) -> Self {
        Change::Block(BlockChange {
            position,
            previous,
            current,
        })
    }

    pub fn biome(position: BlockVector3, previous: BiomeType, current: BiomeType) -> Self {
        Change::Biome(BiomeChange {
            position,
            previous,
            current,
        })
    }

    pub fn undo(&self, context: &mut UndoContext<'_>) -> Result<(), EditError> {
        let extent = context.extent()?;
        match self {
            Change::Block(c) => {
                trace!("undo block {} -> {}", c.position, c.previous);
                extent.set_block(c.position, c.previous.clone())?;
            }
            Change::Biome(c) => {
                trace!("undo biome {} -> {}", c.position, c.previous.id());
                extent.set_biome(c.position, c.previous.clone())?;
            }
            Change::EntityCreate(snapshot) => {
                trace!("undo spawn of {}", snapshot.uuid);
                extent.remove_entity(snapshot.uuid);
            }
            Change::EntityRemove(snapshot) => {
                trace!("undo removal of {}", snapshot.uuid);
                extent.add_entity(snapshot.clone());
            }
        }
        Ok(())
    }

    pub fn redo(&self, context: &mut UndoContext<'_>) -> Result<(), EditError> {
        let extent = context.extent()?;
        match self {
            Change::Block(c) => {
                trace!("redo block {} -> {}", c.position, c.current);
                extent.set_block(c.position, c.current.clone())?;
            }
            Change::Biome(c) => {
                trace!("redo biome {} -> {}", c.position, c.current.id());
                extent.set_biome(c.position, c.current.clone())?;
            }
            Change::EntityCreate(snapshot) => {
                trace!("redo spawn of {}", snapshot.uuid);
                extent.add_entity(snapshot.clone());
            }
            Change::EntityRemove(snapshot) => {
                trace!("redo removal of {}", snapshot.uuid);
                extent.remove_entity(snapshot.uuid);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BaseEntity, Location};
    use crate::extent::MemoryWorld;
    use crate::math::Vector3;

    #[test]
    fn test_block_change_round_trip() {
        let mut world = MemoryWorld::default();
        let pos = BlockVector3::new(1, 1, 1);
        world.set_block(pos, "minecraft:dirt".into()).unwrap();
        world.set_block(pos, "minecraft:stone".into()).unwrap();
        let change = Change::block(pos, "minecraft:dirt".into(), "minecraft:stone".into());

        let mut context = UndoContext::new(&mut world);
        change.undo(&mut context).unwrap();
        change.redo(&mut context).unwrap();
        assert_eq!(world.get_block(pos).name, "minecraft:stone");

        let mut context = UndoContext::new(&mut world);
        change.redo(&mut context).unwrap();
        change.undo(&mut context).unwrap();
        assert_eq!(world.get_block(pos).name, "minecraft:dirt");
    }

    #[test]
    fn test_entity_changes_keep_ids() {
        let mut world = MemoryWorld::default();
        let snapshot = EntitySnapshot::new(Location::new(Vector3::ZERO), BaseEntity::new("minecraft:cow"));
        world.add_entity(snapshot.clone());
        let change = Change::EntityCreate(snapshot.clone());

        let mut context = UndoContext::new(&mut world);
        change.undo(&mut context).unwrap();
        assert!(world.entity(snapshot.uuid).is_none());

        let mut context = UndoContext::new(&mut world);
        change.redo(&mut context).unwrap();
        assert_eq!(world.entity(snapshot.uuid), Some(snapshot));
    }

    #[test]
    fn test_empty_context_fails() {
        let change = Change::block(BlockVector3::ZERO, BaseBlock::air(), "minecraft:stone".into());
        assert!(matches!(
            change.undo(&mut UndoContext::empty()),
            Err(EditError::MissingExtent)
        ));
    }
}
