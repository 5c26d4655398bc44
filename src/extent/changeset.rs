use uuid::Uuid;

use super::Extent;
use crate::block_state::{BaseBlock, BiomeType};
use crate::entity::EntitySnapshot;
use crate::error::EditError;
use crate::history::{Change, ChangeSet};
use crate::math::BlockVector3;

/// Records every successful change made through it into a [`ChangeSet`].
pub struct ChangeSetExtent<E, C> {
    extent: E,
    changes: C,
}

impl<E: Extent, C: ChangeSet> ChangeSetExtent<E, C> {
    pub fn new(extent: E, changes: C) -> Self {
        ChangeSetExtent { extent, changes }
    }

    pub fn changes(&self) -> &C {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut C {
        &mut self.changes
    }

    pub fn into_parts(self) -> (E, C) {
        (self.extent, self.changes)
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

impl<E: Extent, C: ChangeSet> Extent for ChangeSetExtent<E, C> {
    forward_extent!(extent:
        minimum_point, maximum_point, get_full_block, get_block,
        get_biome, entities, entity, commit,
    );

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        let previous = self.extent.get_full_block(position);
        let changed = self.extent.set_block(position, block.clone())?;
        if changed {
            self.changes.add(Change::block(position, previous, block));
        }
        Ok(changed)
    }

    fn set_biome(&mut self, position: BlockVector3, biome: BiomeType) -> Result<bool, EditError> {
        let previous = self.extent.get_biome(position).unwrap_or_default();
        let changed = self.extent.set_biome(position, biome.clone())?;
        if changed {
            self.changes.add(Change::biome(position, previous, biome));
        }
        Ok(changed)
    }

    fn add_entity(&mut self, snapshot: EntitySnapshot) -> bool {
        let added = self.extent.add_entity(snapshot.clone());
        if added {
            self.changes.add(Change::EntityCreate(snapshot));
        }
        added
    }

    fn remove_entity(&mut self, uuid: Uuid) -> bool {
        let Some(snapshot) = self.extent.entity(uuid) else {
            return false;
        };
        let removed = self.extent.remove_entity(uuid);
        if removed {
            self.changes.add(Change::EntityRemove(snapshot));
        }
        removed
    }
}
