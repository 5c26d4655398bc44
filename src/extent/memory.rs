use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::{Extent, World};
use crate::block_state::{BaseBlock, BiomeType};
use crate::blocks::BlockRegistry;
use crate::entity::EntitySnapshot;
use crate::error::EditError;
use crate::math::BlockVector3;

/// Sparse in-memory world. Unset positions read as air.
#[derive(Debug, Clone)]
pub struct MemoryWorld {
    name: String,
    min_y: i32,
    max_y: i32,
    registry: BlockRegistry,
    blocks: FxHashMap<BlockVector3, BaseBlock>,
    biomes: FxHashMap<BlockVector3, BiomeType>,
    entities: IndexMap<Uuid, EntitySnapshot>,
    writes: usize,
}

impl MemoryWorld {
    pub fn new(name: impl Into<String>, min_y: i32, max_y: i32) -> Self {
        MemoryWorld {
            name: name.into(),
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
            registry: BlockRegistry::vanilla(),
            blocks: FxHashMap::default(),
            biomes: FxHashMap::default(),
            entities: IndexMap::new(),
            writes: 0,
        }
    }

    pub fn with_registry(mut self, registry: BlockRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Number of `set_block` calls that reached this world.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Positions holding something other than air.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        MemoryWorld::new("world", -64, 319)
    }
}

impl Extent for MemoryWorld {
    fn minimum_point(&self) -> BlockVector3 {
        BlockVector3::new(-30_000_000, self.min_y, -30_000_000)
    }

    fn maximum_point(&self) -> BlockVector3 {
        BlockVector3::new(30_000_000, self.max_y, 30_000_000)
    }

    fn get_full_block(&self, position: BlockVector3) -> BaseBlock {
        self.blocks
            .get(&position)
            .cloned()
            .unwrap_or_else(BaseBlock::air)
    }

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        self.writes += 1;
        if position.y < self.min_y || position.y > self.max_y {
            return Ok(false);
        }
        if block.state.is_air() && block.nbt.is_none() {
            return Ok(self.blocks.remove(&position).is_some());
        }
        match self.blocks.insert(position, block.clone()) {
            Some(previous) => Ok(previous != block),
            None => Ok(true),
        }
    }

    fn get_biome(&self, position: BlockVector3) -> Option<BiomeType> {
        Some(self.biomes.get(&position).cloned().unwrap_or_default())
    }

    fn set_biome(&mut self, position: BlockVector3, biome: BiomeType) -> Result<bool, EditError> {
        let previous = self.biomes.insert(position, biome.clone());
        Ok(previous.unwrap_or_default() != biome)
    }

    fn entities(&self) -> Vec<EntitySnapshot> {
        self.entities.values().cloned().collect()
    }

    fn entity(&self, uuid: Uuid) -> Option<EntitySnapshot> {
        self.entities.get(&uuid).cloned()
    }

    fn add_entity(&mut self, snapshot: EntitySnapshot) -> bool {
        if self.entities.contains_key(&snapshot.uuid) {
            return false;
        }
        self.entities.insert(snapshot.uuid, snapshot);
        true
    }

    fn remove_entity(&mut self, uuid: Uuid) -> bool {
        self.entities.shift_remove(&uuid).is_some()
    }
}

impl World for MemoryWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }

    fn max_y(&self) -> i32 {
        self.max_y
    }

    fn block_registry(&self) -> &BlockRegistry {
        &self.registry
    }
}
