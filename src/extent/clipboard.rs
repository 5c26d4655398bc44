use indexmap::IndexMap;
use quartz_nbt::NbtCompound;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::Extent;
use crate::block_state::{BaseBlock, BiomeType, BlockState};
use crate::entity::EntitySnapshot;
use crate::error::EditError;
use crate::math::BlockVector3;
use crate::regions::{Region, RegionShape};

/// Blocks copied out of a region, stored over the region's bounding box as
/// palette indices. The origin is the point the clipboard is pasted
/// relative to.
#[derive(Debug, Clone)]
pub struct BlockArrayClipboard {
    region: Region,
    origin: BlockVector3,
    min: BlockVector3,
    size: BlockVector3,
    blocks: Vec<usize>,
    palette: Vec<BlockState>,
    palette_index: FxHashMap<BlockState, usize>,
    block_nbt: FxHashMap<BlockVector3, NbtCompound>,
    biomes: FxHashMap<BlockVector3, BiomeType>,
    entities: IndexMap<Uuid, EntitySnapshot>,
}

impl BlockArrayClipboard {
    pub fn new(region: Region) -> Self {
        let min = region.minimum_point();
        let size = region.dimensions();
        let volume = size.x as usize * size.y as usize * size.z as usize;

        let air = BlockState::air();
        let mut palette_index = FxHashMap::default();
        palette_index.insert(air.clone(), 0);

        BlockArrayClipboard {
            region,
            origin: min,
            min,
            size,
            blocks: vec![0; volume],
            palette: vec![air],
            palette_index,
            block_nbt: FxHashMap::default(),
            biomes: FxHashMap::default(),
            entities: IndexMap::new(),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn origin(&self) -> BlockVector3 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: BlockVector3) {
        self.origin = origin;
    }

    pub fn dimensions(&self) -> BlockVector3 {
        self.size
    }

    pub fn palette(&self) -> &[BlockState] {
        &self.palette
    }

    /// Non-air blocks per state.
    pub fn count_block_types(&self) -> FxHashMap<BlockState, usize> {
        let mut counts = FxHashMap::default();
        for &index in &self.blocks {
            if index != 0 {
                *counts.entry(self.palette[index].clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    fn get_or_insert_in_palette(&mut self, block: &BlockState) -> usize {
        match self.palette_index.get(block) {
            Some(&index) => index,
            None => {
                let index = self.palette.len();
                self.palette.push(block.clone());
                self.palette_index.insert(block.clone(), index);
                index
            }
        }
    }

    fn index_of(&self, position: BlockVector3) -> Option<usize> {
        let d = position - self.min;
        if d.x < 0 || d.y < 0 || d.z < 0 || d.x >= self.size.x || d.y >= self.size.y || d.z >= self.size.z {
            return None;
        }
        let (w, l) = (self.size.x as usize, self.size.z as usize);
        Some(d.x as usize + d.z as usize * w + d.y as usize * w * l)
    }
}

impl Extent for BlockArrayClipboard {
    fn minimum_point(&self) -> BlockVector3 {
        self.region.minimum_point()
    }

    fn maximum_point(&self) -> BlockVector3 {
        self.region.maximum_point()
    }

    fn get_full_block(&self, position: BlockVector3) -> BaseBlock {
        let Some(index) = self.index_of(position) else {
            return BaseBlock::air();
        };
        let state = self.palette[self.blocks[index]].clone();
        match self.block_nbt.get(&position) {
            Some(nbt) => BaseBlock::with_nbt(state, nbt.clone()),
            None => BaseBlock::new(state),
        }
    }

    fn get_block(&self, position: BlockVector3) -> BlockState {
        match self.index_of(position) {
            Some(index) => self.palette[self.blocks[index]].clone(),
            None => BlockState::air(),
        }
    }

    fn set_block(&mut self, position: BlockVector3, block: BaseBlock) -> Result<bool, EditError> {
        let Some(index) = self.index_of(position) else {
            return Ok(false);
        };
        let palette_index = self.get_or_insert_in_palette(&block.state);
        let state_changed = self.blocks[index] != palette_index;
        self.blocks[index] = palette_index;
        let nbt_changed = match block.nbt {
            Some(nbt) => self.block_nbt.insert(position, nbt.clone()).as_ref() != Some(&nbt),
            None => self.block_nbt.remove(&position).is_some(),
        };
        Ok(state_changed || nbt_changed)
    }

    fn get_biome(&self, position: BlockVector3) -> Option<BiomeType> {
        self.index_of(position)?;
        Some(self.biomes.get(&position).cloned().unwrap_or_default())
    }

    fn set_biome(&mut self, position: BlockVector3, biome: BiomeType) -> Result<bool, EditError> {
        if self.index_of(position).is_none() {
            return Ok(false);
        }
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
