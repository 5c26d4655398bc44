use log::debug;
use uuid::Uuid;

use super::copy::{ExtentBlockCopy, ExtentEntityCopy};
use super::mask::Mask;
use super::pattern::Pattern;
use super::RegionFunction;
use crate::error::EditError;
use crate::extent::Extent;
use crate::math::{BlockVector3, Transform};
use crate::regions::{Region, RegionShape};

/// Applies a function to every point of a region.
pub struct RegionVisitor<'r, F> {
    region: &'r Region,
    function: F,
    affected: usize,
}

impl<'r, F: RegionFunction> RegionVisitor<'r, F> {
    pub fn new(region: &'r Region, function: F) -> Self {
        RegionVisitor {
            region,
            function,
            affected: 0,
        }
    }

    /// Visits every point and returns how many the function changed.
    /// An error stops the visit; earlier changes stay applied.
    pub fn run(&mut self) -> Result<usize, EditError> {
        for position in self.region.iter() {
            if self.function.apply(position)? {
                self.affected += 1;
            }
        }
        debug!("visited {} region, {} affected", self.region.kind(), self.affected);
        Ok(self.affected)
    }

    pub fn affected(&self) -> usize {
        self.affected
    }

    pub fn into_function(self) -> F {
        self.function
    }
}

/// Writes the pattern's block at each position, where the mask allows it.
pub struct BlockReplace<'e, P> {
    extent: &'e mut dyn Extent,
    pattern: P,
    mask: Option<Box<dyn Mask + 'e>>,
}

impl<'e, P: Pattern> BlockReplace<'e, P> {
    pub fn new(extent: &'e mut dyn Extent, pattern: P) -> Self {
        BlockReplace {
            extent,
            pattern,
            mask: None,
        }
    }

    pub fn with_mask(mut self, mask: impl Mask + 'e) -> Self {
        self.mask = Some(Box::new(mask));
        self
    }
}

impl<P: Pattern> RegionFunction for BlockReplace<'_, P> {
    fn apply(&mut self, position: BlockVector3) -> Result<bool, EditError> {
        if let Some(mask) = &self.mask {
            if !mask.test(&*self.extent, position) {
                return Ok(false);
            }
        }
        self.extent.set_block(position, self.pattern.apply(position))
    }
}

/// Copies a region from one extent into another under a single transform,
/// moving `from` onto `to`.
#[derive(Debug, Clone)]
pub struct ForwardExtentCopy {
    region: Region,
    from: BlockVector3,
    to: BlockVector3,
    transform: Transform,
    copy_entities: bool,
    copy_biomes: bool,
    remove_entities: bool,
    affected_blocks: usize,
    copied_entities: Vec<Uuid>,
}

impl ForwardExtentCopy {
    /// Copies in place; `from` defaults to the region's minimum corner.
    pub fn new(region: Region, to: BlockVector3) -> Self {
        let from = region.minimum_point();
        ForwardExtentCopy {
            region,
            from,
            to,
            transform: Transform::Identity,
            copy_entities: true,
            copy_biomes: false,
            remove_entities: false,
            affected_blocks: 0,
            copied_entities: Vec::new(),
        }
    }

    pub fn with_origin(mut self, from: BlockVector3) -> Self {
        self.from = from;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_entities(mut self, copy_entities: bool) -> Self {
        self.copy_entities = copy_entities;
        self
    }

    pub fn with_biomes(mut self, copy_biomes: bool) -> Self {
        self.copy_biomes = copy_biomes;
        self
    }

    /// Also remove the copied entities from the source (a move).
    pub fn with_entity_removal(mut self, remove_entities: bool) -> Self {
        self.remove_entities = remove_entities;
        self
    }

    pub fn affected_blocks(&self) -> usize {
        self.affected_blocks
    }

    /// Ids, in the source, of the entities that were copied.
    pub fn copied_entities(&self) -> &[Uuid] {
        &self.copied_entities
    }

    /// Copies blocks, then entities. Returns the number of blocks changed.
    pub fn run(&mut self, source: &dyn Extent, destination: &mut dyn Extent) -> Result<usize, EditError> {
        let copy = ExtentBlockCopy::new(source, self.from, &mut *destination, self.to, self.transform)
            .with_biomes(self.copy_biomes);
        self.affected_blocks = RegionVisitor::new(&self.region, copy).run()?;

        self.copied_entities.clear();
        if self.copy_entities {
            let mut copy = ExtentEntityCopy::new(self.from, destination, self.to, self.transform);
            for snapshot in source.entities_in(&self.region) {
                if copy.apply(&snapshot).is_some() {
                    self.copied_entities.push(snapshot.uuid);
                }
            }
        }
        debug!(
            "copied {} blocks and {} entities to {}",
            self.affected_blocks,
            self.copied_entities.len(),
            self.to
        );
        Ok(self.affected_blocks)
    }

    /// [`run`](Self::run), then removes the copied entities from `source`
    /// when entity removal is on.
    pub fn run_and_remove<S: Extent>(&mut self, source: &mut S, destination: &mut dyn Extent) -> Result<usize, EditError> {
        let affected = self.run(&*source, destination)?;
        if self.remove_entities {
            for uuid in &self.copied_entities {
                source.remove_entity(*uuid);
            }
        }
        Ok(affected)
    }
}
