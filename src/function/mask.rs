use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::extent::Extent;
use crate::math::BlockVector3;

/// A yes/no test on positions of an extent.
pub trait Mask {
    fn test(&self, extent: &dyn Extent, position: BlockVector3) -> bool;

    fn negate(self) -> NegatedMask<Self>
    where
        Self: Sized,
    {
        NegatedMask(self)
    }
}

/// Matches blocks whose type is in the set, whatever their properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockTypeMask {
    types: FxHashSet<SmolStr>,
}

impl BlockTypeMask {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        BlockTypeMask {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn add(&mut self, name: impl Into<SmolStr>) {
        self.types.insert(name.into());
    }
}

impl Mask for BlockTypeMask {
    fn test(&self, extent: &dyn Extent, position: BlockVector3) -> bool {
        self.types.contains(extent.get_block(position).get_name())
    }
}

/// Matches anything that is not air.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingBlockMask;

impl Mask for ExistingBlockMask {
    fn test(&self, extent: &dyn Extent, position: BlockVector3) -> bool {
        !extent.get_block(position).is_air()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NegatedMask<M>(pub M);

impl<M: Mask> Mask for NegatedMask<M> {
    fn test(&self, extent: &dyn Extent, position: BlockVector3) -> bool {
        !self.0.test(extent, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::MemoryWorld;

    #[test]
    fn test_type_mask_ignores_properties() {
        let mut world = MemoryWorld::default();
        let pos = BlockVector3::new(0, 1, 0);
        world
            .set_block(pos, "minecraft:oak_stairs[facing=east]".into())
            .unwrap();
        let mask = BlockTypeMask::new(["minecraft:oak_stairs"]);
        assert!(mask.test(&world, pos));
        assert!(!mask.test(&world, BlockVector3::ZERO));
        assert!(mask.negate().test(&world, BlockVector3::ZERO));
    }

    #[test]
    fn test_existing_mask() {
        let mut world = MemoryWorld::default();
        world.set_block(BlockVector3::ZERO, "minecraft:dirt".into()).unwrap();
        assert!(ExistingBlockMask.test(&world, BlockVector3::ZERO));
        assert!(!ExistingBlockMask.test(&world, BlockVector3::ONE));
    }
}
