use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::block_state::{BaseBlock, BlockState};
use crate::extent::{BlockArrayClipboard, Extent};
use crate::math::BlockVector3;

/// Chooses the block to place at a position.
pub trait Pattern {
    fn apply(&self, position: BlockVector3) -> BaseBlock;
}

impl<P: Pattern + ?Sized> Pattern for &P {
    fn apply(&self, position: BlockVector3) -> BaseBlock {
        (**self).apply(position)
    }
}

impl<P: Pattern + ?Sized> Pattern for Box<P> {
    fn apply(&self, position: BlockVector3) -> BaseBlock {
        (**self).apply(position)
    }
}

/// The same block everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPattern(pub BaseBlock);

impl BlockPattern {
    pub fn new(block: impl Into<BaseBlock>) -> Self {
        BlockPattern(block.into())
    }
}

impl Pattern for BlockPattern {
    fn apply(&self, _position: BlockVector3) -> BaseBlock {
        self.0.clone()
    }
}

impl From<BlockState> for BlockPattern {
    fn from(state: BlockState) -> Self {
        BlockPattern(BaseBlock::new(state))
    }
}

/// Tiles a clipboard's contents across space, aligned so that `offset`
/// maps onto the clipboard's minimum corner.
pub struct ClipboardPattern<'c> {
    clipboard: &'c BlockArrayClipboard,
    offset: BlockVector3,
}

impl<'c> ClipboardPattern<'c> {
    pub fn new(clipboard: &'c BlockArrayClipboard) -> Self {
        ClipboardPattern::with_offset(clipboard, BlockVector3::ZERO)
    }

    pub fn with_offset(clipboard: &'c BlockArrayClipboard, offset: BlockVector3) -> Self {
        ClipboardPattern { clipboard, offset }
    }
}

impl Pattern for ClipboardPattern<'_> {
    fn apply(&self, position: BlockVector3) -> BaseBlock {
        let size = self.clipboard.dimensions();
        let rel = position - self.offset;
        let wrapped = BlockVector3::new(
            rel.x.rem_euclid(size.x),
            rel.y.rem_euclid(size.y),
            rel.z.rem_euclid(size.z),
        );
        self.clipboard
            .get_full_block(self.clipboard.minimum_point() + wrapped)
    }
}

/// Picks one of several patterns at random, in proportion to their weights.
pub struct RandomPattern {
    patterns: Vec<(Box<dyn Pattern + Send + Sync>, f64)>,
    total: f64,
    rng: Mutex<StdRng>,
}

impl RandomPattern {
    pub fn new() -> Self {
        RandomPattern::from_rng(StdRng::from_entropy())
    }

    /// Same seed, same sequence of choices.
    pub fn with_seed(seed: u64) -> Self {
        RandomPattern::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        RandomPattern {
            patterns: Vec::new(),
            total: 0.0,
            rng: Mutex::new(rng),
        }
    }

    /// Non-positive weights are ignored.
    pub fn add(&mut self, pattern: impl Pattern + Send + Sync + 'static, weight: f64) {
        if weight > 0.0 {
            self.patterns.push((Box::new(pattern), weight));
            self.total += weight;
        }
    }

    pub fn with(mut self, pattern: impl Pattern + Send + Sync + 'static, weight: f64) -> Self {
        self.add(pattern, weight);
        self
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for RandomPattern {
    fn default() -> Self {
        RandomPattern::new()
    }
}

impl Pattern for RandomPattern {
    /// An empty pattern yields air.
    fn apply(&self, position: BlockVector3) -> BaseBlock {
        let Some((last, _)) = self.patterns.last() else {
            return BaseBlock::air();
        };
        let roll = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0.0..self.total),
            Err(poisoned) => poisoned.into_inner().gen_range(0.0..self.total),
        };
        let mut offset = 0.0;
        for (pattern, weight) in &self.patterns {
            offset += weight;
            if roll < offset {
                return pattern.apply(position);
            }
        }
        last.apply(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{CuboidRegion, Region};

    #[test]
    fn test_block_pattern_is_constant() {
        let pattern = BlockPattern::new("minecraft:stone");
        assert_eq!(pattern.apply(BlockVector3::new(9, -3, 2)).state.name, "minecraft:stone");
    }

    #[test]
    fn test_clipboard_pattern_tiles() {
        let region = Region::Cuboid(CuboidRegion::new(BlockVector3::new(5, 5, 5), BlockVector3::new(6, 5, 5)));
        let mut clipboard = BlockArrayClipboard::new(region);
        clipboard.set_block(BlockVector3::new(6, 5, 5), "minecraft:gold_block".into()).unwrap();
        let pattern = ClipboardPattern::new(&clipboard);
        assert!(pattern.apply(BlockVector3::new(0, 0, 0)).state.is_air());
        assert_eq!(pattern.apply(BlockVector3::new(1, 0, 0)).state.name, "minecraft:gold_block");
        assert_eq!(pattern.apply(BlockVector3::new(-1, 7, 3)).state.name, "minecraft:gold_block");
    }

    #[test]
    fn test_random_pattern_respects_weights() {
        let pattern = RandomPattern::with_seed(7)
            .with(BlockPattern::new("minecraft:stone"), 1.0)
            .with(BlockPattern::new("minecraft:dirt"), 0.0);
        assert_eq!(pattern.len(), 1);
        for i in 0..50 {
            assert_eq!(pattern.apply(BlockVector3::new(i, 0, 0)).state.name, "minecraft:stone");
        }
        assert!(RandomPattern::with_seed(1).apply(BlockVector3::ZERO).state.is_air());
    }

    #[test]
    fn test_random_pattern_is_seeded() {
        let make = || {
            RandomPattern::with_seed(42)
                .with(BlockPattern::new("minecraft:stone"), 1.0)
                .with(BlockPattern::new("minecraft:dirt"), 1.0)
        };
        let (a, b) = (make(), make());
        for i in 0..20 {
            let pos = BlockVector3::new(i, 0, 0);
            assert_eq!(a.apply(pos), b.apply(pos));
        }
    }
}
