use serde::{Deserialize, Serialize};

use super::RegionShape;
use crate::error::RegionOperationError;
use crate::math::BlockVector3;

/// Box spanned by two corners, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidRegion {
    pos1: BlockVector3,
    pos2: BlockVector3,
}

fn axis_mut(v: &mut BlockVector3, axis: usize) -> &mut i32 {
    match axis {
        0 => &mut v.x,
        1 => &mut v.y,
        _ => &mut v.z,
    }
}

fn axis(v: BlockVector3, axis: usize) -> i32 {
    match axis {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

impl CuboidRegion {
    pub fn new(pos1: BlockVector3, pos2: BlockVector3) -> Self {
        CuboidRegion { pos1, pos2 }
    }

    pub fn pos1(&self) -> BlockVector3 {
        self.pos1
    }

    pub fn pos2(&self) -> BlockVector3 {
        self.pos2
    }

    pub fn set_pos1(&mut self, pos1: BlockVector3) {
        self.pos1 = pos1;
    }

    pub fn set_pos2(&mut self, pos2: BlockVector3) {
        self.pos2 = pos2;
    }

    /// Moves the upper or lower face of one axis. `upper` picks the corner
    /// holding the larger coordinate; the result is clamped to the opposite face.
    fn move_face(&mut self, axis_index: usize, upper: bool, amount: i32) {
        let (a, b) = (axis(self.pos1, axis_index), axis(self.pos2, axis_index));
        let pos1_is_face = if upper { a >= b } else { a <= b };
        let (face, other) = if pos1_is_face {
            (&mut self.pos1, b)
        } else {
            (&mut self.pos2, a)
        };
        let value = axis_mut(face, axis_index);
        let moved = value.saturating_add(amount);
        *value = if upper { moved.max(other) } else { moved.min(other) };
    }

    fn resize(&mut self, changes: &[BlockVector3], grow: bool) {
        for change in changes {
            for axis_index in 0..3 {
                let amount = axis(*change, axis_index);
                if amount == 0 {
                    continue;
                }
                let upper = if grow { amount > 0 } else { amount < 0 };
                self.move_face(axis_index, upper, amount);
            }
        }
    }
}

impl RegionShape for CuboidRegion {
    fn minimum_point(&self) -> BlockVector3 {
        self.pos1.min(self.pos2)
    }

    fn maximum_point(&self) -> BlockVector3 {
        self.pos1.max(self.pos2)
    }

    fn contains(&self, position: BlockVector3) -> bool {
        position.contained_within(self.minimum_point(), self.maximum_point())
    }

    fn expand(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        self.resize(changes, true);
        Ok(())
    }

    fn contract(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        self.resize(changes, false);
        Ok(())
    }

    fn shift(&mut self, delta: BlockVector3) -> Result<(), RegionOperationError> {
        self.pos1 = self.pos1 + delta;
        self.pos2 = self.pos2 + delta;
        Ok(())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = BlockVector3> + '_> {
        Box::new(CuboidIter::new(self.minimum_point(), self.maximum_point()))
    }

    fn volume(&self) -> u64 {
        let d = self.dimensions();
        d.x as u64 * d.y as u64 * d.z as u64
    }
}

/// Scans a box with x varying fastest, then z, then y.
#[derive(Debug, Clone)]
pub struct CuboidIter {
    min: BlockVector3,
    max: BlockVector3,
    next: Option<BlockVector3>,
}

impl CuboidIter {
    pub fn new(min: BlockVector3, max: BlockVector3) -> Self {
        let empty = min.x > max.x || min.y > max.y || min.z > max.z;
        CuboidIter {
            min,
            max,
            next: (!empty).then_some(min),
        }
    }
}

impl Iterator for CuboidIter {
    type Item = BlockVector3;

    fn next(&mut self) -> Option<BlockVector3> {
        let current = self.next?;
        let mut n = current;
        if n.x < self.max.x {
            n.x += 1;
        } else {
            n.x = self.min.x;
            if n.z < self.max.z {
                n.z += 1;
            } else {
                n.z = self.min.z;
                if n.y < self.max.y {
                    n.y += 1;
                } else {
                    self.next = None;
                    return Some(current);
                }
            }
        }
        self.next = Some(n);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_matches_iteration() {
        let region = CuboidRegion::new(BlockVector3::new(3, 0, -2), BlockVector3::new(-1, 4, 1));
        assert_eq!(region.volume(), 5 * 5 * 4);
        assert_eq!(region.iter().count() as u64, region.volume());
    }

    #[test]
    fn test_expand_moves_matching_face() {
        let mut region = CuboidRegion::new(BlockVector3::new(0, 0, 0), BlockVector3::new(4, 4, 4));
        region
            .expand(&[BlockVector3::new(2, 0, 0), BlockVector3::new(0, -3, 0)])
            .unwrap();
        assert_eq!(region.minimum_point(), BlockVector3::new(0, -3, 0));
        assert_eq!(region.maximum_point(), BlockVector3::new(6, 4, 4));
    }

    #[test]
    fn test_contract_clamps_instead_of_inverting() {
        let mut region = CuboidRegion::new(BlockVector3::new(0, 0, 0), BlockVector3::new(4, 4, 4));
        region.contract(&[BlockVector3::new(10, 0, 0)]).unwrap();
        assert_eq!(region.minimum_point().x, 4);
        assert_eq!(region.maximum_point().x, 4);
        region.contract(&[BlockVector3::new(0, -2, 0)]).unwrap();
        assert_eq!(region.maximum_point().y, 2);
    }

    #[test]
    fn test_iteration_order() {
        let region = CuboidRegion::new(BlockVector3::ZERO, BlockVector3::new(1, 1, 1));
        let points: Vec<_> = region.iter().collect();
        assert_eq!(points[0], BlockVector3::new(0, 0, 0));
        assert_eq!(points[1], BlockVector3::new(1, 0, 0));
        assert_eq!(points[2], BlockVector3::new(0, 0, 1));
        assert_eq!(points[4], BlockVector3::new(0, 1, 0));
    }
}
