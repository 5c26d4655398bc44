use super::{CuboidIter, RegionShape};
use crate::error::RegionOperationError;
use crate::math::{BlockVector2, BlockVector3};

/// A 2D polygon on the x/z plane extruded between `min_y` and `max_y`.
///
/// The polygon is assumed simple. Containment for self-intersecting
/// outlines follows whatever the crossing-number test yields and is not
/// otherwise defined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygonal2DRegion {
    points: Vec<BlockVector2>,
    min_y: i32,
    max_y: i32,
    min: BlockVector2,
    max: BlockVector2,
}

impl Polygonal2DRegion {
    pub fn new(points: Vec<BlockVector2>, min_y: i32, max_y: i32) -> Self {
        let mut region = Polygonal2DRegion {
            points,
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
            ..Default::default()
        };
        region.recalculate();
        region
    }

    pub fn points(&self) -> &[BlockVector2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn add_point(&mut self, point: BlockVector2) {
        self.points.push(point);
        self.recalculate();
    }

    pub fn set_point(&mut self, index: usize, point: BlockVector2) {
        if let Some(p) = self.points.get_mut(index) {
            *p = point;
            self.recalculate();
        }
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn set_min_y(&mut self, y: i32) {
        self.min_y = y;
        self.recalculate();
    }

    pub fn set_max_y(&mut self, y: i32) {
        self.max_y = y;
        self.recalculate();
    }

    /// Includes `y` in the vertical range.
    pub fn extend_y(&mut self, y: i32) {
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    fn recalculate(&mut self) {
        if self.min_y > self.max_y {
            std::mem::swap(&mut self.min_y, &mut self.max_y);
        }
        let mut iter = self.points.iter().copied();
        let Some(first) = iter.next() else {
            self.min = BlockVector2::ZERO;
            self.max = BlockVector2::ZERO;
            return;
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        self.min = min;
        self.max = max;
    }

    fn reject_horizontal(changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        if changes.iter().any(|c| c.x != 0 || c.z != 0) {
            return Err(RegionOperationError::VerticalOnly { kind: "polygon" });
        }
        Ok(())
    }
}

/// Crossing-number test on the x/z plane. Corners and edges count as inside.
pub(crate) fn polygon_contains(points: &[BlockVector2], target: BlockVector2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let (tx, tz) = (target.x as i64, target.z as i64);
    let mut inside = false;
    let mut old = points[points.len() - 1];
    for &new in points {
        if new == target {
            return true;
        }
        let (p1, p2) = if new.x > old.x { (old, new) } else { (new, old) };
        let (x1, z1, x2, z2) = (p1.x as i64, p1.z as i64, p2.x as i64, p2.z as i64);
        if x1 <= tx && tx <= x2 {
            let cross = (tz - z1) * (x2 - x1) - (z2 - z1) * (tx - x1);
            if cross == 0 {
                if (z1 <= tz) == (tz <= z2) {
                    return true;
                }
            } else if cross < 0 && x1 != tx {
                inside = !inside;
            }
        }
        old = new;
    }
    inside
}

impl RegionShape for Polygonal2DRegion {
    fn minimum_point(&self) -> BlockVector3 {
        self.min.to_vector3(self.min_y)
    }

    fn maximum_point(&self) -> BlockVector3 {
        self.max.to_vector3(self.max_y)
    }

    fn contains(&self, position: BlockVector3) -> bool {
        if position.y < self.min_y || position.y > self.max_y {
            return false;
        }
        polygon_contains(&self.points, position.to_vector2())
    }

    fn expand(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        Self::reject_horizontal(changes)?;
        for change in changes {
            if change.y > 0 {
                self.max_y += change.y;
            } else {
                self.min_y += change.y;
            }
        }
        self.recalculate();
        Ok(())
    }

    fn contract(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        Self::reject_horizontal(changes)?;
        for change in changes {
            if change.y > 0 {
                self.min_y = (self.min_y + change.y).min(self.max_y);
            } else {
                self.max_y = (self.max_y + change.y).max(self.min_y);
            }
        }
        Ok(())
    }

    fn shift(&mut self, delta: BlockVector3) -> Result<(), RegionOperationError> {
        let d = delta.to_vector2();
        for p in &mut self.points {
            *p = *p + d;
        }
        self.min_y += delta.y;
        self.max_y += delta.y;
        self.recalculate();
        Ok(())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = BlockVector3> + '_> {
        if self.points.len() < 3 {
            return Box::new(std::iter::empty());
        }
        Box::new(
            CuboidIter::new(self.minimum_point(), self.maximum_point())
                .filter(move |p| self.contains(*p)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygonal2DRegion {
        Polygonal2DRegion::new(
            vec![
                BlockVector2::new(0, 0),
                BlockVector2::new(4, 0),
                BlockVector2::new(4, 4),
                BlockVector2::new(0, 4),
            ],
            0,
            2,
        )
    }

    #[test]
    fn test_square_contains_edges_and_interior() {
        let region = square();
        assert!(region.contains(BlockVector3::new(0, 0, 0)));
        assert!(region.contains(BlockVector3::new(2, 1, 4)));
        assert!(region.contains(BlockVector3::new(2, 2, 2)));
        assert!(!region.contains(BlockVector3::new(5, 0, 2)));
        assert!(!region.contains(BlockVector3::new(2, 3, 2)));
        assert_eq!(region.volume(), 25 * 3);
    }

    #[test]
    fn test_triangle_volume() {
        let region = Polygonal2DRegion::new(
            vec![BlockVector2::new(0, 0), BlockVector2::new(4, 0), BlockVector2::new(0, 4)],
            0,
            0,
        );
        // 5 + 4 + 3 + 2 + 1 columns along the hypotenuse
        assert_eq!(region.volume(), 15);
    }

    #[test]
    fn test_horizontal_resize_rejected() {
        let mut region = square();
        assert!(region.expand(&[BlockVector3::new(1, 0, 0)]).is_err());
        region.expand(&[BlockVector3::new(0, 3, 0)]).unwrap();
        assert_eq!(region.max_y(), 5);
        region.contract(&[BlockVector3::new(0, 10, 0)]).unwrap();
        assert_eq!(region.min_y(), 5);
    }

    #[test]
    fn test_fewer_than_three_points_is_empty() {
        let region = Polygonal2DRegion::new(vec![BlockVector2::new(0, 0), BlockVector2::new(3, 3)], 0, 5);
        assert_eq!(region.volume(), 0);
        assert!(!region.contains(BlockVector3::new(0, 0, 0)));
    }
}
