use super::{CuboidIter, RegionShape};
use crate::error::RegionOperationError;
use crate::math::{BlockVector2, BlockVector3, Vector2, Vector3};

/// Elliptic cylinder: a horizontal ellipse around `center` with semi-axes
/// `radius`, extruded from `min_y` to `max_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderRegion {
    center: BlockVector2,
    radius: Vector2,
    min_y: i32,
    max_y: i32,
}

const MIN_CONTRACTED_RADIUS: f64 = 1.0;

/// One term of the ellipse equation. A zero semi-axis only admits a zero offset.
fn axis_term(offset: f64, radius: f64) -> f64 {
    if radius == 0.0 {
        if offset == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        (offset / radius) * (offset / radius)
    }
}

impl CylinderRegion {
    pub fn new(center: BlockVector2, radius: Vector2, min_y: i32, max_y: i32) -> Self {
        CylinderRegion {
            center,
            radius: radius.abs(),
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
        }
    }

    pub fn center_2d(&self) -> BlockVector2 {
        self.center
    }

    pub fn radius(&self) -> Vector2 {
        self.radius
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn set_center(&mut self, center: BlockVector2) {
        self.center = center;
    }

    pub fn set_radius(&mut self, radius: Vector2) {
        self.radius = radius.abs();
    }

    /// Grows the radius so that `position` falls inside, never shrinking it.
    pub fn extend_radius(&mut self, position: BlockVector2) {
        let offset = (position - self.center).to_vector2().abs();
        self.radius = self.radius.max(offset);
    }

    pub fn set_y_range(&mut self, min_y: i32, max_y: i32) {
        self.min_y = min_y.min(max_y);
        self.max_y = min_y.max(max_y);
    }

    /// Includes `y` in the vertical range.
    pub fn extend_y(&mut self, y: i32) {
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    fn horizontal_diff(changes: &[BlockVector3]) -> Result<BlockVector2, RegionOperationError> {
        let mut diff = BlockVector2::ZERO;
        for change in changes {
            diff = diff + change.to_vector2();
        }
        for delta in [diff.x, diff.z] {
            if delta % 2 != 0 {
                return Err(RegionOperationError::OddCylinderResize { delta });
            }
        }
        Ok(BlockVector2::new(diff.x / 2, diff.z / 2))
    }

    fn radius_change(changes: &[BlockVector3]) -> Vector2 {
        let mut total = Vector2::ZERO;
        for change in changes {
            total = total + change.to_vector2().to_vector2().abs();
        }
        Vector2::new((total.x / 2.0).floor(), (total.z / 2.0).floor())
    }
}

impl RegionShape for CylinderRegion {
    fn minimum_point(&self) -> BlockVector3 {
        let c = self.center.to_vector2();
        BlockVector3::new(
            (c.x - self.radius.x).ceil() as i32,
            self.min_y,
            (c.z - self.radius.z).ceil() as i32,
        )
    }

    fn maximum_point(&self) -> BlockVector3 {
        let c = self.center.to_vector2();
        BlockVector3::new(
            (c.x + self.radius.x).floor() as i32,
            self.max_y,
            (c.z + self.radius.z).floor() as i32,
        )
    }

    fn center(&self) -> Vector3 {
        Vector3::new(
            self.center.x as f64,
            (self.min_y as f64 + self.max_y as f64) / 2.0,
            self.center.z as f64,
        )
    }

    fn contains(&self, position: BlockVector3) -> bool {
        if position.y < self.min_y || position.y > self.max_y {
            return false;
        }
        let offset = (position.to_vector2() - self.center).to_vector2();
        axis_term(offset.x, self.radius.x) + axis_term(offset.z, self.radius.z) <= 1.0
    }

    fn expand(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        let diff = Self::horizontal_diff(changes)?;
        self.center = self.center + diff;
        self.radius = self.radius + Self::radius_change(changes);
        for change in changes {
            if change.y > 0 {
                self.max_y += change.y;
            } else {
                self.min_y += change.y;
            }
        }
        Ok(())
    }

    fn contract(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        let diff = Self::horizontal_diff(changes)?;
        self.center = self.center + diff;
        let shrunk = self.radius - Self::radius_change(changes);
        let floor = self
            .radius
            .min(Vector2::new(MIN_CONTRACTED_RADIUS, MIN_CONTRACTED_RADIUS));
        self.radius = shrunk.max(floor);
        for change in changes {
            let height = self.max_y - self.min_y;
            if change.y > 0 {
                self.min_y += change.y.min(height);
            } else {
                self.max_y += change.y.max(-height);
            }
        }
        Ok(())
    }

    fn shift(&mut self, delta: BlockVector3) -> Result<(), RegionOperationError> {
        self.center = self.center + delta.to_vector2();
        self.min_y += delta.y;
        self.max_y += delta.y;
        Ok(())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = BlockVector3> + '_> {
        Box::new(
            CuboidIter::new(self.minimum_point(), self.maximum_point())
                .filter(move |p| self.contains(*p)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder() -> CylinderRegion {
        CylinderRegion::new(BlockVector2::new(0, 0), Vector2::new(5.0, 5.0), 0, 10)
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let c = cylinder();
        assert!(c.contains(BlockVector3::new(5, 0, 0)));
        assert!(!c.contains(BlockVector3::new(6, 0, 0)));
        assert!(c.contains(BlockVector3::new(0, 10, -5)));
        assert!(!c.contains(BlockVector3::new(0, 11, 0)));
    }

    #[test]
    fn test_bounds_enclose_contents() {
        let c = cylinder();
        assert_eq!(c.minimum_point(), BlockVector3::new(-5, 0, -5));
        assert_eq!(c.maximum_point(), BlockVector3::new(5, 10, 5));
        let min = c.minimum_point();
        let max = c.maximum_point();
        assert!(c.iter().all(|p| p.contained_within(min, max)));
    }

    #[test]
    fn test_zero_radius_is_a_line() {
        let c = CylinderRegion::new(BlockVector2::new(2, 2), Vector2::ZERO, 0, 3);
        assert_eq!(c.volume(), 4);
        assert!(c.contains(BlockVector3::new(2, 1, 2)));
        assert!(!c.contains(BlockVector3::new(3, 1, 2)));
    }

    #[test]
    fn test_expand_horizontal_requires_even() {
        let mut c = cylinder();
        assert_eq!(
            c.expand(&[BlockVector3::new(3, 0, 0)]),
            Err(RegionOperationError::OddCylinderResize { delta: 3 })
        );
        c.expand(&[BlockVector3::new(4, 0, 0)]).unwrap();
        assert_eq!(c.center_2d(), BlockVector2::new(2, 0));
        assert_eq!(c.radius(), Vector2::new(7.0, 5.0));
        assert_eq!(c.minimum_point().x, -5);
        assert_eq!(c.maximum_point().x, 9);
    }

    #[test]
    fn test_contract_clamps_height_and_radius() {
        let mut c = cylinder();
        c.contract(&[BlockVector3::new(0, 20, 0)]).unwrap();
        assert_eq!((c.min_y(), c.max_y()), (10, 10));
        c.contract(&[BlockVector3::new(20, 0, 0)]).unwrap();
        assert_eq!(c.radius().x, 1.0);
    }

    #[test]
    fn test_contract_never_grows_a_thin_axis() {
        let mut c = CylinderRegion::new(BlockVector2::ZERO, Vector2::new(5.0, 0.0), 0, 10);
        let before = c.volume();
        c.contract(&[BlockVector3::new(0, 1, 0)]).unwrap();
        assert_eq!(c.radius(), Vector2::new(5.0, 0.0));
        assert!(c.volume() <= before);

        let mut c = CylinderRegion::new(BlockVector2::ZERO, Vector2::new(0.5, 3.0), 0, 0);
        let before = c.volume();
        c.contract(&[BlockVector3::new(4, 0, 0)]).unwrap();
        assert_eq!(c.radius().x, 0.5);
        assert!(c.volume() <= before);
    }

    #[test]
    fn test_contract_moves_center_towards_the_delta() {
        let mut c = cylinder();
        c.contract(&[BlockVector3::new(4, 0, 0)]).unwrap();
        assert_eq!(c.center_2d(), BlockVector2::new(2, 0));
        assert_eq!(c.minimum_point().x, -1);
        assert_eq!(c.maximum_point().x, 5);
    }
}
