use super::{RegionSelector, SelectorType};
use crate::config::SelectorLimits;
use crate::error::IncompleteRegionError;
use crate::math::{BlockVector2, BlockVector3, Vector2};
use crate::regions::{CylinderRegion, Region, RegionShape};

#[derive(Debug, Clone, PartialEq, Default)]
enum CylinderSelection {
    #[default]
    Empty,
    /// Center chosen, no rim point yet.
    Center(CylinderRegion),
    /// At least one rim point seen. The radius may still be zero on an axis.
    Defined(CylinderRegion),
}

/// Center first, then points on the rim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CylinderRegionSelector {
    selection: CylinderSelection,
}

impl CylinderRegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest cylinder centered in the region's bounding box.
    pub fn from_region(region: &Region) -> Self {
        if let Region::Cylinder(c) = region {
            return CylinderRegionSelector {
                selection: CylinderSelection::Defined(c.clone()),
            };
        }
        let min = region.minimum_point();
        let max = region.maximum_point();
        let center = BlockVector2::new((min.x + max.x).div_euclid(2), (min.z + max.z).div_euclid(2));
        let radius = (max.to_vector2() - center).to_vector2();
        CylinderRegionSelector {
            selection: CylinderSelection::Defined(CylinderRegion::new(center, radius, min.y, max.y)),
        }
    }

    fn cylinder(&self) -> Option<&CylinderRegion> {
        match &self.selection {
            CylinderSelection::Empty => None,
            CylinderSelection::Center(r) | CylinderSelection::Defined(r) => Some(r),
        }
    }
}

impl RegionSelector for CylinderRegionSelector {
    fn selector_type(&self) -> SelectorType {
        SelectorType::Cylinder
    }

    fn select_primary(&mut self, position: BlockVector3, _limits: &dyn SelectorLimits) -> bool {
        if let CylinderSelection::Center(r) = &self.selection {
            if r.center_2d() == position.to_vector2() && r.min_y() == position.y {
                return false;
            }
        }
        self.selection = CylinderSelection::Center(CylinderRegion::new(
            position.to_vector2(),
            Vector2::ZERO,
            position.y,
            position.y,
        ));
        true
    }

    /// Rejected until a center exists.
    fn select_secondary(&mut self, position: BlockVector3, _limits: &dyn SelectorLimits) -> bool {
        let Some(mut region) = self.cylinder().cloned() else {
            return false;
        };
        region.extend_radius(position.to_vector2());
        region.extend_y(position.y);
        self.selection = CylinderSelection::Defined(region);
        true
    }

    fn primary_position(&self) -> Result<BlockVector3, IncompleteRegionError> {
        self.cylinder()
            .map(|r| r.center_2d().to_vector3(r.min_y()))
            .ok_or(IncompleteRegionError)
    }

    fn is_defined(&self) -> bool {
        matches!(self.selection, CylinderSelection::Defined(_))
    }

    fn region(&self) -> Result<Region, IncompleteRegionError> {
        match &self.selection {
            CylinderSelection::Defined(r) => Ok(Region::Cylinder(r.clone())),
            _ => Err(IncompleteRegionError),
        }
    }

    fn incomplete_region(&self) -> Region {
        let region = self.cylinder().cloned().unwrap_or_else(|| {
            CylinderRegion::new(BlockVector2::ZERO, Vector2::ZERO, 0, 0)
        });
        Region::Cylinder(region)
    }

    fn defined_region_mut(&mut self) -> Option<&mut dyn RegionShape> {
        match &mut self.selection {
            CylinderSelection::Defined(r) => Some(r),
            _ => None,
        }
    }

    /// The selection holds the region itself, so resizes are already seen.
    fn learn_changes(&mut self) {}

    fn clear(&mut self) {
        self.selection = CylinderSelection::Empty;
    }

    fn information_lines(&self) -> Vec<String> {
        let Some(r) = self.cylinder() else {
            return Vec::new();
        };
        let mut lines = vec![format!("Center: {}", r.center_2d())];
        if self.is_defined() {
            lines.push(format!("Radius: {}", r.radius()));
        }
        lines.push(format!("Height: {} - {}", r.min_y(), r.max_y()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PermissiveSelectorLimits;

    #[test]
    fn test_secondary_before_center_fails() {
        let mut selector = CylinderRegionSelector::new();
        assert!(!selector.select_secondary(BlockVector3::new(3, 0, 0), &PermissiveSelectorLimits));
        assert!(!selector.is_defined());
    }

    #[test]
    fn test_center_then_rim() {
        let limits = PermissiveSelectorLimits;
        let mut selector = CylinderRegionSelector::new();
        assert!(selector.select_primary(BlockVector3::new(0, 64, 0), &limits));
        assert!(!selector.is_defined());
        assert!(selector.select_secondary(BlockVector3::new(3, 70, -2), &limits));
        assert!(selector.is_defined());
        let Region::Cylinder(c) = selector.region().unwrap() else {
            panic!("expected a cylinder");
        };
        assert_eq!(c.radius(), Vector2::new(3.0, 2.0));
        assert_eq!((c.min_y(), c.max_y()), (64, 70));
    }

    #[test]
    fn test_rim_in_center_column_defines_a_line() {
        let limits = PermissiveSelectorLimits;
        let mut selector = CylinderRegionSelector::new();
        selector.select_primary(BlockVector3::new(0, 0, 0), &limits);
        assert!(selector.select_secondary(BlockVector3::new(0, 5, 0), &limits));
        assert!(selector.is_defined());
        let region = selector.region().unwrap();
        assert_eq!(region.volume(), 6);
        assert!(region.contains(BlockVector3::new(0, 3, 0)));
    }

    #[test]
    fn test_secondary_only_grows_radius() {
        let limits = PermissiveSelectorLimits;
        let mut selector = CylinderRegionSelector::new();
        selector.select_primary(BlockVector3::new(0, 0, 0), &limits);
        selector.select_secondary(BlockVector3::new(5, 0, 5), &limits);
        selector.select_secondary(BlockVector3::new(1, 0, 1), &limits);
        let Ok(Region::Cylinder(c)) = selector.region() else {
            panic!("expected a cylinder");
        };
        assert_eq!(c.radius(), Vector2::new(5.0, 5.0));
    }

    #[test]
    fn test_from_cuboid_region() {
        let region = Region::Cuboid(crate::regions::CuboidRegion::new(
            BlockVector3::new(0, 0, 0),
            BlockVector3::new(4, 3, 6),
        ));
        let selector = CylinderRegionSelector::from_region(&region);
        assert!(selector.is_defined());
        assert_eq!(selector.primary_position(), Ok(BlockVector3::new(2, 0, 3)));
    }
}
