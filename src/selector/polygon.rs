use log::debug;

use super::{RegionSelector, SelectorType};
use crate::config::SelectorLimits;
use crate::error::IncompleteRegionError;
use crate::math::{BlockVector2, BlockVector3};
use crate::regions::{Polygonal2DRegion, Region, RegionShape};

/// Outline points appended one at a time; defined from three points on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygonal2DRegionSelector {
    pos1: Option<BlockVector3>,
    region: Polygonal2DRegion,
}

impl Polygonal2DRegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline of the region's bounding box, or the polygon itself.
    pub fn from_region(region: &Region) -> Self {
        let min = region.minimum_point();
        let max = region.maximum_point();
        let points = match region {
            Region::Polygon(p) => p.points().to_vec(),
            _ => vec![
                BlockVector2::new(min.x, min.z),
                BlockVector2::new(max.x, min.z),
                BlockVector2::new(max.x, max.z),
                BlockVector2::new(min.x, max.z),
            ],
        };
        let pos1 = points.first().map(|p| p.to_vector3(min.y));
        Polygonal2DRegionSelector {
            pos1,
            region: Polygonal2DRegion::new(points, min.y, max.y),
        }
    }

    pub fn points(&self) -> &[BlockVector2] {
        self.region.points()
    }

    fn start(&mut self, position: BlockVector3) {
        self.region = Polygonal2DRegion::new(vec![position.to_vector2()], position.y, position.y);
    }
}

impl RegionSelector for Polygonal2DRegionSelector {
    fn selector_type(&self) -> SelectorType {
        SelectorType::Polygon
    }

    fn select_primary(&mut self, position: BlockVector3, _limits: &dyn SelectorLimits) -> bool {
        if self.pos1 == Some(position) {
            return false;
        }
        self.pos1 = Some(position);
        self.start(position);
        true
    }

    fn select_secondary(&mut self, position: BlockVector3, limits: &dyn SelectorLimits) -> bool {
        let Some(last) = self.region.points().last().copied() else {
            self.pos1.get_or_insert(position);
            self.start(position);
            return true;
        };
        if last == position.to_vector2() {
            return false;
        }
        if let Some(limit) = limits.polygon_vertex_limit() {
            if self.region.len() >= limit {
                debug!("polygon vertex limit of {} reached, ignoring {}", limit, position);
                return false;
            }
        }
        self.region.add_point(position.to_vector2());
        self.region.extend_y(position.y);
        true
    }

    fn primary_position(&self) -> Result<BlockVector3, IncompleteRegionError> {
        self.pos1.ok_or(IncompleteRegionError)
    }

    fn is_defined(&self) -> bool {
        self.region.len() > 2
    }

    fn region(&self) -> Result<Region, IncompleteRegionError> {
        if !self.is_defined() {
            return Err(IncompleteRegionError);
        }
        Ok(Region::Polygon(self.region.clone()))
    }

    fn incomplete_region(&self) -> Region {
        Region::Polygon(self.region.clone())
    }

    fn defined_region_mut(&mut self) -> Option<&mut dyn RegionShape> {
        if !self.is_defined() {
            return None;
        }
        Some(&mut self.region)
    }

    fn learn_changes(&mut self) {
        self.pos1 = self
            .region
            .points()
            .first()
            .map(|p| p.to_vector3(self.region.min_y()));
    }

    fn clear(&mut self) {
        self.pos1 = None;
        self.region = Polygonal2DRegion::default();
    }

    fn information_lines(&self) -> Vec<String> {
        vec![format!("# points: {}", self.region.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PermissiveSelectorLimits;

    struct Capped(usize);

    impl SelectorLimits for Capped {
        fn polygon_vertex_limit(&self) -> Option<usize> {
            Some(self.0)
        }

        fn polyhedron_vertex_limit(&self) -> Option<usize> {
            Some(self.0)
        }
    }

    #[test]
    fn test_defined_after_three_points() {
        let limits = PermissiveSelectorLimits;
        let mut selector = Polygonal2DRegionSelector::new();
        selector.select_primary(BlockVector3::new(0, 0, 0), &limits);
        selector.select_secondary(BlockVector3::new(5, 2, 0), &limits);
        assert!(!selector.is_defined());
        selector.select_secondary(BlockVector3::new(5, 4, 5), &limits);
        assert!(selector.is_defined());
        let region = selector.region().unwrap();
        assert_eq!(region.minimum_point().y, 0);
        assert_eq!(region.maximum_point().y, 4);
    }

    #[test]
    fn test_vertex_limit_is_silent() {
        let limits = Capped(3);
        let mut selector = Polygonal2DRegionSelector::new();
        assert!(selector.select_secondary(BlockVector3::new(0, 0, 0), &limits));
        assert!(selector.select_secondary(BlockVector3::new(4, 0, 0), &limits));
        assert!(selector.select_secondary(BlockVector3::new(4, 0, 4), &limits));
        let before = selector.clone();
        assert!(!selector.select_secondary(BlockVector3::new(0, 0, 4), &limits));
        assert_eq!(selector, before);
        assert_eq!(selector.points().len(), 3);
    }

    #[test]
    fn test_repeated_point_rejected() {
        let limits = PermissiveSelectorLimits;
        let mut selector = Polygonal2DRegionSelector::new();
        selector.select_primary(BlockVector3::new(1, 0, 1), &limits);
        assert!(!selector.select_secondary(BlockVector3::new(1, 9, 1), &limits));
    }
}
