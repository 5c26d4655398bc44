use log::debug;

use super::{RegionSelector, SelectorType};
use crate::config::SelectorLimits;
use crate::error::IncompleteRegionError;
use crate::math::BlockVector3;
use crate::regions::{ConvexPolyhedralRegion, CuboidIter, Region, RegionShape};

/// Hull of every selected point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexPolyhedralRegionSelector {
    pos1: Option<BlockVector3>,
    region: ConvexPolyhedralRegion,
}

impl ConvexPolyhedralRegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hull over the corners of the region's bounding box.
    pub fn from_region(region: &Region) -> Self {
        let mut selector = Self::new();
        if let Region::Polyhedron(p) = region {
            selector.region = p.clone();
            selector.learn_changes();
            return selector;
        }
        let min = region.minimum_point();
        let max = region.maximum_point();
        let span = max - min;
        for corner in CuboidIter::new(BlockVector3::ZERO, BlockVector3::ONE) {
            let vertex = BlockVector3::new(
                min.x + corner.x * span.x,
                min.y + corner.y * span.y,
                min.z + corner.z * span.z,
            );
            selector.region.add_vertex(vertex);
        }
        selector.pos1 = Some(min);
        selector
    }

    pub fn vertices(&self) -> Vec<BlockVector3> {
        self.region.vertices()
    }
}

impl RegionSelector for ConvexPolyhedralRegionSelector {
    fn selector_type(&self) -> SelectorType {
        SelectorType::Polyhedron
    }

    fn select_primary(&mut self, position: BlockVector3, _limits: &dyn SelectorLimits) -> bool {
        self.region.clear();
        self.pos1 = Some(position);
        self.region.add_vertex(position)
    }

    fn select_secondary(&mut self, position: BlockVector3, limits: &dyn SelectorLimits) -> bool {
        if let Some(limit) = limits.polyhedron_vertex_limit() {
            if self.region.vertex_count() >= limit {
                debug!("polyhedron vertex limit of {} reached, ignoring {}", limit, position);
                return false;
            }
        }
        let added = self.region.add_vertex(position);
        if added && self.pos1.is_none() {
            self.pos1 = Some(position);
        }
        added
    }

    fn primary_position(&self) -> Result<BlockVector3, IncompleteRegionError> {
        self.pos1.ok_or(IncompleteRegionError)
    }

    fn is_defined(&self) -> bool {
        self.region.is_defined()
    }

    fn region(&self) -> Result<Region, IncompleteRegionError> {
        if !self.is_defined() {
            return Err(IncompleteRegionError);
        }
        Ok(Region::Polyhedron(self.region.clone()))
    }

    fn incomplete_region(&self) -> Region {
        Region::Polyhedron(self.region.clone())
    }

    fn defined_region_mut(&mut self) -> Option<&mut dyn RegionShape> {
        if !self.is_defined() {
            return None;
        }
        Some(&mut self.region)
    }

    fn learn_changes(&mut self) {
        self.pos1 = self.region.vertices().first().copied();
    }

    fn clear(&mut self) {
        self.pos1 = None;
        self.region.clear();
    }

    fn information_lines(&self) -> Vec<String> {
        vec![
            format!("Vertices: {}", self.region.vertex_count()),
            format!("Triangles: {}", self.region.triangles().len()),
        ]
    }
}
