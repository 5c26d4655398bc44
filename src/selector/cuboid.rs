use super::{RegionSelector, SelectorType};
use crate::config::SelectorLimits;
use crate::error::IncompleteRegionError;
use crate::math::BlockVector3;
use crate::regions::{CuboidRegion, Region, RegionShape};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum CuboidSelection {
    #[default]
    Empty,
    Primary(BlockVector3),
    Secondary(BlockVector3),
    Complete(CuboidRegion),
}

/// Two opposite corners.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CuboidRegionSelector {
    selection: CuboidSelection,
}

impl CuboidRegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_region(region: &Region) -> Self {
        CuboidRegionSelector {
            selection: CuboidSelection::Complete(CuboidRegion::new(
                region.minimum_point(),
                region.maximum_point(),
            )),
        }
    }

    pub fn position1(&self) -> Option<BlockVector3> {
        match self.selection {
            CuboidSelection::Primary(p) => Some(p),
            CuboidSelection::Complete(r) => Some(r.pos1()),
            _ => None,
        }
    }

    pub fn position2(&self) -> Option<BlockVector3> {
        match self.selection {
            CuboidSelection::Secondary(p) => Some(p),
            CuboidSelection::Complete(r) => Some(r.pos2()),
            _ => None,
        }
    }
}

impl RegionSelector for CuboidRegionSelector {
    fn selector_type(&self) -> SelectorType {
        SelectorType::Cuboid
    }

    fn select_primary(&mut self, position: BlockVector3, _limits: &dyn SelectorLimits) -> bool {
        if self.position1() == Some(position) {
            return false;
        }
        self.selection = match self.selection {
            CuboidSelection::Empty | CuboidSelection::Primary(_) => {
                CuboidSelection::Primary(position)
            }
            CuboidSelection::Secondary(pos2) => {
                CuboidSelection::Complete(CuboidRegion::new(position, pos2))
            }
            CuboidSelection::Complete(r) => {
                CuboidSelection::Complete(CuboidRegion::new(position, r.pos2()))
            }
        };
        true
    }

    fn select_secondary(&mut self, position: BlockVector3, _limits: &dyn SelectorLimits) -> bool {
        if self.position2() == Some(position) {
            return false;
        }
        self.selection = match self.selection {
            CuboidSelection::Empty | CuboidSelection::Secondary(_) => {
                CuboidSelection::Secondary(position)
            }
            CuboidSelection::Primary(pos1) => {
                CuboidSelection::Complete(CuboidRegion::new(pos1, position))
            }
            CuboidSelection::Complete(r) => {
                CuboidSelection::Complete(CuboidRegion::new(r.pos1(), position))
            }
        };
        true
    }

    fn primary_position(&self) -> Result<BlockVector3, IncompleteRegionError> {
        self.position1().ok_or(IncompleteRegionError)
    }

    fn is_defined(&self) -> bool {
        matches!(self.selection, CuboidSelection::Complete(_))
    }

    fn region(&self) -> Result<Region, IncompleteRegionError> {
        match self.selection {
            CuboidSelection::Complete(r) => Ok(Region::Cuboid(r)),
            _ => Err(IncompleteRegionError),
        }
    }

    fn incomplete_region(&self) -> Region {
        let region = match self.selection {
            CuboidSelection::Empty => CuboidRegion::new(BlockVector3::ZERO, BlockVector3::ZERO),
            CuboidSelection::Primary(p) | CuboidSelection::Secondary(p) => CuboidRegion::new(p, p),
            CuboidSelection::Complete(r) => r,
        };
        Region::Cuboid(region)
    }

    fn defined_region_mut(&mut self) -> Option<&mut dyn RegionShape> {
        match &mut self.selection {
            CuboidSelection::Complete(r) => Some(r),
            _ => None,
        }
    }

    fn learn_changes(&mut self) {
        // Both corners live in the region itself.
    }

    fn clear(&mut self) {
        self.selection = CuboidSelection::Empty;
    }

    fn information_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(p) = self.position1() {
            lines.push(format!("Position 1: {}", p));
        }
        if let Some(p) = self.position2() {
            lines.push(format!("Position 2: {}", p));
        }
        if let CuboidSelection::Complete(r) = &self.selection {
            lines.push(format!("Size: {}", r.dimensions()));
            lines.push(format!("Cuboid distance: {:.2}", (r.pos2() - r.pos1()).to_vector3().length()));
            lines.push(format!("# of blocks: {}", r.volume()));
        }
        lines
    }
}
