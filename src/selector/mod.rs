mod cuboid;
mod cylinder;
mod polygon;
mod polyhedron;

pub use cuboid::CuboidRegionSelector;
pub use cylinder::CylinderRegionSelector;
pub use polygon::Polygonal2DRegionSelector;
pub use polyhedron::ConvexPolyhedralRegionSelector;

use serde::{Deserialize, Serialize};

use crate::config::SelectorLimits;
use crate::error::{EditError, IncompleteRegionError};
use crate::math::BlockVector3;
use crate::regions::{Region, RegionShape};

/// Incremental builder of a region from clicked points.
pub trait RegionSelector {
    fn selector_type(&self) -> SelectorType;

    /// Returns `false` when the point was rejected or changed nothing.
    fn select_primary(&mut self, position: BlockVector3, limits: &dyn SelectorLimits) -> bool;
    fn select_secondary(&mut self, position: BlockVector3, limits: &dyn SelectorLimits) -> bool;

    fn primary_position(&self) -> Result<BlockVector3, IncompleteRegionError>;
    fn is_defined(&self) -> bool;

    /// The selected region, once enough points are known.
    fn region(&self) -> Result<Region, IncompleteRegionError>;

    /// Whatever has been selected so far, complete or not.
    fn incomplete_region(&self) -> Region;

    /// Mutable access to the region while the selection is defined.
    fn defined_region_mut(&mut self) -> Option<&mut dyn RegionShape>;

    /// Re-reads selector state after the region was changed in place.
    fn learn_changes(&mut self);

    fn clear(&mut self);

    fn information_lines(&self) -> Vec<String>;

    fn type_name(&self) -> &'static str {
        self.selector_type().display_name()
    }

    fn volume(&self) -> u64 {
        self.region().map(|r| r.volume()).unwrap_or(0)
    }

    fn expand(&mut self, changes: &[BlockVector3]) -> Result<(), EditError> {
        let region = self.defined_region_mut().ok_or(IncompleteRegionError)?;
        region.expand(changes)?;
        self.learn_changes();
        Ok(())
    }

    fn contract(&mut self, changes: &[BlockVector3]) -> Result<(), EditError> {
        let region = self.defined_region_mut().ok_or(IncompleteRegionError)?;
        region.contract(changes)?;
        self.learn_changes();
        Ok(())
    }

    fn shift(&mut self, delta: BlockVector3) -> Result<(), EditError> {
        let region = self.defined_region_mut().ok_or(IncompleteRegionError)?;
        region.shift(delta)?;
        self.learn_changes();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    Cuboid,
    Cylinder,
    Polygon,
    Polyhedron,
}

impl SelectorType {
    pub fn display_name(self) -> &'static str {
        match self {
            SelectorType::Cuboid => "cuboid",
            SelectorType::Cylinder => "cylinder",
            SelectorType::Polygon => "2Dx1D polygon",
            SelectorType::Polyhedron => "convex polyhedron",
        }
    }

    pub fn from_name(name: &str) -> Option<SelectorType> {
        match name.to_ascii_lowercase().as_str() {
            "cuboid" => Some(SelectorType::Cuboid),
            "cyl" | "cylinder" => Some(SelectorType::Cylinder),
            "poly" | "polygon" | "polygon2d" => Some(SelectorType::Polygon),
            "convex" | "hull" | "polyhedron" => Some(SelectorType::Polyhedron),
            _ => None,
        }
    }
}

macro_rules! delegate_selector {
    ($self:expr, $method:ident $(, $arg:expr)*) => {
        match $self {
            Selector::Cuboid(s) => s.$method($($arg),*),
            Selector::Cylinder(s) => s.$method($($arg),*),
            Selector::Polygon(s) => s.$method($($arg),*),
            Selector::Polyhedron(s) => s.$method($($arg),*),
        }
    };
}

/// The closed set of selector kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Cuboid(CuboidRegionSelector),
    Cylinder(CylinderRegionSelector),
    Polygon(Polygonal2DRegionSelector),
    Polyhedron(ConvexPolyhedralRegionSelector),
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Cuboid(CuboidRegionSelector::new())
    }
}

impl Selector {
    pub fn new(kind: SelectorType) -> Self {
        match kind {
            SelectorType::Cuboid => Selector::Cuboid(CuboidRegionSelector::new()),
            SelectorType::Cylinder => Selector::Cylinder(CylinderRegionSelector::new()),
            SelectorType::Polygon => Selector::Polygon(Polygonal2DRegionSelector::new()),
            SelectorType::Polyhedron => {
                Selector::Polyhedron(ConvexPolyhedralRegionSelector::new())
            }
        }
    }

    /// A selector of `kind` seeded from `old`, keeping as much of the
    /// existing selection as the new kind can express.
    pub fn convert(kind: SelectorType, old: &Selector) -> Selector {
        if old.selector_type() == kind {
            return old.clone();
        }
        let Ok(region) = old.region() else {
            return Selector::new(kind);
        };
        match kind {
            SelectorType::Cuboid => Selector::Cuboid(CuboidRegionSelector::from_region(&region)),
            SelectorType::Cylinder => {
                Selector::Cylinder(CylinderRegionSelector::from_region(&region))
            }
            SelectorType::Polygon => {
                Selector::Polygon(Polygonal2DRegionSelector::from_region(&region))
            }
            SelectorType::Polyhedron => {
                Selector::Polyhedron(ConvexPolyhedralRegionSelector::from_region(&region))
            }
        }
    }
}

impl RegionSelector for Selector {
    fn selector_type(&self) -> SelectorType {
        delegate_selector!(self, selector_type)
    }

    fn select_primary(&mut self, position: BlockVector3, limits: &dyn SelectorLimits) -> bool {
        delegate_selector!(self, select_primary, position, limits)
    }

    fn select_secondary(&mut self, position: BlockVector3, limits: &dyn SelectorLimits) -> bool {
        delegate_selector!(self, select_secondary, position, limits)
    }

    fn primary_position(&self) -> Result<BlockVector3, IncompleteRegionError> {
        delegate_selector!(self, primary_position)
    }

    fn is_defined(&self) -> bool {
        delegate_selector!(self, is_defined)
    }

    fn region(&self) -> Result<Region, IncompleteRegionError> {
        delegate_selector!(self, region)
    }

    fn incomplete_region(&self) -> Region {
        delegate_selector!(self, incomplete_region)
    }

    fn defined_region_mut(&mut self) -> Option<&mut dyn RegionShape> {
        delegate_selector!(self, defined_region_mut)
    }

    fn learn_changes(&mut self) {
        delegate_selector!(self, learn_changes)
    }

    fn clear(&mut self) {
        delegate_selector!(self, clear)
    }

    fn information_lines(&self) -> Vec<String> {
        delegate_selector!(self, information_lines)
    }
}
