mod cuboid;
mod cylinder;
mod polygon;
pub mod polyhedron;

pub use cuboid::{CuboidIter, CuboidRegion};
pub use cylinder::CylinderRegion;
pub use polygon::Polygonal2DRegion;
pub use polyhedron::ConvexPolyhedralRegion;

use crate::error::RegionOperationError;
use crate::math::{BlockVector3, Vector3};

/// Shared contract of every region kind.
///
/// Every point yielded by [`RegionShape::iter`] satisfies
/// [`RegionShape::contains`], and every contained point lies within
/// `[minimum_point, maximum_point]`.
pub trait RegionShape {
    fn minimum_point(&self) -> BlockVector3;
    fn maximum_point(&self) -> BlockVector3;
    fn contains(&self, position: BlockVector3) -> bool;

    fn expand(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError>;
    fn contract(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError>;
    fn shift(&mut self, delta: BlockVector3) -> Result<(), RegionOperationError>;

    fn center(&self) -> Vector3 {
        (self.minimum_point().to_vector3() + self.maximum_point().to_vector3()) * 0.5
    }

    fn width(&self) -> i32 {
        self.maximum_point().x - self.minimum_point().x + 1
    }

    fn height(&self) -> i32 {
        self.maximum_point().y - self.minimum_point().y + 1
    }

    fn length(&self) -> i32 {
        self.maximum_point().z - self.minimum_point().z + 1
    }

    fn dimensions(&self) -> BlockVector3 {
        BlockVector3::new(self.width(), self.height(), self.length())
    }

    /// Scans the bounding box and keeps contained points.
    fn iter(&self) -> Box<dyn Iterator<Item = BlockVector3> + '_> {
        Box::new(
            CuboidIter::new(self.minimum_point(), self.maximum_point())
                .filter(move |p| self.contains(*p)),
        )
    }

    /// Exact number of contained points.
    fn volume(&self) -> u64 {
        self.iter().count() as u64
    }
}

// ============================================================================
// Delegate macro for Region
// ============================================================================

macro_rules! delegate_region {
    ($self:expr, $method:ident $(, $arg:expr)*) => {
        match $self {
            Region::Cuboid(r) => r.$method($($arg),*),
            Region::Cylinder(r) => r.$method($($arg),*),
            Region::Polygon(r) => r.$method($($arg),*),
            Region::Polyhedron(r) => r.$method($($arg),*),
        }
    };
}

/// The closed set of region kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Cuboid(CuboidRegion),
    Cylinder(CylinderRegion),
    Polygon(Polygonal2DRegion),
    Polyhedron(ConvexPolyhedralRegion),
}

impl Region {
    pub fn kind(&self) -> &'static str {
        match self {
            Region::Cuboid(_) => "cuboid",
            Region::Cylinder(_) => "cylinder",
            Region::Polygon(_) => "polygon",
            Region::Polyhedron(_) => "polyhedron",
        }
    }

    /// Every contained point, collected.
    pub fn points(&self) -> Vec<BlockVector3> {
        self.iter().collect()
    }

    /// Axis-aligned box around this region.
    pub fn bounding_box(&self) -> CuboidRegion {
        CuboidRegion::new(self.minimum_point(), self.maximum_point())
    }
}

impl RegionShape for Region {
    fn minimum_point(&self) -> BlockVector3 {
        delegate_region!(self, minimum_point)
    }

    fn maximum_point(&self) -> BlockVector3 {
        delegate_region!(self, maximum_point)
    }

    fn contains(&self, position: BlockVector3) -> bool {
        delegate_region!(self, contains, position)
    }

    fn expand(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        delegate_region!(self, expand, changes)
    }

    fn contract(&mut self, changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        delegate_region!(self, contract, changes)
    }

    fn shift(&mut self, delta: BlockVector3) -> Result<(), RegionOperationError> {
        delegate_region!(self, shift, delta)
    }

    fn center(&self) -> Vector3 {
        delegate_region!(self, center)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = BlockVector3> + '_> {
        delegate_region!(self, iter)
    }

    fn volume(&self) -> u64 {
        delegate_region!(self, volume)
    }
}

impl From<CuboidRegion> for Region {
    fn from(r: CuboidRegion) -> Self {
        Region::Cuboid(r)
    }
}

impl From<CylinderRegion> for Region {
    fn from(r: CylinderRegion) -> Self {
        Region::Cylinder(r)
    }
}

impl From<Polygonal2DRegion> for Region {
    fn from(r: Polygonal2DRegion) -> Self {
        Region::Polygon(r)
    }
}

impl From<ConvexPolyhedralRegion> for Region {
    fn from(r: ConvexPolyhedralRegion) -> Self {
        Region::Polyhedron(r)
    }
}
