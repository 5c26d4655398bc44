mod edge;
mod triangle;

pub use edge::Edge;
pub use triangle::Triangle;

use indexmap::IndexSet;

use super::{CuboidIter, RegionShape};
use crate::error::RegionOperationError;
use crate::math::{BlockVector3, Vector3};

/// Convex hull grown one vertex at a time.
///
/// Vertices that cannot extend a hull yet (a third point on the line of the
/// first two, or further points in the plane of the first three) wait in a
/// backlog and are replayed once the hull gains volume.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexPolyhedralRegion {
    vertices: IndexSet<BlockVector3>,
    triangles: Vec<Triangle>,
    backlog: IndexSet<BlockVector3>,
    bounds: Option<(BlockVector3, BlockVector3)>,
    center_accum: BlockVector3,
}

impl ConvexPolyhedralRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Hull has at least one face.
    pub fn is_defined(&self) -> bool {
        !self.triangles.is_empty()
    }

    /// Hull vertices followed by backlogged ones.
    pub fn vertices(&self) -> Vec<BlockVector3> {
        self.vertices.iter().chain(self.backlog.iter()).copied().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() + self.backlog.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    fn contains_raw(&self, point: Vector3) -> bool {
        !self.triangles.iter().any(|t| t.above(point))
    }

    fn is_collinear(&self, vertex: BlockVector3) -> bool {
        let mut iter = self.vertices.iter().map(|v| v.to_vector3());
        match (iter.next(), iter.next()) {
            (Some(a), Some(b)) => (b - a).cross(vertex.to_vector3() - a).length_sq() == 0.0,
            _ => false,
        }
    }

    /// Adds a vertex to the hull. Returns `false` when the vertex is already
    /// known or lies inside the existing hull.
    pub fn add_vertex(&mut self, vertex: BlockVector3) -> bool {
        if self.vertices.contains(&vertex) || self.backlog.contains(&vertex) {
            return false;
        }
        let point = vertex.to_vector3();

        match self.vertices.len() {
            2 if self.is_collinear(vertex) => return self.backlog.insert(vertex),
            3 if self.contains_raw(point) => return self.backlog.insert(vertex),
            n if n > 3 && self.contains_raw(point) => return false,
            _ => {}
        }

        self.vertices.insert(vertex);
        self.center_accum = self.center_accum + vertex;
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(vertex), max.max(vertex)),
            None => (vertex, vertex),
        });

        match self.vertices.len() {
            0..=2 => return true,
            3 => {
                let v: Vec<Vector3> = self.vertices.iter().map(|v| v.to_vector3()).collect();
                self.triangles.push(Triangle::new(v[0], v[1], v[2]));
                self.triangles.push(Triangle::new(v[0], v[2], v[1]));
                return true;
            }
            _ => {}
        }

        // Faces that see the new vertex are replaced by a fan from their border.
        let mut border: IndexSet<Edge> = IndexSet::new();
        self.triangles.retain(|triangle| {
            if !triangle.above(point) {
                return true;
            }
            for i in 0..3 {
                let edge = triangle.edge(i);
                if !border.shift_remove(&edge) {
                    border.insert(edge);
                }
            }
            false
        });
        for edge in &border {
            self.triangles.push(edge.create_triangle(point));
        }

        if !self.backlog.is_empty() {
            self.vertices.shift_remove(&vertex);
            let pending: Vec<BlockVector3> = self.backlog.drain(..).collect();
            for v in pending {
                self.add_vertex(v);
            }
            self.vertices.insert(vertex);
        }
        true
    }
}

impl RegionShape for ConvexPolyhedralRegion {
    fn minimum_point(&self) -> BlockVector3 {
        self.bounds.map(|(min, _)| min).unwrap_or_default()
    }

    fn maximum_point(&self) -> BlockVector3 {
        self.bounds.map(|(_, max)| max).unwrap_or_default()
    }

    fn center(&self) -> Vector3 {
        if self.vertices.is_empty() {
            return Vector3::ZERO;
        }
        self.center_accum.to_vector3() * (1.0 / self.vertices.len() as f64)
    }

    fn contains(&self, position: BlockVector3) -> bool {
        if !self.is_defined() {
            return false;
        }
        if !position.contained_within(self.minimum_point(), self.maximum_point()) {
            return false;
        }
        self.contains_raw(position.to_vector3())
    }

    fn expand(&mut self, _changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        Ok(())
    }

    fn contract(&mut self, _changes: &[BlockVector3]) -> Result<(), RegionOperationError> {
        Ok(())
    }

    fn shift(&mut self, delta: BlockVector3) -> Result<(), RegionOperationError> {
        let offset = delta.to_vector3();
        self.vertices = self.vertices.iter().map(|v| *v + delta).collect();
        self.backlog = self.backlog.iter().map(|v| *v + delta).collect();
        for triangle in &mut self.triangles {
            *triangle = triangle.shifted(offset);
        }
        self.bounds = self.bounds.map(|(min, max)| (min + delta, max + delta));
        self.center_accum = self.center_accum + delta * self.vertices.len() as i32;
        Ok(())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = BlockVector3> + '_> {
        if !self.is_defined() {
            return Box::new(std::iter::empty());
        }
        Box::new(
            CuboidIter::new(self.minimum_point(), self.maximum_point())
                .filter(move |p| self.contains_raw(p.to_vector3())),
        )
    }
}
