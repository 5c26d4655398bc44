use super::edge::Edge;
use crate::math::Vector3;

/// Plane distance below which a point counts as lying on the face.
const PLANE_EPSILON: f64 = 1e-9;

/// A hull face. The normal follows the right-hand rule over the vertex
/// order, so counter-clockwise faces point outwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Vector3; 3],
    normal: Vector3,
    max_dot: f64,
}

impl Triangle {
    pub fn new(v0: Vector3, v1: Vector3, v2: Vector3) -> Self {
        let vertices = [v0, v1, v2];
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        let max_dot = vertices
            .iter()
            .map(|v| normal.dot(*v))
            .fold(f64::NEG_INFINITY, f64::max);
        Triangle {
            vertices,
            normal,
            max_dot,
        }
    }

    pub fn vertex(&self, index: usize) -> Vector3 {
        self.vertices[index % 3]
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        self.vertices
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Edge `index`, wrapping from the last vertex back to the first.
    pub fn edge(&self, index: usize) -> Edge {
        let i = index % 3;
        Edge::new(self.vertices[i], self.vertices[(i + 1) % 3])
    }

    /// Strictly on the outward side of this face's plane.
    pub fn above(&self, point: Vector3) -> bool {
        self.normal.dot(point) > self.max_dot + PLANE_EPSILON
    }

    /// Strictly on the inward side of this face's plane.
    pub fn below(&self, point: Vector3) -> bool {
        self.normal.dot(point) < self.max_dot - PLANE_EPSILON
    }

    pub fn shifted(&self, delta: Vector3) -> Triangle {
        Triangle::new(
            self.vertices[0] + delta,
            self.vertices[1] + delta,
            self.vertices[2] + delta,
        )
    }
}
