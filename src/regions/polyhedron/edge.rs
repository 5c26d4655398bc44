use std::hash::{Hash, Hasher};

use super::triangle::Triangle;
use crate::math::Vector3;

/// An undirected segment. `(a, b)` and `(b, a)` compare and hash equal.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    start: Vector3,
    end: Vector3,
}

fn sort_key(v: &Vector3) -> (u64, u64, u64) {
    let bits = |f: f64| if f == 0.0 { 0 } else { f.to_bits() };
    (bits(v.x), bits(v.y), bits(v.z))
}

impl Edge {
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Edge { start, end }
    }

    pub fn start(&self) -> Vector3 {
        self.start
    }

    pub fn end(&self) -> Vector3 {
        self.end
    }

    /// Face joining this edge to `apex`, keeping the edge's direction.
    pub fn create_triangle(&self, apex: Vector3) -> Triangle {
        Triangle::new(self.start, self.end, apex)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Edge) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = if sort_key(&self.start) <= sort_key(&self.end) {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        a.hash(state);
        b.hash(state);
    }
}
