use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::vector::{Vector2, Vector3};

/// Integer block position. Ordering is lexicographic on (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockVector3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector3 {
    pub const ZERO: BlockVector3 = BlockVector3::new(0, 0, 0);
    pub const ONE: BlockVector3 = BlockVector3::new(1, 1, 1);
    pub const UNIT_X: BlockVector3 = BlockVector3::new(1, 0, 0);
    pub const UNIT_Y: BlockVector3 = BlockVector3::new(0, 1, 0);
    pub const UNIT_Z: BlockVector3 = BlockVector3::new(0, 0, 1);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockVector3 { x, y, z }
    }

    pub fn with_x(self, x: i32) -> Self {
        BlockVector3 { x, ..self }
    }

    pub fn with_y(self, y: i32) -> Self {
        BlockVector3 { y, ..self }
    }

    pub fn with_z(self, z: i32) -> Self {
        BlockVector3 { z, ..self }
    }

    pub fn add_xyz(self, x: i32, y: i32, z: i32) -> Self {
        BlockVector3::new(self.x + x, self.y + y, self.z + z)
    }

    pub fn min(self, other: BlockVector3) -> Self {
        BlockVector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(self, other: BlockVector3) -> Self {
        BlockVector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    pub fn abs(self) -> Self {
        BlockVector3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    pub fn dot(self, other: BlockVector3) -> i64 {
        self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64 + self.z as i64 * other.z as i64
    }

    pub fn cross(self, other: BlockVector3) -> Self {
        BlockVector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_sq(self) -> i64 {
        self.dot(self)
    }

    pub fn to_vector3(self) -> Vector3 {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Block center in floating point space.
    pub fn to_center(self) -> Vector3 {
        self.to_vector3().add_scalar(0.5)
    }

    pub fn to_vector2(self) -> BlockVector2 {
        BlockVector2::new(self.x, self.z)
    }

    pub fn contained_within(self, min: BlockVector3, max: BlockVector3) -> bool {
        self.x >= min.x
            && self.x <= max.x
            && self.y >= min.y
            && self.y <= max.y
            && self.z >= min.z
            && self.z <= max.z
    }
}

impl Add for BlockVector3 {
    type Output = BlockVector3;
    fn add(self, rhs: BlockVector3) -> BlockVector3 {
        BlockVector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockVector3 {
    type Output = BlockVector3;
    fn sub(self, rhs: BlockVector3) -> BlockVector3 {
        BlockVector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for BlockVector3 {
    type Output = BlockVector3;
    fn mul(self, rhs: i32) -> BlockVector3 {
        BlockVector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for BlockVector3 {
    type Output = BlockVector3;
    fn neg(self) -> BlockVector3 {
        BlockVector3::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for BlockVector3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        BlockVector3::new(x, y, z)
    }
}

impl fmt::Display for BlockVector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Integer column position on the horizontal (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct BlockVector2 {
    pub x: i32,
    pub z: i32,
}

impl BlockVector2 {
    pub const ZERO: BlockVector2 = BlockVector2::new(0, 0);

    pub const fn new(x: i32, z: i32) -> Self {
        BlockVector2 { x, z }
    }

    pub fn min(self, other: BlockVector2) -> Self {
        BlockVector2::new(self.x.min(other.x), self.z.min(other.z))
    }

    pub fn max(self, other: BlockVector2) -> Self {
        BlockVector2::new(self.x.max(other.x), self.z.max(other.z))
    }

    pub fn to_vector2(self) -> Vector2 {
        Vector2::new(self.x as f64, self.z as f64)
    }

    pub fn to_vector3(self, y: i32) -> BlockVector3 {
        BlockVector3::new(self.x, y, self.z)
    }
}

impl Add for BlockVector2 {
    type Output = BlockVector2;
    fn add(self, rhs: BlockVector2) -> BlockVector2 {
        BlockVector2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for BlockVector2 {
    type Output = BlockVector2;
    fn sub(self, rhs: BlockVector2) -> BlockVector2 {
        BlockVector2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl From<(i32, i32)> for BlockVector2 {
    fn from((x, z): (i32, i32)) -> Self {
        BlockVector2::new(x, z)
    }
}

impl fmt::Display for BlockVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
