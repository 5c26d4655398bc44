use serde::{Deserialize, Serialize};
use std::fmt;

use super::vector::Vector3;

/// Cosine of an angle in degrees, exact at multiples of 90.
fn d_cos(degrees: f64) -> f64 {
    match exact_quarter_turn(degrees) {
        Some(0) => 1.0,
        Some(1) | Some(3) => 0.0,
        Some(2) => -1.0,
        _ => degrees.to_radians().cos(),
    }
}

/// Sine of an angle in degrees, exact at multiples of 90.
fn d_sin(degrees: f64) -> f64 {
    match exact_quarter_turn(degrees) {
        Some(0) | Some(2) => 0.0,
        Some(1) => 1.0,
        Some(3) => -1.0,
        _ => degrees.to_radians().sin(),
    }
}

fn exact_quarter_turn(degrees: f64) -> Option<i64> {
    if degrees % 90.0 == 0.0 {
        Some(((degrees / 90.0) as i64).rem_euclid(4))
    } else {
        None
    }
}

/// A 3x4 affine matrix. The implicit last row is `0 0 0 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    m: [[f64; 4]; 3],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub fn from_rows(m: [[f64; 4]; 3]) -> Self {
        AffineTransform { m }
    }

    pub fn coefficients(&self) -> [[f64; 4]; 3] {
        self.m
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[2][0] * m[1][2])
            + m[0][2] * (m[1][0] * m[2][1] - m[2][0] * m[1][1])
    }

    /// Inverse matrix. A singular matrix has no inverse and yields `None`.
    pub fn inverse(&self) -> Option<AffineTransform> {
        if self.is_identity() {
            return Some(*self);
        }
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let [[m00, m01, m02, m03], [m10, m11, m12, m13], [m20, m21, m22, m23]] = self.m;
        Some(AffineTransform::from_rows([
            [
                (m11 * m22 - m21 * m12) / det,
                (m21 * m02 - m01 * m22) / det,
                (m01 * m12 - m11 * m02) / det,
                (m01 * (m22 * m13 - m12 * m23) + m02 * (m11 * m23 - m21 * m13)
                    - m03 * (m11 * m22 - m21 * m12))
                    / det,
            ],
            [
                (m20 * m12 - m10 * m22) / det,
                (m00 * m22 - m20 * m02) / det,
                (m10 * m02 - m00 * m12) / det,
                (m00 * (m12 * m23 - m22 * m13) - m02 * (m10 * m23 - m20 * m13)
                    + m03 * (m10 * m22 - m20 * m12))
                    / det,
            ],
            [
                (m10 * m21 - m20 * m11) / det,
                (m20 * m01 - m00 * m21) / det,
                (m00 * m11 - m10 * m01) / det,
                (m00 * (m21 * m13 - m11 * m23) + m01 * (m10 * m23 - m20 * m13)
                    - m03 * (m10 * m21 - m20 * m11))
                    / det,
            ],
        ]))
    }

    fn multiply(a: &[[f64; 4]; 3], b: &[[f64; 4]; 3]) -> AffineTransform {
        let mut n = [[0.0; 4]; 3];
        for (r, row) in n.iter_mut().enumerate() {
            for c in 0..4 {
                row[c] = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
            }
            row[3] += a[r][3];
        }
        AffineTransform { m: n }
    }

    /// `self * that`: the result applies `that` first, then `self`.
    pub fn concatenate(&self, that: &AffineTransform) -> AffineTransform {
        Self::multiply(&self.m, &that.m)
    }

    /// `that * self`: the result applies `self` first, then `that`.
    pub fn pre_concatenate(&self, that: &AffineTransform) -> AffineTransform {
        Self::multiply(&that.m, &self.m)
    }

    pub fn translate(&self, v: Vector3) -> AffineTransform {
        self.concatenate(&AffineTransform::from_rows([
            [1.0, 0.0, 0.0, v.x],
            [0.0, 1.0, 0.0, v.y],
            [0.0, 0.0, 1.0, v.z],
        ]))
    }

    pub fn rotate_x(&self, degrees: f64) -> AffineTransform {
        let (cot, sit) = (d_cos(degrees), d_sin(degrees));
        self.concatenate(&AffineTransform::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cot, -sit, 0.0],
            [0.0, sit, cot, 0.0],
        ]))
    }

    pub fn rotate_y(&self, degrees: f64) -> AffineTransform {
        let (cot, sit) = (d_cos(degrees), d_sin(degrees));
        self.concatenate(&AffineTransform::from_rows([
            [cot, 0.0, sit, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sit, 0.0, cot, 0.0],
        ]))
    }

    pub fn rotate_z(&self, degrees: f64) -> AffineTransform {
        let (cot, sit) = (d_cos(degrees), d_sin(degrees));
        self.concatenate(&AffineTransform::from_rows([
            [cot, -sit, 0.0, 0.0],
            [sit, cot, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ]))
    }

    pub fn scale(&self, s: Vector3) -> AffineTransform {
        self.concatenate(&AffineTransform::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
        ]))
    }

    pub fn apply(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            v.x * m[0][0] + v.y * m[0][1] + v.z * m[0][2] + m[0][3],
            v.x * m[1][0] + v.y * m[1][1] + v.z * m[1][2] + m[1][3],
            v.x * m[2][0] + v.y * m[2][1] + v.z * m[2][2] + m[2][3],
        )
    }

    /// Determinant of the x/z submatrix is negative.
    pub fn is_horizontal_flip(&self) -> bool {
        self.m[0][0] * self.m[2][2] - self.m[0][2] * self.m[2][0] < 0.0
    }

    pub fn is_vertical_flip(&self) -> bool {
        self.m[1][1] < 0.0
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.m;
        write!(
            f,
            "Affine[{} {} {} {}, {} {} {} {}, {} {} {} {}]",
            m[0][0], m[0][1], m[0][2], m[0][3], m[1][0], m[1][1], m[1][2], m[1][3], m[2][0],
            m[2][1], m[2][2], m[2][3]
        )
    }
}

/// A composable mapping of points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Transform {
    #[default]
    Identity,
    Affine(AffineTransform),
}

impl Transform {
    pub fn apply(&self, v: Vector3) -> Vector3 {
        match self {
            Transform::Identity => v,
            Transform::Affine(a) => a.apply(v),
        }
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Transform::Identity => true,
            Transform::Affine(a) => a.is_identity(),
        }
    }

    /// Sequential composition: the result applies `self`, then `next`.
    pub fn combine(&self, next: &Transform) -> Transform {
        match (self, next) {
            (Transform::Identity, t) | (t, Transform::Identity) => *t,
            (Transform::Affine(a), Transform::Affine(b)) => Transform::Affine(a.pre_concatenate(b)),
        }
    }

    pub fn inverse(&self) -> Option<Transform> {
        match self {
            Transform::Identity => Some(Transform::Identity),
            Transform::Affine(a) => a.inverse().map(Transform::Affine),
        }
    }

    pub fn as_affine(&self) -> AffineTransform {
        match self {
            Transform::Identity => AffineTransform::IDENTITY,
            Transform::Affine(a) => *a,
        }
    }
}

impl From<AffineTransform> for Transform {
    fn from(a: AffineTransform) -> Self {
        Transform::Affine(a)
    }
}
