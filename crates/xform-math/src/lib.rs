#![warn(missing_docs)]

//! Math types for xform.
//!
//! Thin wrappers around nalgebra: points, vectors, the 4x4 homogeneous
//! [`Transform`], and tolerance constants for comparing results.

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point lifted to homogeneous coordinates `[x, y, z, w]`.
pub type Homogeneous = Vector4<f64>;

/// A 4x4 affine transformation matrix.
///
/// Points are column vectors, so `a.then(&b)` applied to `p` is `a * (b * p)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose: `self * other`, i.e. `other` is applied first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Multiply the point lifted to `[x, y, z, 1]` and return all four components.
    ///
    /// The `w` component is returned as computed, never renormalized.
    pub fn apply_homogeneous(&self, p: &Point3) -> Homogeneous {
        self.matrix * Vector4::new(p.x, p.y, p.z, 1.0)
    }

    /// Transform a point, dropping the homogeneous component.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.apply_homogeneous(p);
        Point3::new(v.x, v.y, v.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix[(row, col)]
    }

    /// The translation column `(m03, m13, m23)`.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.get(0, 3), self.get(1, 3), self.get(2, 3))
    }

    /// Row-major copy of the matrix, as nested arrays.
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.matrix[(r, c)];
            }
        }
        rows
    }

    /// True if the bottom row is exactly `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.get(3, 0) == 0.0
            && self.get(3, 1) == 0.0
            && self.get(3, 2) == 0.0
            && self.get(3, 3) == 1.0
    }

    /// True if every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|v| v.is_finite())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for numeric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Absolute tolerance on coordinates and matrix entries.
    pub absolute: f64,
    /// Relative tolerance, scaled by the larger magnitude being compared.
    pub relative: f64,
}

impl Tolerance {
    /// Default tolerances (1e-6 absolute, 1e-9 relative).
    pub const DEFAULT: Self = Self {
        absolute: 1e-6,
        relative: 1e-9,
    };

    /// Check if two scalars are equal within tolerance.
    pub fn scalars_equal(&self, a: f64, b: f64) -> bool {
        let diff = (a - b).abs();
        diff <= self.absolute || diff <= self.relative * a.abs().max(b.abs())
    }

    /// Check if two points are coincident within tolerance, per coordinate.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        a.coords
            .iter()
            .zip(b.coords.iter())
            .all(|(x, y)| self.scalars_equal(*x, *y))
    }

    /// Check if two transforms agree entry by entry.
    pub fn transforms_equal(&self, a: &Transform, b: &Transform) -> bool {
        a.matrix
            .iter()
            .zip(b.matrix.iter())
            .all(|(x, y)| self.scalars_equal(*x, *y))
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
