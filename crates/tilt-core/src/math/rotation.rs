//! 3x3 rotation matrices derived from attitude quaternions

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::{Matrix3, Quaternion, Vector3};

/// A 3x3 rotation matrix, addressed row-then-column as `m11..m33`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix {
    matrix: Matrix3,
}

impl RotationMatrix {
    /// Identity rotation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Build from row-major entries
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r1, r2, r3] = rows;
        Self {
            matrix: Matrix3::new(
                r1[0], r1[1], r1[2], //
                r2[0], r2[1], r2[2], //
                r3[0], r3[1], r3[2],
            ),
        }
    }

    /// Rotation matrix of a quaternion
    ///
    /// Rows are the reference-frame axes expressed in device coordinates,
    /// so a quarter turn about X gives `m23 = 1` and `m32 = -1`. This is
    /// the transpose of the matrix that carries device axes into the
    /// reference frame.
    ///
    /// Every quadratic term is scaled by `1 / |q|²`, so non-unit quaternions
    /// produce the matrix of their normalized rotation. A zero quaternion
    /// has no rotation and yields NaN entries; callers validate with
    /// [`Quaternion::normalized`] when that can happen.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let s = 2.0 / q.norm_squared();
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);

        Self::from_rows([
            [
                1.0 - s * (y * y + z * z),
                s * (x * y + w * z),
                s * (x * z - w * y),
            ],
            [
                s * (x * y - w * z),
                1.0 - s * (x * x + z * z),
                s * (y * z + w * x),
            ],
            [
                s * (x * z + w * y),
                s * (y * z - w * x),
                1.0 - s * (x * x + y * y),
            ],
        ])
    }

    /// Underlying nalgebra matrix
    pub fn as_matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Row-major copy of the entries
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Row 1, column 1
    pub fn m11(&self) -> f64 {
        self.matrix[(0, 0)]
    }

    /// Row 1, column 2
    pub fn m12(&self) -> f64 {
        self.matrix[(0, 1)]
    }

    /// Row 1, column 3
    pub fn m13(&self) -> f64 {
        self.matrix[(0, 2)]
    }

    /// Row 2, column 1
    pub fn m21(&self) -> f64 {
        self.matrix[(1, 0)]
    }

    /// Row 2, column 2
    pub fn m22(&self) -> f64 {
        self.matrix[(1, 1)]
    }

    /// Row 2, column 3
    pub fn m23(&self) -> f64 {
        self.matrix[(1, 2)]
    }

    /// Row 3, column 1
    pub fn m31(&self) -> f64 {
        self.matrix[(2, 0)]
    }

    /// Row 3, column 2
    pub fn m32(&self) -> f64 {
        self.matrix[(2, 1)]
    }

    /// Row 3, column 3
    pub fn m33(&self) -> f64 {
        self.matrix[(2, 2)]
    }

    /// Transposed matrix; the inverse rotation for orthonormal input
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }

    /// Determinant (1 for a proper rotation)
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// True when `Mᵀ·M = I` and `det M = 1` within `tolerance`
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let gram = self.matrix.transpose() * self.matrix;
        gram.abs_diff_eq(&Matrix3::identity(), tolerance)
            && (self.determinant() - 1.0).abs() <= tolerance
    }

    /// Express a reference-frame vector in device coordinates
    pub fn transform(&self, v: Vector3) -> Vector3 {
        self.matrix * v
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Quaternion> for RotationMatrix {
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(&q)
    }
}

impl std::ops::Mul for RotationMatrix {
    type Output = RotationMatrix;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl AbsDiffEq for RotationMatrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.matrix.abs_diff_eq(&other.matrix, epsilon)
    }
}

impl RelativeEq for RotationMatrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.matrix.relative_eq(&other.matrix, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

    fn about(axis: Vector3, angle: f64) -> RotationMatrix {
        RotationMatrix::from(Quaternion::from_axis_angle(axis, angle))
    }

    #[test]
    fn test_identity_quaternion() {
        let m = RotationMatrix::from(Quaternion::identity());
        assert_eq!(m, RotationMatrix::identity());
    }

    #[test]
    fn test_non_unit_quaternion_is_normalized() {
        let m = RotationMatrix::from(Quaternion::new(1.0, 2.0, 3.0, 4.0));
        let expected = RotationMatrix::from_rows([
            [2.0 / 15.0, 14.0 / 15.0, -1.0 / 3.0],
            [-2.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0],
            [11.0 / 15.0, 2.0 / 15.0, 2.0 / 3.0],
        ]);
        assert_abs_diff_eq!(m, expected, epsilon = 1e-12);
        assert!(m.is_orthonormal(1e-12));
    }

    #[test]
    fn test_recorded_entries_for_unnormalized_quaternion() {
        let m = RotationMatrix::from(Quaternion::new(1.0, 2.0, 3.0, 4.0));
        assert_abs_diff_eq!(m.m11(), 0.1333, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m12(), 0.9333, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m21(), -0.6667, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m22(), 0.3333, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m23(), 0.6667, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m32(), 0.1333, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m33(), 0.6667, epsilon = 1e-4);
        // m13 and m31 follow from orthonormality, not from the recorded table
        assert_abs_diff_eq!(m.m13(), -1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.m31(), 11.0 / 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_about_x() {
        let h = FRAC_1_SQRT_2;
        let expected = RotationMatrix::from_rows([
            [1.0, 0.0, 0.0], //
            [0.0, 0.0, 1.0],
            [0.0, -1.0, 0.0],
        ]);
        assert_abs_diff_eq!(about(Vector3::x(), FRAC_PI_2), expected, epsilon = 1e-15);

        let expected = RotationMatrix::from_rows([
            [1.0, 0.0, 0.0], //
            [0.0, h, h],
            [0.0, -h, h],
        ]);
        assert_abs_diff_eq!(about(Vector3::x(), FRAC_PI_4), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_about_y() {
        let h = FRAC_1_SQRT_2;
        let expected = RotationMatrix::from_rows([
            [0.0, 0.0, -1.0], //
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ]);
        assert_abs_diff_eq!(about(Vector3::y(), FRAC_PI_2), expected, epsilon = 1e-15);

        let expected = RotationMatrix::from_rows([
            [h, 0.0, -h], //
            [0.0, 1.0, 0.0],
            [h, 0.0, h],
        ]);
        assert_abs_diff_eq!(about(Vector3::y(), FRAC_PI_4), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_about_z() {
        let h = FRAC_1_SQRT_2;
        let expected = RotationMatrix::from_rows([
            [0.0, 1.0, 0.0], //
            [-1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert_abs_diff_eq!(about(Vector3::z(), FRAC_PI_2), expected, epsilon = 1e-15);

        let expected = RotationMatrix::from_rows([
            [h, h, 0.0], //
            [-h, h, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert_abs_diff_eq!(about(Vector3::z(), FRAC_PI_4), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_transpose_of_nalgebra_rotation() {
        let q = Quaternion::from_euler(0.3, -0.5, 2.0);
        let m = RotationMatrix::from(q);
        let reference = q.to_nalgebra().to_rotation_matrix().into_inner().transpose();
        assert_abs_diff_eq!(*m.as_matrix(), reference, epsilon = 1e-12);
    }

    #[test]
    fn test_transpose_is_inverse() {
        let m = RotationMatrix::from(Quaternion::from_euler(0.3, 0.2, -1.0));
        assert_abs_diff_eq!(m * m.transpose(), RotationMatrix::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_undoes_quaternion_rotation() {
        let q = Quaternion::from_euler(1.0, 0.5, -0.25);
        let v = Vector3::new(0.3, -2.0, 1.5);
        let m = RotationMatrix::from(q);
        assert_abs_diff_eq!(m.transform(q.rotate_vector(v)), v, epsilon = 1e-12);
        assert_abs_diff_eq!(m.transform(v), q.conjugate().rotate_vector(v), epsilon = 1e-12);
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let m = RotationMatrix::from_rows(rows);
        assert_eq!(m.to_rows(), rows);
        assert_eq!(m.m23(), 6.0);
        assert_eq!(m.m32(), 8.0);
        assert!(!m.is_orthonormal(1e-6));
    }
}
