//! Quaternion arithmetic for 3D rotations
//!
//! Components are stored verbatim in (x, y, z, w) order, Hamilton
//! convention. Nothing here normalizes implicitly: callers that need a
//! rotation either pass unit quaternions or go through [`Quaternion::normalized`].

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use super::Vector3;
use crate::{Error, Result};

/// A quaternion `w + xi + yj + zk`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// X (i) component
    pub x: f64,
    /// Y (j) component
    pub y: f64,
    /// Z (k) component
    pub z: f64,
    /// Scalar component (w)
    pub w: f64,
}

impl Quaternion {
    /// Create a quaternion from raw components
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Identity quaternion (no rotation)
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// The axis does not need to be unit length. A zero axis yields the identity.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let norm = axis.norm();
        if norm < 1e-12 {
            return Self::identity();
        }
        let (s, c) = (angle / 2.0).sin_cos();
        let a = axis / norm;
        Self::new(a.x * s, a.y * s, a.z * s, c)
    }

    /// Compose a rotation from Euler angles in radians
    ///
    /// The result is `yaw about Z * roll about Y * pitch about X`, so
    /// [`Attitude`](super::Attitude) recovers the same three angles away
    /// from gimbal lock.
    pub fn from_euler(pitch: f64, roll: f64, yaw: f64) -> Self {
        let qx = Self::from_axis_angle(Vector3::x(), pitch);
        let qy = Self::from_axis_angle(Vector3::y(), roll);
        let qz = Self::from_axis_angle(Vector3::z(), yaw);
        qz * qy * qx
    }

    /// Convert from nalgebra's UnitQuaternion
    pub fn from_nalgebra(uq: UnitQuaternion<f64>) -> Self {
        Self::new(uq.i, uq.j, uq.k, uq.w)
    }

    /// Convert to nalgebra's UnitQuaternion (normalizes)
    pub fn to_nalgebra(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(self.w, self.x, self.y, self.z))
    }

    /// Hamilton product `self * other`
    ///
    /// Non-commutative: the result applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        let (a, b) = (self, other);
        Self {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }

    /// Conjugate: vector part negated
    #[must_use]
    pub fn conjugate(&self) -> Quaternion {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, `conjugate / |q|²`
    ///
    /// Equals the conjugate for unit quaternions. Fails with
    /// [`Error::InvalidQuaternion`] when the squared norm is zero or not finite.
    pub fn inverse(&self) -> Result<Quaternion> {
        let n2 = self.checked_norm_squared()?;
        let c = self.conjugate();
        Ok(Self::new(c.x / n2, c.y / n2, c.z / n2, c.w / n2))
    }

    /// Squared magnitude
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Magnitude
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Unit-length copy of this quaternion
    pub fn normalized(&self) -> Result<Quaternion> {
        let n = self.checked_norm_squared()?.sqrt();
        Ok(Self::new(self.x / n, self.y / n, self.z / n, self.w / n))
    }

    /// Dot product between two quaternions
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Rotate a vector by this quaternion
    ///
    /// Non-unit quaternions are normalized first; a zero quaternion
    /// leaves the vector unchanged.
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        if self.checked_norm_squared().is_err() {
            return v;
        }
        self.to_nalgebra() * v
    }

    pub(crate) fn checked_norm_squared(&self) -> Result<f64> {
        let n2 = self.norm_squared();
        if n2 == 0.0 || !n2.is_finite() {
            return Err(Error::InvalidQuaternion(n2.to_string()));
        }
        Ok(n2)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<&Quaternion> for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: &Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Quaternion;

    /// Same rotation, opposite hemisphere
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<UnitQuaternion<f64>> for Quaternion {
    fn from(uq: UnitQuaternion<f64>) -> Self {
        Self::from_nalgebra(uq)
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
