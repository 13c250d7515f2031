//! Orientation math: quaternions, attitudes and rotation matrices
//!
//! Everything in this module is a pure function of its inputs. Types are
//! `Copy` values with no interior state, so they can be shared freely
//! across threads.

mod attitude;
mod quaternion;
mod rotation;

pub use attitude::{Attitude, EulerAngles, GIMBAL_LOCK_THRESHOLD};
pub use quaternion::Quaternion;
pub use rotation::RotationMatrix;

use std::f64::consts::{PI, TAU};

/// Type alias for 3D vectors
pub type Vector3 = nalgebra::Vector3<f64>;

/// Type alias for 3x3 matrices
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Wrap an angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(-PI), PI);
        assert_relative_eq!(normalize_angle(2.5 * PI), 0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-1.5 * PI), 0.5 * PI, epsilon = 1e-12);
    }
}
