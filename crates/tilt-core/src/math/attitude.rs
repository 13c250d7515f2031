//! Device attitude and its Euler-angle views
//!
//! Axis naming follows handheld devices rather than aircraft:
//!
//! - pitch: rotation about X, `atan2`, range (-π, π]
//! - roll: rotation about Y, `asin`, range [-π/2, π/2]
//! - yaw: rotation about Z, `atan2`, range (-π, π]
//!
//! The three angles compose as `yaw · roll · pitch` (Z, then Y, then X
//! applied to the body), matching [`Quaternion::from_euler`].
//!
//! # Gimbal lock
//!
//! When roll reaches ±π/2, pitch and yaw rotate about the same world axis
//! and only their difference is observable. In that case roll is reported
//! as exactly ±π/2, yaw as 0, and pitch carries the whole remaining rotation.

use serde::{Deserialize, Serialize};

use super::{normalize_angle, Quaternion, RotationMatrix};
use crate::Result;

/// |sin(roll)| at or above which the attitude is treated as gimbal locked
pub const GIMBAL_LOCK_THRESHOLD: f64 = 1.0 - 1e-9;

/// Euler angles in radians
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about Y
    pub roll: f64,
    /// Rotation about X
    pub pitch: f64,
    /// Rotation about Z
    pub yaw: f64,
}

impl EulerAngles {
    /// All three angles converted to degrees
    pub fn to_degrees(self) -> Self {
        Self {
            roll: self.roll.to_degrees(),
            pitch: self.pitch.to_degrees(),
            yaw: self.yaw.to_degrees(),
        }
    }
}

/// Orientation of a device, stored as a single quaternion
///
/// Angles and the rotation matrix are recomputed from the quaternion on
/// every call. A non-unit quaternion is treated as its normalized rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    quaternion: Quaternion,
}

impl Attitude {
    /// Wrap a quaternion; it is stored as given, without normalizing
    pub fn new(quaternion: Quaternion) -> Self {
        Self { quaternion }
    }

    /// The stored quaternion, exactly as supplied
    pub fn quaternion(&self) -> Quaternion {
        self.quaternion
    }

    /// Roll in radians (rotation about Y)
    pub fn roll(&self) -> f64 {
        self.euler().roll
    }

    /// Pitch in radians (rotation about X)
    pub fn pitch(&self) -> f64 {
        self.euler().pitch
    }

    /// Yaw in radians (rotation about Z)
    pub fn yaw(&self) -> f64 {
        self.euler().yaw
    }

    /// Roll in degrees
    pub fn roll_deg(&self) -> f64 {
        self.roll().to_degrees()
    }

    /// Pitch in degrees
    pub fn pitch_deg(&self) -> f64 {
        self.pitch().to_degrees()
    }

    /// Yaw in degrees
    pub fn yaw_deg(&self) -> f64 {
        self.yaw().to_degrees()
    }

    /// All three Euler angles in radians
    pub fn euler(&self) -> EulerAngles {
        let q = &self.quaternion;
        let s = 2.0 / q.norm_squared();
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);

        let sin_roll = s * (w * y - z * x);
        if sin_roll.abs() >= GIMBAL_LOCK_THRESHOLD {
            return EulerAngles {
                roll: std::f64::consts::FRAC_PI_2.copysign(sin_roll),
                pitch: normalize_angle(2.0 * x.atan2(w)),
                yaw: 0.0,
            };
        }

        EulerAngles {
            roll: sin_roll.asin(),
            pitch: (s * (w * x + y * z)).atan2(1.0 - s * (x * x + y * y)),
            yaw: (s * (w * z + x * y)).atan2(1.0 - s * (y * y + z * z)),
        }
    }

    /// Rotation matrix equivalent of this attitude
    ///
    /// Equal to `Rx(pitch) · Ry(roll) · Rz(yaw)` in the layout of
    /// [`RotationMatrix::from_quaternion`].
    pub fn rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_quaternion(&self.quaternion)
    }

    /// Attitude relative to `reference`: `self · reference⁻¹`
    pub fn multiply_by_inverse_of(&self, reference: &Attitude) -> Result<Attitude> {
        let inverse = reference.quaternion.inverse()?;
        Ok(Self::new(self.quaternion.multiply(&inverse)))
    }
}

impl From<Quaternion> for Attitude {
    fn from(quaternion: Quaternion) -> Self {
        Self::new(quaternion)
    }
}
