//! Scalar signals derived from motion samples

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::{Acceleration, DeviceMotion};
use crate::math::Attitude;
use crate::Result;

/// Component of the user's acceleration along gravity
///
/// Positive when the device accelerates in the direction gravity points
/// (toward the ground), negative when it is pushed upward.
#[inline]
pub fn vertical_motion(gravity: &Acceleration, user_acceleration: &Acceleration) -> f64 {
    gravity.dot(user_acceleration)
}

impl DeviceMotion {
    /// [`vertical_motion`] of this sample
    pub fn vertical_motion(&self) -> f64 {
        vertical_motion(&self.gravity, &self.user_acceleration)
    }
}

/// Coarse heading of a device relative to where it started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacingDirection {
    /// Within a quarter turn of the initial heading
    Forward,
    /// More than a quarter turn away
    Backward,
}

impl FacingDirection {
    /// Classify `current` against `initial`
    ///
    /// The relative attitude `current · initial⁻¹` is reduced to its yaw;
    /// |yaw| < π/2 is forward, anything else backward. Either attitude
    /// having a zero or non-finite quaternion is an error.
    pub fn from_attitudes(initial: &Attitude, current: &Attitude) -> Result<Self> {
        current.quaternion().checked_norm_squared()?;
        let relative = current.multiply_by_inverse_of(initial)?;
        Ok(Self::from_yaw(relative.yaw()))
    }

    /// Classify a relative yaw in radians
    pub fn from_yaw(yaw: f64) -> Self {
        if yaw.abs() < FRAC_PI_2 {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

impl std::fmt::Display for FacingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}
