//! Motion samples delivered by a sensor service
//!
//! All samples are plain values. Timestamps are seconds on a monotonic
//! clock owned by the sensor service; this crate only relies on them being
//! non-decreasing within one stream.

use serde::{Deserialize, Serialize};

use crate::math::{Attitude, Vector3};

/// Acceleration in g
pub type Acceleration = Vector3;

/// Rotation rate in rad/s
pub type RotationRate = Vector3;

/// Magnetic field in microteslas
pub type MagneticField = Vector3;

/// Raw accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerometerData {
    pub acceleration: Acceleration,
    pub timestamp: f64,
}

/// Raw gyroscope reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GyroData {
    pub rotation_rate: RotationRate,
    pub timestamp: f64,
}

/// Raw magnetometer reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnetometerData {
    pub magnetic_field: MagneticField,
    pub timestamp: f64,
}

/// How well the magnetometer has been calibrated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagneticFieldCalibrationAccuracy {
    #[default]
    Uncalibrated,
    Low,
    Medium,
    High,
}

/// Magnetic field with device bias removed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibratedMagneticField {
    pub field: MagneticField,
    pub accuracy: MagneticFieldCalibrationAccuracy,
}

impl Default for CalibratedMagneticField {
    fn default() -> Self {
        Self {
            field: Vector3::zeros(),
            accuracy: MagneticFieldCalibrationAccuracy::Uncalibrated,
        }
    }
}

/// One fused device-motion sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceMotion {
    /// Orientation relative to the reference frame the updates were started with
    pub attitude: Attitude,
    /// Gravity in the device frame (g)
    pub gravity: Acceleration,
    /// Heading relative to the reference frame, degrees in [0, 360); negative when unavailable
    pub heading: f64,
    pub magnetic_field: CalibratedMagneticField,
    /// Bias-corrected rotation rate (rad/s)
    pub rotation_rate: RotationRate,
    /// Seconds on the sensor service's monotonic clock
    pub timestamp: f64,
    /// Acceleration the user imparts, gravity removed (g)
    pub user_acceleration: Acceleration,
}

impl Default for DeviceMotion {
    fn default() -> Self {
        Self {
            attitude: Attitude::default(),
            gravity: Vector3::zeros(),
            heading: 0.0,
            magnetic_field: CalibratedMagneticField::default(),
            rotation_rate: Vector3::zeros(),
            timestamp: 0.0,
            user_acceleration: Vector3::zeros(),
        }
    }
}

/// Reference frame that device-motion attitudes are expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttitudeReferenceFrame {
    /// Z vertical, X arbitrary in the horizontal plane
    #[default]
    XArbitraryZVertical,
    /// As above, with magnetometer drift correction
    XArbitraryCorrectedZVertical,
    /// Z vertical, X toward magnetic north
    XMagneticNorthZVertical,
    /// Z vertical, X toward true north
    XTrueNorthZVertical,
}

impl AttitudeReferenceFrame {
    pub const ALL: [AttitudeReferenceFrame; 4] = [
        Self::XArbitraryZVertical,
        Self::XArbitraryCorrectedZVertical,
        Self::XMagneticNorthZVertical,
        Self::XTrueNorthZVertical,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::XArbitraryZVertical => 1 << 0,
            Self::XArbitraryCorrectedZVertical => 1 << 1,
            Self::XMagneticNorthZVertical => 1 << 2,
            Self::XTrueNorthZVertical => 1 << 3,
        }
    }
}

impl std::fmt::Display for AttitudeReferenceFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XArbitraryZVertical => write!(f, "x_arbitrary_z_vertical"),
            Self::XArbitraryCorrectedZVertical => write!(f, "x_arbitrary_corrected_z_vertical"),
            Self::XMagneticNorthZVertical => write!(f, "x_magnetic_north_z_vertical"),
            Self::XTrueNorthZVertical => write!(f, "x_true_north_z_vertical"),
        }
    }
}

/// Set of reference frames a device supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttitudeReferenceFrames(u8);

impl AttitudeReferenceFrames {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        AttitudeReferenceFrame::ALL.into_iter().collect()
    }

    pub fn contains(&self, frame: AttitudeReferenceFrame) -> bool {
        self.0 & frame.bit() != 0
    }

    pub fn insert(&mut self, frame: AttitudeReferenceFrame) {
        self.0 |= frame.bit();
    }

    #[must_use]
    pub fn with(mut self, frame: AttitudeReferenceFrame) -> Self {
        self.insert(frame);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Contained frames in declaration order
    pub fn iter(&self) -> impl Iterator<Item = AttitudeReferenceFrame> + '_ {
        AttitudeReferenceFrame::ALL
            .into_iter()
            .filter(|frame| self.contains(*frame))
    }
}

impl FromIterator<AttitudeReferenceFrame> for AttitudeReferenceFrames {
    fn from_iter<I: IntoIterator<Item = AttitudeReferenceFrame>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_frame_set() {
        let mut frames = AttitudeReferenceFrames::empty();
        assert!(frames.is_empty());

        frames.insert(AttitudeReferenceFrame::XMagneticNorthZVertical);
        assert!(frames.contains(AttitudeReferenceFrame::XMagneticNorthZVertical));
        assert!(!frames.contains(AttitudeReferenceFrame::XTrueNorthZVertical));

        let all = AttitudeReferenceFrames::all();
        assert_eq!(all.iter().count(), 4);
        assert_eq!(
            all.iter().next(),
            Some(AttitudeReferenceFrame::XArbitraryZVertical)
        );
    }

    #[test]
    fn test_default_device_motion() {
        let motion = DeviceMotion::default();
        assert_eq!(motion.attitude.quaternion(), crate::math::Quaternion::identity());
        assert_eq!(motion.gravity, Vector3::zeros());
        assert_eq!(
            motion.magnetic_field.accuracy,
            MagneticFieldCalibrationAccuracy::Uncalibrated
        );
    }

    #[test]
    fn test_reference_frame_display() {
        assert_eq!(
            AttitudeReferenceFrame::XTrueNorthZVertical.to_string(),
            "x_true_north_z_vertical"
        );
    }
}
