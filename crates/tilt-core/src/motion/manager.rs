//! Sensor capability traits
//!
//! A platform motion service is consumed through these traits so that the
//! same application code runs against real sensors or against the
//! deterministic doubles in [`mock`](super::mock).
//!
//! Each `start_*` call hands back a [`Stream`] of samples in the order the
//! service produced them. The matching `stop_*` call ends that stream.

use serde::{Deserialize, Serialize};

use super::{
    AccelerometerData, AttitudeReferenceFrame, AttitudeReferenceFrames, DeviceMotion, GyroData,
    MagnetometerData, MotionManagerProperties,
};
use crate::comm::Stream;
use crate::Result;

/// Device motion sensors: accelerometer, gyroscope, magnetometer and the
/// fused device-motion service
pub trait MotionManager: Send + Sync {
    /// Latest accelerometer sample, if updates have produced one
    fn accelerometer_data(&self) -> Option<AccelerometerData>;

    /// Latest device-motion sample
    fn device_motion(&self) -> Option<DeviceMotion>;

    /// Latest gyroscope sample
    fn gyro_data(&self) -> Option<GyroData>;

    /// Latest magnetometer sample
    fn magnetometer_data(&self) -> Option<MagnetometerData>;

    /// Reference frame currently in use, or the default one
    fn attitude_reference_frame(&self) -> AttitudeReferenceFrame;

    /// Reference frames this device supports
    fn available_attitude_reference_frames(&self) -> AttitudeReferenceFrames;

    fn is_accelerometer_active(&self) -> bool;
    fn is_accelerometer_available(&self) -> bool;
    fn is_device_motion_active(&self) -> bool;
    fn is_device_motion_available(&self) -> bool;
    fn is_gyro_active(&self) -> bool;
    fn is_gyro_available(&self) -> bool;
    fn is_magnetometer_active(&self) -> bool;
    fn is_magnetometer_available(&self) -> bool;

    /// Apply the `Some` fields of `properties`
    fn set(&self, properties: MotionManagerProperties) -> Result<()>;

    fn start_accelerometer_updates(&self) -> Result<Stream<AccelerometerData>>;

    /// Start fused updates with attitudes expressed in `frame`
    fn start_device_motion_updates(
        &self,
        frame: AttitudeReferenceFrame,
    ) -> Result<Stream<DeviceMotion>>;

    fn start_gyro_updates(&self) -> Result<Stream<GyroData>>;

    fn start_magnetometer_updates(&self) -> Result<Stream<MagnetometerData>>;

    fn stop_accelerometer_updates(&self) -> Result<()>;
    fn stop_device_motion_updates(&self) -> Result<()>;
    fn stop_gyro_updates(&self) -> Result<()>;
    fn stop_magnetometer_updates(&self) -> Result<()>;
}

/// Connection events from a headphone motion source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadphoneEvent {
    Connected,
    Disconnected,
}

/// Motion reported by headphones with head tracking
pub trait HeadphoneMotionManager: Send + Sync {
    /// Stream of connect/disconnect events
    fn delegate(&self) -> Result<Stream<HeadphoneEvent>>;

    /// Latest device-motion sample
    fn device_motion(&self) -> Option<DeviceMotion>;

    fn is_device_motion_active(&self) -> bool;
    fn is_device_motion_available(&self) -> bool;

    fn start_device_motion_updates(&self) -> Result<Stream<DeviceMotion>>;
    fn stop_device_motion_updates(&self) -> Result<()>;
}
