//! Motion sensors as an opaque source of samples
//!
//! The platform motion service (accelerometer, gyroscope, magnetometer and
//! fused device motion) is reached only through the [`MotionManager`] and
//! [`HeadphoneMotionManager`] traits. No platform backend ships with this
//! crate; applications provide one, and tests use [`mock`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tilt_core::math::{Attitude, Quaternion, Vector3};
//! use tilt_core::motion::mock::{MockMotionManager, Sensor};
//! use tilt_core::motion::{DeviceMotion, MotionRecorder, RecorderConfig};
//!
//! let manager = Arc::new(MockMotionManager::builder().sensor(Sensor::DeviceMotion).build());
//! let mut recorder = MotionRecorder::new(manager.clone(), RecorderConfig::default())?;
//!
//! recorder.toggle()?;
//! manager.send_device_motion(DeviceMotion {
//!     attitude: Attitude::new(Quaternion::identity()),
//!     gravity: Vector3::new(0.0, 0.0, -1.0),
//!     user_acceleration: Vector3::new(0.0, 0.0, -0.5),
//!     ..Default::default()
//! })?;
//! recorder.pump()?;
//!
//! assert_eq!(recorder.vertical_motion(), vec![0.5]);
//! # Ok::<(), tilt_core::Error>(())
//! ```

mod config;
mod manager;
pub mod mock;
mod projection;
mod recorder;
mod sample;

pub use config::{MotionManagerProperties, RecorderConfig};
pub use manager::{HeadphoneEvent, HeadphoneMotionManager, MotionManager};
pub use mock::{MockHeadphoneMotionManager, MockMotionManager};
pub use projection::{vertical_motion, FacingDirection};
pub use recorder::MotionRecorder;
pub use sample::{
    Acceleration, AccelerometerData, AttitudeReferenceFrame, AttitudeReferenceFrames,
    CalibratedMagneticField, DeviceMotion, GyroData, MagneticField,
    MagneticFieldCalibrationAccuracy, MagnetometerData, RotationRate,
};
