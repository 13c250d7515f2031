//! tilt-core: Device attitude math and testable motion-sensor streams
//!
//! The numeric heart of the crate is [`math`]: quaternion composition and
//! inversion, and an [`Attitude`] value that derives roll, pitch, yaw and a
//! rotation matrix from a single stored quaternion.
//!
//! Around it sits a thin sensor layer. A platform motion service is modelled
//! as the [`MotionManager`] capability trait which hands out time-ordered
//! [`Stream`]s of samples; tests substitute the deterministic
//! [`MockMotionManager`] built through a builder.
//!
//! # Modules
//!
//! - [`math`] - Quaternion, attitude, rotation matrix and angle helpers
//! - [`motion`] - Motion samples, sensor traits, mocks and projections
//! - [`comm`] - Channels and streams that carry samples
//!
//! # Architecture
//!
//! ```text
//! platform sensor service              tilt-core
//! ┌──────────────────┐              ┌──────────────────┐
//! │  MotionManager   │──samples────►│  Attitude / math │
//! │  (trait / mock)  │   (Stream)   │  projections     │
//! └──────────────────┘              └──────────────────┘
//! ```

#![warn(unused_must_use)]

pub mod comm;
pub mod math;
pub mod motion;

// Re-exports for convenience
pub use comm::{Receiver, Sender, Stream};
pub use math::{Attitude, EulerAngles, Quaternion, RotationMatrix, Vector3};
pub use motion::{
    DeviceMotion, FacingDirection, HeadphoneMotionManager, MockMotionManager, MotionManager,
    MotionManagerProperties, MotionRecorder,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for tilt-core
///
/// The math layer only ever produces [`Error::InvalidQuaternion`]. The
/// remaining variants belong to the sensor layer and its test doubles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "errors must be handled or explicitly ignored with let _ = ..."]
#[non_exhaustive]
pub enum Error {
    /// A quaternion with zero (or non-finite) norm was inverted or normalized.
    /// Handle by: rejecting the sample, it carries no orientation.
    #[error("Invalid quaternion: squared norm is {0}")]
    InvalidQuaternion(String),

    /// The sensor service reported a failure while delivering samples.
    /// Handle by: surfacing to the user, restarting updates if transient.
    #[error("Sensor error: {0}")]
    Sensor(String),

    /// Invalid configuration parameter.
    /// Handle by: validating config before use, checking parameter ranges.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A test double endpoint was invoked without being configured.
    /// Handle by: enabling the endpoint on the mock builder.
    #[error("Unimplemented endpoint: {0}")]
    Unimplemented(String),

    /// Communication channel was closed unexpectedly.
    /// Handle by: restarting the updates that fed the channel.
    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type alias for tilt-core operations
pub type Result<T> = std::result::Result<T, Error>;
