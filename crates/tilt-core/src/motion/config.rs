//! Sensor and recorder configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AttitudeReferenceFrame;
use crate::{Error, Result};

/// Settable properties of a motion manager
///
/// Every field is optional: applying a set of properties only changes the
/// fields that are `Some`, leaving the rest as previously configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionManagerProperties {
    /// Interval between accelerometer samples
    pub accelerometer_update_interval: Option<Duration>,
    /// Interval between device-motion samples
    pub device_motion_update_interval: Option<Duration>,
    /// Interval between gyroscope samples
    pub gyro_update_interval: Option<Duration>,
    /// Interval between magnetometer samples
    pub magnetometer_update_interval: Option<Duration>,
    /// Whether the platform may show its calibration UI
    pub shows_device_movement_display: Option<bool>,
}

impl MotionManagerProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same interval for every sensor
    pub fn uniform(interval: Duration) -> Self {
        Self {
            accelerometer_update_interval: Some(interval),
            device_motion_update_interval: Some(interval),
            gyro_update_interval: Some(interval),
            magnetometer_update_interval: Some(interval),
            shows_device_movement_display: None,
        }
    }

    pub fn with_accelerometer_update_interval(mut self, interval: Duration) -> Self {
        self.accelerometer_update_interval = Some(interval);
        self
    }

    pub fn with_device_motion_update_interval(mut self, interval: Duration) -> Self {
        self.device_motion_update_interval = Some(interval);
        self
    }

    pub fn with_gyro_update_interval(mut self, interval: Duration) -> Self {
        self.gyro_update_interval = Some(interval);
        self
    }

    pub fn with_magnetometer_update_interval(mut self, interval: Duration) -> Self {
        self.magnetometer_update_interval = Some(interval);
        self
    }

    pub fn with_shows_device_movement_display(mut self, shows: bool) -> Self {
        self.shows_device_movement_display = Some(shows);
        self
    }

    /// Reject zero update intervals
    pub fn validate(&self) -> Result<()> {
        let intervals = [
            ("accelerometer", self.accelerometer_update_interval),
            ("device_motion", self.device_motion_update_interval),
            ("gyro", self.gyro_update_interval),
            ("magnetometer", self.magnetometer_update_interval),
        ];
        for (name, interval) in intervals {
            if interval == Some(Duration::ZERO) {
                return Err(Error::Config(format!(
                    "{} update interval must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Overlay the `Some` fields of `update` onto `self`
    pub fn merge(&mut self, update: &MotionManagerProperties) {
        fn overlay<T: Copy>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        overlay(
            &mut self.accelerometer_update_interval,
            update.accelerometer_update_interval,
        );
        overlay(
            &mut self.device_motion_update_interval,
            update.device_motion_update_interval,
        );
        overlay(&mut self.gyro_update_interval, update.gyro_update_interval);
        overlay(
            &mut self.magnetometer_update_interval,
            update.magnetometer_update_interval,
        );
        overlay(
            &mut self.shows_device_movement_display,
            update.shows_device_movement_display,
        );
    }
}

/// Configuration for a [`MotionRecorder`](super::MotionRecorder) session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Reference frame device-motion updates are started with
    pub reference_frame: AttitudeReferenceFrame,
    /// Requested device-motion interval, applied before starting
    pub update_interval: Option<Duration>,
    /// Maximum number of vertical-motion values kept (oldest dropped)
    pub history_limit: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            reference_frame: AttitudeReferenceFrame::XArbitraryZVertical,
            update_interval: None,
            history_limit: 10_000,
        }
    }
}

impl RecorderConfig {
    /// 60 Hz updates, one minute of history
    pub fn realtime() -> Self {
        Self {
            update_interval: Some(Duration::from_micros(16_667)),
            history_limit: 3_600,
            ..Default::default()
        }
    }

    pub fn with_reference_frame(mut self, frame: AttitudeReferenceFrame) -> Self {
        self.reference_frame = frame;
        self
    }

    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = Some(interval);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(Error::Config("history_limit must be at least 1".into()));
        }
        if self.update_interval == Some(Duration::ZERO) {
            return Err(Error::Config(
                "device_motion update interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
