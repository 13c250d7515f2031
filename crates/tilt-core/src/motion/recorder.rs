//! Recording session over device-motion updates
//!
//! [`MotionRecorder`] is the consumer side of a [`MotionManager`]: it starts
//! and stops device-motion updates and folds every sample into a
//! vertical-motion history and a facing direction relative to the
//! attitude the manager reported when the session began.

use std::collections::VecDeque;
use std::sync::Arc;

use super::{DeviceMotion, FacingDirection, MotionManager, MotionManagerProperties, RecorderConfig};
use crate::comm::Stream;
use crate::math::Attitude;
use crate::Result;

/// Records vertical motion and facing direction from device-motion samples
pub struct MotionRecorder<M: MotionManager> {
    manager: Arc<M>,
    config: RecorderConfig,
    stream: Option<Stream<DeviceMotion>>,
    vertical_motion: VecDeque<f64>,
    initial_attitude: Option<Attitude>,
    facing_direction: Option<FacingDirection>,
}

impl<M: MotionManager> MotionRecorder<M> {
    pub fn new(manager: Arc<M>, config: RecorderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            manager,
            config,
            stream: None,
            vertical_motion: VecDeque::new(),
            initial_attitude: None,
            facing_direction: None,
        })
    }

    pub fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    /// Vertical-motion values, oldest first
    pub fn vertical_motion(&self) -> Vec<f64> {
        self.vertical_motion.iter().copied().collect()
    }

    pub fn initial_attitude(&self) -> Option<Attitude> {
        self.initial_attitude
    }

    pub fn facing_direction(&self) -> Option<FacingDirection> {
        self.facing_direction
    }

    /// Start recording if stopped, stop if recording
    pub fn toggle(&mut self) -> Result<()> {
        if self.is_recording() {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Start device-motion updates
    pub fn start(&mut self) -> Result<()> {
        if self.is_recording() {
            return Ok(());
        }
        if let Some(interval) = self.config.update_interval {
            self.manager
                .set(MotionManagerProperties::new().with_device_motion_update_interval(interval))?;
        }
        let stream = self
            .manager
            .start_device_motion_updates(self.config.reference_frame)?;
        tracing::debug!(
            "Recording started in {} reference frame",
            self.config.reference_frame
        );
        self.stream = Some(stream);
        Ok(())
    }

    /// Stop device-motion updates and forget the initial attitude
    ///
    /// The vertical-motion history is kept.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            stream.stop();
            self.manager.stop_device_motion_updates()?;
            tracing::debug!(
                "Recording stopped after {} samples",
                self.vertical_motion.len()
            );
        }
        self.initial_attitude = None;
        self.facing_direction = None;
        Ok(())
    }

    /// Fold one sample into the session state
    ///
    /// A sample whose attitude has a zero or non-finite quaternion is
    /// rejected with [`Error::InvalidQuaternion`](crate::Error::InvalidQuaternion)
    /// and leaves the session untouched.
    ///
    /// The initial attitude is taken from the manager's latest device-motion
    /// sample the first time a sample is processed after starting. Until the
    /// manager has one, no facing direction is reported.
    pub fn process(&mut self, motion: &DeviceMotion) -> Result<()> {
        motion.attitude.quaternion().checked_norm_squared()?;

        if self.initial_attitude.is_none() {
            self.initial_attitude = self
                .manager
                .device_motion()
                .map(|latest| latest.attitude)
                .filter(|attitude| attitude.quaternion().checked_norm_squared().is_ok());
        }
        if let Some(initial) = &self.initial_attitude {
            self.facing_direction = Some(FacingDirection::from_attitudes(initial, &motion.attitude)?);
        }

        if self.vertical_motion.len() == self.config.history_limit {
            tracing::trace!(
                "Vertical-motion history at {} values, dropping oldest",
                self.config.history_limit
            );
            self.vertical_motion.pop_front();
        }
        self.vertical_motion.push_back(motion.vertical_motion());
        Ok(())
    }

    /// Process every sample waiting on the stream; returns how many were
    /// accepted
    ///
    /// Rejected samples are skipped and logged so the ones queued behind them
    /// are still processed. The first rejection is returned once the whole
    /// batch has been handled.
    pub fn pump(&mut self) -> Result<usize> {
        let pending = match &self.stream {
            Some(stream) => stream.drain(),
            None => return Ok(0),
        };

        let mut accepted = 0;
        let mut first_error = None;
        for motion in &pending {
            match self.process(motion) {
                Ok(()) => accepted += 1,
                Err(e) => {
                    tracing::warn!("Skipping device-motion sample at {}: {}", motion.timestamp, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(accepted),
        }
    }
}
