//! Deterministic motion managers for tests
//!
//! Mocks are assembled with a builder that switches on only the sensors a
//! test needs. Anything left off behaves as a failing endpoint: starting it
//! logs a warning and returns [`Error::Unimplemented`], which makes an
//! unexpected sensor access show up as a test failure instead of silently
//! producing nothing.
//!
//! Samples are pushed by the test with the `send_*` methods and arrive on
//! the started stream in exactly the order they were sent.

use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;

use super::{
    AccelerometerData, AttitudeReferenceFrame, AttitudeReferenceFrames, DeviceMotion, GyroData,
    HeadphoneEvent, HeadphoneMotionManager, MagnetometerData, MotionManager,
    MotionManagerProperties,
};
use crate::comm::{Sender, Stream, StreamHandle};
use crate::{Error, Result};

/// Sensors a [`MockMotionManager`] can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sensor {
    Accelerometer,
    DeviceMotion,
    Gyro,
    Magnetometer,
}

impl Sensor {
    fn start_endpoint(self) -> &'static str {
        match self {
            Self::Accelerometer => "MotionManager.start_accelerometer_updates",
            Self::DeviceMotion => "MotionManager.start_device_motion_updates",
            Self::Gyro => "MotionManager.start_gyro_updates",
            Self::Magnetometer => "MotionManager.start_magnetometer_updates",
        }
    }

    fn stop_endpoint(self) -> &'static str {
        match self {
            Self::Accelerometer => "MotionManager.stop_accelerometer_updates",
            Self::DeviceMotion => "MotionManager.stop_device_motion_updates",
            Self::Gyro => "MotionManager.stop_gyro_updates",
            Self::Magnetometer => "MotionManager.stop_magnetometer_updates",
        }
    }
}

fn unimplemented(endpoint: &str) -> Error {
    tracing::warn!("A failing endpoint was accessed: '{}'", endpoint);
    Error::Unimplemented(endpoint.to_string())
}

/// Producer side of one started sensor plus its latest sample
#[derive(Debug)]
struct Feed<T> {
    tx: Option<Sender<T>>,
    handle: Option<StreamHandle>,
    latest: Option<T>,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self {
            tx: None,
            handle: None,
            latest: None,
        }
    }
}

impl<T: Copy> Feed<T> {
    fn start(&mut self) -> Stream<T> {
        self.stop();
        let (tx, handle, stream) = Stream::channel();
        self.tx = Some(tx);
        self.handle = Some(handle);
        stream
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
        // Dropping the sender wakes any consumer blocked on the stream
        self.tx = None;
    }

    fn is_active(&self) -> bool {
        self.tx.is_some()
    }

    fn send(&mut self, sample: T) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(Error::ChannelClosed)?;
        tx.send(sample)?;
        self.latest = Some(sample);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MockState {
    accelerometer: Feed<AccelerometerData>,
    device_motion: Feed<DeviceMotion>,
    gyro: Feed<GyroData>,
    magnetometer: Feed<MagnetometerData>,
    reference_frame: AttitudeReferenceFrame,
    properties: MotionManagerProperties,
}

/// Builder for [`MockMotionManager`]
#[derive(Debug, Default)]
pub struct MockMotionManagerBuilder {
    sensors: BTreeSet<Sensor>,
    settable: bool,
    state: MockState,
    available_frames: AttitudeReferenceFrames,
}

impl MockMotionManagerBuilder {
    /// Make `sensor` available and implement its start/stop endpoints
    pub fn sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.insert(sensor);
        self
    }

    /// Make every sensor available
    pub fn all_sensors(self) -> Self {
        self.sensor(Sensor::Accelerometer)
            .sensor(Sensor::DeviceMotion)
            .sensor(Sensor::Gyro)
            .sensor(Sensor::Magnetometer)
    }

    /// Implement the `set` endpoint
    pub fn settable(mut self) -> Self {
        self.settable = true;
        self
    }

    pub fn accelerometer_data(mut self, sample: AccelerometerData) -> Self {
        self.state.accelerometer.latest = Some(sample);
        self
    }

    pub fn device_motion(mut self, sample: DeviceMotion) -> Self {
        self.state.device_motion.latest = Some(sample);
        self
    }

    pub fn gyro_data(mut self, sample: GyroData) -> Self {
        self.state.gyro.latest = Some(sample);
        self
    }

    pub fn magnetometer_data(mut self, sample: MagnetometerData) -> Self {
        self.state.magnetometer.latest = Some(sample);
        self
    }

    pub fn reference_frame(mut self, frame: AttitudeReferenceFrame) -> Self {
        self.state.reference_frame = frame;
        self
    }

    pub fn available_reference_frames(mut self, frames: AttitudeReferenceFrames) -> Self {
        self.available_frames = frames;
        self
    }

    pub fn build(self) -> MockMotionManager {
        MockMotionManager {
            sensors: self.sensors,
            settable: self.settable,
            available_frames: self.available_frames,
            state: RwLock::new(self.state),
            calls: Mutex::new(Vec::new()),
        }
    }
}

/// A motion manager driven entirely by the test
#[derive(Debug)]
pub struct MockMotionManager {
    sensors: BTreeSet<Sensor>,
    settable: bool,
    available_frames: AttitudeReferenceFrames,
    state: RwLock<MockState>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockMotionManager {
    pub fn builder() -> MockMotionManagerBuilder {
        MockMotionManagerBuilder::default()
    }

    /// A manager on which every start/stop/set endpoint fails
    pub fn failing() -> Self {
        Self::builder().build()
    }

    /// Endpoints invoked so far, in call order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// Properties accumulated through [`MotionManager::set`]
    pub fn properties(&self) -> MotionManagerProperties {
        self.state.read().properties
    }

    /// Push an accelerometer sample to the started stream
    pub fn send_accelerometer_data(&self, sample: AccelerometerData) -> Result<()> {
        self.state.write().accelerometer.send(sample)
    }

    /// Push a device-motion sample to the started stream
    pub fn send_device_motion(&self, sample: DeviceMotion) -> Result<()> {
        self.state.write().device_motion.send(sample)
    }

    /// Push a gyroscope sample to the started stream
    pub fn send_gyro_data(&self, sample: GyroData) -> Result<()> {
        self.state.write().gyro.send(sample)
    }

    /// Push a magnetometer sample to the started stream
    pub fn send_magnetometer_data(&self, sample: MagnetometerData) -> Result<()> {
        self.state.write().magnetometer.send(sample)
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().push(endpoint);
    }

    fn require(&self, sensor: Sensor, endpoint: &'static str) -> Result<()> {
        self.record(endpoint);
        if self.sensors.contains(&sensor) {
            Ok(())
        } else {
            Err(unimplemented(endpoint))
        }
    }
}

impl MotionManager for MockMotionManager {
    fn accelerometer_data(&self) -> Option<AccelerometerData> {
        self.state.read().accelerometer.latest
    }

    fn device_motion(&self) -> Option<DeviceMotion> {
        self.state.read().device_motion.latest
    }

    fn gyro_data(&self) -> Option<GyroData> {
        self.state.read().gyro.latest
    }

    fn magnetometer_data(&self) -> Option<MagnetometerData> {
        self.state.read().magnetometer.latest
    }

    fn attitude_reference_frame(&self) -> AttitudeReferenceFrame {
        self.state.read().reference_frame
    }

    fn available_attitude_reference_frames(&self) -> AttitudeReferenceFrames {
        self.available_frames
    }

    fn is_accelerometer_active(&self) -> bool {
        self.state.read().accelerometer.is_active()
    }

    fn is_accelerometer_available(&self) -> bool {
        self.sensors.contains(&Sensor::Accelerometer)
    }

    fn is_device_motion_active(&self) -> bool {
        self.state.read().device_motion.is_active()
    }

    fn is_device_motion_available(&self) -> bool {
        self.sensors.contains(&Sensor::DeviceMotion)
    }

    fn is_gyro_active(&self) -> bool {
        self.state.read().gyro.is_active()
    }

    fn is_gyro_available(&self) -> bool {
        self.sensors.contains(&Sensor::Gyro)
    }

    fn is_magnetometer_active(&self) -> bool {
        self.state.read().magnetometer.is_active()
    }

    fn is_magnetometer_available(&self) -> bool {
        self.sensors.contains(&Sensor::Magnetometer)
    }

    fn set(&self, properties: MotionManagerProperties) -> Result<()> {
        self.record("MotionManager.set");
        if !self.settable {
            return Err(unimplemented("MotionManager.set"));
        }
        properties.validate()?;
        self.state.write().properties.merge(&properties);
        Ok(())
    }

    fn start_accelerometer_updates(&self) -> Result<Stream<AccelerometerData>> {
        let sensor = Sensor::Accelerometer;
        self.require(sensor, sensor.start_endpoint())?;
        tracing::debug!("Starting mock accelerometer updates");
        Ok(self.state.write().accelerometer.start())
    }

    fn start_device_motion_updates(
        &self,
        frame: AttitudeReferenceFrame,
    ) -> Result<Stream<DeviceMotion>> {
        let sensor = Sensor::DeviceMotion;
        self.require(sensor, sensor.start_endpoint())?;
        if !self.available_frames.is_empty() && !self.available_frames.contains(frame) {
            return Err(Error::Sensor(format!(
                "reference frame {} is not available",
                frame
            )));
        }
        tracing::debug!("Starting mock device motion updates in {}", frame);
        let mut state = self.state.write();
        state.reference_frame = frame;
        Ok(state.device_motion.start())
    }

    fn start_gyro_updates(&self) -> Result<Stream<GyroData>> {
        let sensor = Sensor::Gyro;
        self.require(sensor, sensor.start_endpoint())?;
        tracing::debug!("Starting mock gyro updates");
        Ok(self.state.write().gyro.start())
    }

    fn start_magnetometer_updates(&self) -> Result<Stream<MagnetometerData>> {
        let sensor = Sensor::Magnetometer;
        self.require(sensor, sensor.start_endpoint())?;
        tracing::debug!("Starting mock magnetometer updates");
        Ok(self.state.write().magnetometer.start())
    }

    fn stop_accelerometer_updates(&self) -> Result<()> {
        let sensor = Sensor::Accelerometer;
        self.require(sensor, sensor.stop_endpoint())?;
        self.state.write().accelerometer.stop();
        Ok(())
    }

    fn stop_device_motion_updates(&self) -> Result<()> {
        let sensor = Sensor::DeviceMotion;
        self.require(sensor, sensor.stop_endpoint())?;
        self.state.write().device_motion.stop();
        Ok(())
    }

    fn stop_gyro_updates(&self) -> Result<()> {
        let sensor = Sensor::Gyro;
        self.require(sensor, sensor.stop_endpoint())?;
        self.state.write().gyro.stop();
        Ok(())
    }

    fn stop_magnetometer_updates(&self) -> Result<()> {
        let sensor = Sensor::Magnetometer;
        self.require(sensor, sensor.stop_endpoint())?;
        self.state.write().magnetometer.stop();
        Ok(())
    }
}

#[derive(Debug, Default)]
struct HeadphoneState {
    device_motion: Feed<DeviceMotion>,
    delegates: Vec<Sender<HeadphoneEvent>>,
}

/// A headphone motion manager driven entirely by the test
#[derive(Debug)]
pub struct MockHeadphoneMotionManager {
    available: bool,
    state: RwLock<HeadphoneState>,
}

impl MockHeadphoneMotionManager {
    /// Headphones with device motion available
    pub fn new() -> Self {
        Self {
            available: true,
            state: RwLock::new(HeadphoneState::default()),
        }
    }

    /// Headphones on which every start/stop endpoint fails
    pub fn failing() -> Self {
        Self {
            available: false,
            state: RwLock::new(HeadphoneState::default()),
        }
    }

    /// Report a connection to every delegate stream
    pub fn connect(&self) {
        self.broadcast(HeadphoneEvent::Connected);
    }

    /// Report a disconnection to every delegate stream
    pub fn disconnect(&self) {
        self.broadcast(HeadphoneEvent::Disconnected);
    }

    /// Push a device-motion sample to the started stream
    pub fn send_device_motion(&self, sample: DeviceMotion) -> Result<()> {
        self.state.write().device_motion.send(sample)
    }

    fn broadcast(&self, event: HeadphoneEvent) {
        // Delegates whose stream was dropped are pruned here
        self.state
            .write()
            .delegates
            .retain(|tx| tx.send(event).is_ok());
    }
}

impl Default for MockHeadphoneMotionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadphoneMotionManager for MockHeadphoneMotionManager {
    fn delegate(&self) -> Result<Stream<HeadphoneEvent>> {
        let (tx, _handle, stream) = Stream::channel();
        self.state.write().delegates.push(tx);
        Ok(stream)
    }

    fn device_motion(&self) -> Option<DeviceMotion> {
        self.state.read().device_motion.latest
    }

    fn is_device_motion_active(&self) -> bool {
        self.state.read().device_motion.is_active()
    }

    fn is_device_motion_available(&self) -> bool {
        self.available
    }

    fn start_device_motion_updates(&self) -> Result<Stream<DeviceMotion>> {
        if !self.available {
            return Err(unimplemented(
                "HeadphoneMotionManager.start_device_motion_updates",
            ));
        }
        tracing::debug!("Starting mock headphone motion updates");
        Ok(self.state.write().device_motion.start())
    }

    fn stop_device_motion_updates(&self) -> Result<()> {
        if !self.available {
            return Err(unimplemented(
                "HeadphoneMotionManager.stop_device_motion_updates",
            ));
        }
        self.state.write().device_motion.stop();
        Ok(())
    }
}
