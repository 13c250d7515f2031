//! Communication primitives for sensor samples
//!
//! Sensor sources push samples into a channel; consumers read them back
//! as a [`Stream`] in the order they were produced.

mod channel;
mod stream;

pub use channel::{unbounded_channel, Receiver, Sender};
pub use stream::{Stream, StreamHandle};
