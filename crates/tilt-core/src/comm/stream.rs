//! Time-ordered sample streams
//!
//! A [`Stream`] is the consumer end of a sensor subscription. The producer
//! keeps a [`StreamHandle`] and the sending half of the channel; stopping
//! either side ends the stream for the consumer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{unbounded_channel, Receiver, Sender};

/// A stream of values of type T, delivered in the order they were sent
#[derive(Debug)]
pub struct Stream<T> {
    rx: Receiver<T>,
    active: Arc<AtomicBool>,
}

impl<T> Stream<T> {
    fn from_receiver(rx: Receiver<T>) -> Self {
        Self {
            rx,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create an unbounded stream together with its producer side
    pub fn channel() -> (Sender<T>, StreamHandle, Self) {
        let (tx, rx) = unbounded_channel();
        let stream = Self::from_receiver(rx);
        let handle = StreamHandle {
            active: stream.active.clone(),
        };
        (tx, handle, stream)
    }

    /// Block for the next value; None once stopped or the producer is gone
    pub fn next(&self) -> Option<T> {
        if !self.is_active() {
            return None;
        }
        self.rx.recv().ok()
    }

    /// Wait up to `timeout` for the next value
    pub fn next_timeout(&self, timeout: Duration) -> Option<T> {
        if !self.is_active() {
            return None;
        }
        self.rx.recv_timeout(timeout).ok().flatten()
    }

    /// Take the next value if one is waiting
    pub fn try_next(&self) -> Option<T> {
        if !self.is_active() {
            return None;
        }
        self.rx.try_recv().ok().flatten()
    }

    /// Take every waiting value, oldest first
    pub fn drain(&self) -> Vec<T> {
        if !self.is_active() {
            return Vec::new();
        }
        self.rx.drain()
    }

    /// Stop the stream; later reads return None
    pub fn stop(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Check if the stream is active
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

/// Producer-side switch for a [`Stream`]
#[derive(Debug, Clone)]
pub struct StreamHandle {
    active: Arc<AtomicBool>,
}

impl StreamHandle {
    /// Stop the stream
    pub fn stop(&self) {
        self.active.store(false, Ordering::Relaxed);
    }
}
