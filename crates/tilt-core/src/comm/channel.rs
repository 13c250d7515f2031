//! Sample channels between a sensor source and its consumers
//!
//! Thin wrapper around crossbeam-channel that maps disconnection onto
//! [`Error::ChannelClosed`].

use crossbeam_channel::{self as cc, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::{Error, Result};

/// Producing half of a sample channel
#[derive(Debug)]
pub struct Sender<T> {
    inner: cc::Sender<T>,
}

impl<T> Sender<T> {
    /// Send a sample; fails once the receiver is gone
    #[inline]
    pub fn send(&self, value: T) -> Result<()> {
        self.inner.send(value).map_err(|_| Error::ChannelClosed)
    }
}

/// Consuming half of a sample channel
#[derive(Debug)]
pub struct Receiver<T> {
    inner: cc::Receiver<T>,
}

impl<T> Receiver<T> {
    /// Block until a sample arrives or every sender is gone
    #[inline]
    pub fn recv(&self) -> Result<T> {
        self.inner.recv().map_err(|_| Error::ChannelClosed)
    }

    /// Take a sample if one is waiting
    #[inline]
    pub fn try_recv(&self) -> Result<Option<T>> {
        match self.inner.try_recv() {
            Ok(v) => Ok(Some(v)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::ChannelClosed),
        }
    }

    /// Wait up to `timeout` for a sample
    #[inline]
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<T>> {
        match self.inner.recv_timeout(timeout) {
            Ok(v) => Ok(Some(v)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::ChannelClosed),
        }
    }

    /// Take every waiting sample, oldest first
    pub fn drain(&self) -> Vec<T> {
        self.inner.try_iter().collect()
    }
}

/// Create an unbounded sample channel
///
/// Sensor sources never block on a slow consumer; samples queue until
/// drained.
pub fn unbounded_channel<T>() -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = cc::unbounded();
    (Sender { inner: tx }, Receiver { inner: rx })
}
