//! Channel layer: the duplex byte stream a modem is driven over.
//!
//! This module defines the [`Channel`] capability the driver needs, the
//! per-exchange accumulator and token classification.

mod buffer;
mod patterns;
#[cfg(test)]
pub(crate) mod scripted;

pub use buffer::ResponseBuffer;
pub use patterns::{Classification, TokenMatcher};

use std::future::Future;
use std::io;
use std::time::Duration;

use crate::error::Result;

/// A duplex byte stream to a modem.
///
/// The driver owns its channel exclusively for the duration of a run.
pub trait Channel: Send {
    /// Write all of `data` to the modem.
    fn write_all(&mut self, data: &[u8]) -> impl Future<Output = io::Result<()>> + Send;

    /// Read whatever bytes are available into `buf`, waiting at most `timeout`.
    ///
    /// Returns `Ok(0)` when nothing arrived in time. This is a normal outcome,
    /// not an error.
    fn read(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> impl Future<Output = io::Result<usize>> + Send;

    /// Close the channel.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}
