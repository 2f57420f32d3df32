//! Serial connection configuration.

use crate::error::{Result, TransportError};

/// Serial connection configuration.
///
/// The line is always 8 data bits, no parity, one stop bit, no flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB2` or `COM3`.
    pub path: String,

    /// Baud rate (default: 115200).
    pub baud_rate: u32,
}

impl SerialConfig {
    /// Create a configuration for `path` with default settings.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: 115_200,
        }
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }
}

/// Parse an operator-entered baud rate.
pub fn parse_baud_rate(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(rate) if rate > 0 => Ok(rate),
        _ => Err(TransportError::InvalidBaudRate {
            input: trimmed.to_string(),
        }
        .into()),
    }
}
