//! Builder for creating modem drivers.

use std::time::Duration;

use super::generic::ModemDriver;
use crate::channel::Channel;
use crate::command::CommandRegistry;
use crate::error::{DriverError, Result};

/// Timing and retry configuration of a driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Interval between reads while waiting for output.
    pub poll_interval: Duration,

    /// Pause after a successful command before the next one.
    pub settle_delay: Duration,

    /// Silence that ends an interactive reply.
    pub idle_timeout: Duration,

    /// Attempts per command before giving up.
    pub max_attempts: u32,

    /// Size of each read from the channel.
    pub read_chunk_size: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            settle_delay: Duration::from_secs(1),
            idle_timeout: Duration::from_secs(5),
            max_attempts: 3,
            read_chunk_size: 256,
        }
    }
}

/// Builder for constructing modem drivers.
///
/// # Example
///
/// ```rust,no_run
/// use atmodem::{DriverBuilder, SerialConfig, SerialTransport};
///
/// # async fn example() -> Result<(), atmodem::Error> {
/// let transport = SerialTransport::open(&SerialConfig::new("/dev/ttyUSB2"))?;
/// let driver = DriverBuilder::new()
///     .max_attempts(5)
///     .build(transport)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DriverBuilder {
    config: DriverConfig,
    registry: Option<CommandRegistry>,
}

impl DriverBuilder {
    /// Create a new driver builder with default timings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read polling interval (default: 100 ms).
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set the pause after each successful command (default: 1 s).
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    /// Set the silence that ends an interactive reply (default: 5 s).
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Set the number of attempts per command (default: 3).
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the per-read buffer size (default: 256 bytes).
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.config.read_chunk_size = size;
        self
    }

    /// Use a custom command registry instead of the built-in one.
    pub fn registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the driver around an already-open channel.
    pub fn build<C: Channel>(self, channel: C) -> Result<ModemDriver<C>> {
        if self.config.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1"));
        }
        if self.config.poll_interval.is_zero() {
            return Err(invalid("poll_interval must be non-zero"));
        }
        if self.config.read_chunk_size == 0 {
            return Err(invalid("read_chunk_size must be non-zero"));
        }

        let registry = self
            .registry
            .unwrap_or_else(|| CommandRegistry::global().clone());

        Ok(ModemDriver::new(channel, self.config, registry))
    }
}

fn invalid(message: &str) -> crate::Error {
    DriverError::InvalidConfig {
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::scripted::ScriptedChannel;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.settle_delay, Duration::from_secs(1));
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.max_attempts, 3);
    }

    #[tokio::test]
    async fn test_rejects_zero_attempts() {
        let err = DriverBuilder::new()
            .max_attempts(0)
            .build(ScriptedChannel::new())
            .unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::InvalidConfig { .. })));
    }

    #[tokio::test]
    async fn test_rejects_zero_poll_interval() {
        let result = DriverBuilder::new()
            .poll_interval(Duration::ZERO)
            .build(ScriptedChannel::new());
        tokio_test::assert_err!(result);
    }

    #[tokio::test]
    async fn test_custom_settings() {
        let driver = DriverBuilder::new()
            .max_attempts(5)
            .idle_timeout(Duration::from_secs(2))
            .registry(CommandRegistry::new())
            .build(ScriptedChannel::new())
            .unwrap();
        assert_eq!(driver.config().max_attempts, 5);
        assert_eq!(driver.config().idle_timeout, Duration::from_secs(2));
        assert!(driver.registry().is_empty());
    }
}
