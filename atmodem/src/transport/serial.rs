//! Serial transport implementation using tokio-serial.

use std::io;
use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};

use super::config::SerialConfig;
use crate::channel::Channel;
use crate::error::{ChannelError, Result, TransportError};

/// Serial transport wrapping a tokio-serial stream.
pub struct SerialTransport {
    /// The open port (None once closed).
    stream: Option<SerialStream>,

    /// Configuration used for this connection.
    config: SerialConfig,
}

impl SerialTransport {
    /// Open the serial port described by `config`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let stream = tokio_serial::new(&config.path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open_native_async()
            .map_err(|source| TransportError::OpenFailed {
                path: config.path.clone(),
                source,
            })?;

        debug!("opened {} at {} baud", config.path, config.baud_rate);
        Ok(Self {
            stream: Some(stream),
            config: config.clone(),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    fn stream_mut(&mut self) -> io::Result<&mut SerialStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port closed"))
    }
}

impl Channel for SerialTransport {
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let stream = self.stream_mut()?;
        stream.write_all(data).await?;
        stream.flush().await
    }

    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        let stream = self.stream_mut()?;
        match tokio::time::timeout(timeout, stream.read(buf)).await {
            Ok(result) => result,
            Err(_) => Ok(0),
        }
    }

    async fn close(&mut self) -> Result<()> {
        let mut stream = self.stream.take().ok_or(ChannelError::Closed)?;
        if let Err(e) = stream.shutdown().await {
            warn!("error while closing {}: {}", self.config.path, e);
        }
        debug!("closed {}", self.config.path);
        Ok(())
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.stream.is_some() {
            debug!("{} dropped without close()", self.config.path);
        }
    }
}

/// List the serial ports on this host, failing if there are none.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = tokio_serial::available_ports().map_err(TransportError::Enumerate)?;
    if ports.is_empty() {
        return Err(TransportError::NoPorts.into());
    }
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
