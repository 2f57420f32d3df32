//! The modem driver: token matching, retries and idle framing.

use std::io;
use std::time::Duration;

use log::{debug, error, info, trace, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, sleep, sleep_until};

use super::builder::DriverConfig;
use super::response::{Exchange, ExchangeOutcome, Response};
use crate::channel::{Channel, Classification, ResponseBuffer, TokenMatcher};
use crate::command::{CommandDescriptor, CommandKey, CommandRegistry, ERROR_TOKENS};
use crate::error::{DriverError, Result};

/// Driver for one modem over one exclusively owned channel.
///
/// All operations run sequentially; each one blocks the caller until its
/// deadline or idle window ends.
#[derive(Debug)]
pub struct ModemDriver<C> {
    /// The channel to the modem.
    channel: C,

    /// Timing and retry configuration.
    config: DriverConfig,

    /// Commands addressable by key.
    registry: CommandRegistry,
}

impl<C: Channel> ModemDriver<C> {
    /// Create a driver. Prefer [`DriverBuilder`](super::DriverBuilder), which validates the config.
    pub fn new(channel: C, config: DriverConfig, registry: CommandRegistry) -> Self {
        Self {
            channel,
            config,
            registry,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Get the command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Get a reference to the channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Close the channel, consuming the driver.
    pub async fn close(mut self) -> Result<()> {
        self.channel.close().await
    }

    /// Write raw bytes to the channel.
    pub(crate) async fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut data = Vec::with_capacity(line.len() + 2);
        data.extend_from_slice(line.as_bytes());
        data.extend_from_slice(b"\r\n");
        self.channel.write_all(&data).await
    }

    /// Read until `success_token` or an error token appears, or `timeout` passes.
    ///
    /// Read errors count as "no data this tick". An error token ends the
    /// exchange immediately instead of waiting out the deadline.
    pub async fn read_until_token(&mut self, success_token: &str, timeout: Duration) -> Exchange {
        let start = Instant::now();
        let deadline = start + timeout;
        let matcher = TokenMatcher::new(success_token, &ERROR_TOKENS);
        let mut buffer = ResponseBuffer::default();
        let mut chunk = vec![0u8; self.config.read_chunk_size];

        loop {
            let now = Instant::now();
            if now >= deadline {
                trace!("deadline of {:?} reached waiting for {:?}", timeout, success_token);
                return Exchange {
                    text: buffer.into_string(),
                    outcome: ExchangeOutcome::TimedOut,
                    elapsed: start.elapsed(),
                };
            }
            let wait = (deadline - now).min(self.config.poll_interval);

            match self.channel.read(&mut chunk, wait).await {
                Ok(0) => sleep_until(now + wait).await,
                Ok(n) => {
                    info!("<<< {:?}", String::from_utf8_lossy(&chunk[..n]));
                    buffer.extend(&chunk[..n]);

                    let outcome = match matcher.classify(&buffer) {
                        Classification::Success => ExchangeOutcome::Matched,
                        Classification::Error(token) => ExchangeOutcome::ErrorToken(token.to_string()),
                        Classification::Pending => continue,
                    };
                    return Exchange {
                        text: buffer.into_string(),
                        outcome,
                        elapsed: start.elapsed(),
                    };
                }
                Err(e) => {
                    trace!("read error treated as no data: {}", e);
                    sleep_until(now + wait).await;
                }
            }
        }
    }

    /// Read until the channel has been silent for longer than `idle_timeout`.
    ///
    /// The text is not classified; every received chunk restarts the idle clock.
    pub async fn read_until_idle(&mut self, idle_timeout: Duration) -> String {
        self.read_until_idle_into(idle_timeout, &mut tokio::io::sink())
            .await
            .unwrap_or_default()
    }

    /// Like [`read_until_idle`](Self::read_until_idle), also writing each
    /// chunk to `echo` as soon as it arrives.
    pub async fn read_until_idle_into<W>(&mut self, idle_timeout: Duration, echo: &mut W) -> io::Result<String>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let poll = self.config.poll_interval;
        let mut buffer = ResponseBuffer::default();
        let mut chunk = vec![0u8; self.config.read_chunk_size];
        let mut last_received = Instant::now();

        while last_received.elapsed() <= idle_timeout {
            let tick = Instant::now();
            match self.channel.read(&mut chunk, poll).await {
                Ok(0) => sleep_until(tick + poll).await,
                Ok(n) => {
                    debug!("<<< {:?}", String::from_utf8_lossy(&chunk[..n]));
                    echo.write_all(&chunk[..n]).await?;
                    echo.flush().await?;
                    buffer.extend(&chunk[..n]);
                    last_received = Instant::now();
                }
                Err(e) => {
                    trace!("read error treated as no data: {}", e);
                    sleep_until(tick + poll).await;
                }
            }
        }

        Ok(buffer.into_string())
    }

    /// Send a command with up to `max_attempts` attempts.
    ///
    /// Returns `Ok(None)` without touching the channel when the descriptor
    /// is a sentinel. With `argument`, the line sent is `TEMPLATE=argument`.
    /// A failed write uses up an attempt. When the budget is spent the run
    /// cannot continue and a terminal error is returned.
    pub async fn send_descriptor(
        &mut self,
        descriptor: &CommandDescriptor,
        argument: Option<&str>,
    ) -> Result<Option<Response>> {
        if !descriptor.is_sendable() {
            debug!("skipping sentinel entry for {:?}", descriptor.success_token);
            return Ok(None);
        }

        let command = descriptor.render(argument);
        let start = Instant::now();
        let mut last_received: Option<String> = None;
        let mut last_write_error: Option<io::Error> = None;

        for attempt in 1..=self.config.max_attempts {
            info!("{}. attempt >>> send: [{}]", attempt, command);

            if let Err(e) = self.write_line(&command).await {
                warn!("send error for '{}': {}", command, e);
                last_write_error = Some(e);
                continue;
            }

            let exchange = self
                .read_until_token(descriptor.success_token, descriptor.timeout)
                .await;

            if exchange.is_match() {
                info!("success: {:?} received for '{}'", descriptor.success_token, command);
                sleep(self.config.settle_delay).await;
                return Ok(Some(Response {
                    command,
                    expected: descriptor.success_token.to_string(),
                    result: exchange.text,
                    attempts: attempt,
                    elapsed: start.elapsed(),
                }));
            }

            warn!(
                "expected response not received ({:?}). command: {}, expected: {:?}, received: {:?}",
                exchange.outcome, command, descriptor.success_token, exchange.text
            );
            last_received = Some(exchange.text);
        }

        let attempts = self.config.max_attempts;
        error!(
            "'{}' tried {} times without success, stopping",
            command, attempts
        );

        let err = match (last_received, last_write_error) {
            (None, Some(source)) => DriverError::WriteExhausted {
                command,
                attempts,
                source,
            },
            (received, _) => DriverError::RetriesExhausted {
                command,
                expected: descriptor.success_token.to_string(),
                received: received.unwrap_or_default(),
                attempts,
            },
        };
        Err(err.into())
    }

    /// Send the registry entry named `key`.
    pub async fn send_key(
        &mut self,
        key: CommandKey,
        argument: Option<&str>,
    ) -> Result<Option<Response>> {
        let descriptor = *self
            .registry
            .get(key)
            .ok_or(DriverError::UnknownCommand { key })?;
        self.send_descriptor(&descriptor, argument).await
    }
}
