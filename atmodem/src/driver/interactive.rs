//! Free-form interactive pass-through.
//!
//! The operator types a line, it is sent to the modem as-is, and whatever
//! the modem prints until it falls silent is handed back. Replies are framed
//! by silence rather than by a token, so nothing is judged a success or a
//! failure here.

use std::io;
use std::time::Duration;

use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use super::generic::ModemDriver;
use crate::channel::Channel;
use crate::error::{ChannelError, Result};

/// Input that ends an interactive session (case-insensitive).
pub const STOP_WORD: &str = "STOP";

/// Prompt printed before each operator line.
pub const PROMPT: &str = "MANUAL >> ";

/// What happened to one operator line.
#[derive(Debug)]
pub enum LineOutcome {
    /// The operator asked to stop.
    Stop,

    /// Blank line; nothing was sent.
    Skipped,

    /// The line could not be written; no reply was read.
    WriteFailed(ChannelError),

    /// The line was sent and this is what came back.
    Reply(InteractiveStep),
}

/// Result of a single line in an interactive session.
#[derive(Debug, Clone)]
pub struct InteractiveStep {
    /// The line that was sent (trimmed, without CRLF).
    pub input: String,

    /// The output received until the channel went idle.
    pub output: String,

    /// Time taken for this step, including the trailing idle window.
    pub elapsed: Duration,
}

/// Result of a complete interactive session.
#[derive(Debug, Clone, Default)]
pub struct InteractiveResult {
    /// Lines that were sent and their replies.
    pub steps: Vec<InteractiveStep>,

    /// Lines that could not be written.
    pub write_failures: usize,

    /// Total time for the session.
    pub elapsed: Duration,
}

impl InteractiveResult {
    /// Get the final output (from the last step).
    pub fn final_output(&self) -> Option<&str> {
        self.steps.last().map(|s| s.output.as_str())
    }

    /// Get all outputs concatenated.
    pub fn full_output(&self) -> String {
        self.steps
            .iter()
            .map(|s| s.output.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl<C: Channel> ModemDriver<C> {
    /// Send one operator line and frame the reply by silence.
    pub async fn send_line(&mut self, line: &str) -> LineOutcome {
        self.send_line_echoed(line, &mut tokio::io::sink())
            .await
            .unwrap_or_else(|e| LineOutcome::WriteFailed(ChannelError::WriteFailed(e)))
    }

    /// Send one operator line, copying the reply to `echo` as it arrives.
    ///
    /// Errors are failures to write to `echo`; a failed write to the modem is
    /// reported as [`LineOutcome::WriteFailed`].
    pub async fn send_line_echoed<W>(&mut self, line: &str, echo: &mut W) -> io::Result<LineOutcome>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let line = line.trim();
        if line.eq_ignore_ascii_case(STOP_WORD) {
            return Ok(LineOutcome::Stop);
        }
        if line.is_empty() {
            return Ok(LineOutcome::Skipped);
        }

        let start = Instant::now();
        info!(">>> {}", line);
        if let Err(e) = self.write_line(line).await {
            warn!("send error: {}", e);
            return Ok(LineOutcome::WriteFailed(ChannelError::WriteFailed(e)));
        }

        let idle_timeout = self.config().idle_timeout;
        let output = self.read_until_idle_into(idle_timeout, echo).await?;
        Ok(LineOutcome::Reply(InteractiveStep {
            input: line.to_string(),
            output,
            elapsed: start.elapsed(),
        }))
    }

    /// Run an operator session until `STOP` or end of input.
    ///
    /// Prompts are written to `output`, and replies are copied there chunk by
    /// chunk as the modem produces them. Input lines that are not valid UTF-8
    /// are converted lossily rather than rejected.
    pub async fn run_interactive<R, W>(&mut self, mut input: R, mut output: W) -> Result<InteractiveResult>
    where
        R: AsyncBufRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let start = Instant::now();
        let mut result = InteractiveResult::default();
        let mut raw = Vec::new();

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            raw.clear();
            if input.read_until(b'\n', &mut raw).await? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&raw);

            match self.send_line_echoed(&line, &mut output).await? {
                LineOutcome::Stop => {
                    output.write_all(b"manual mode stopped\n").await?;
                    break;
                }
                LineOutcome::Skipped => {}
                LineOutcome::WriteFailed(_) => result.write_failures += 1,
                LineOutcome::Reply(step) => {
                    if !step.output.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                    result.steps.push(step);
                }
            }
        }

        output.flush().await?;
        result.elapsed = start.elapsed();
        info!(
            "interactive session ended after {} replies in {:?}",
            result.steps.len(),
            result.elapsed
        );
        Ok(result)
    }
}
