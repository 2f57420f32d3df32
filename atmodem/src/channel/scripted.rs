//! Scripted channel double driven by tokio's (pausable) clock.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

use super::Channel;
use crate::error::{ChannelError, Result};

/// A channel that delivers pre-scripted chunks at simulated times and
/// records every write.
///
/// Chunks registered with [`stream`](Self::stream) are due relative to the
/// channel's creation. Each script registered with [`reply`](Self::reply) is
/// consumed by one successful write and is due relative to that write.
#[derive(Debug)]
pub(crate) struct ScriptedChannel {
    pending: VecDeque<(Instant, Vec<u8>)>,
    replies: VecDeque<Vec<(Duration, Vec<u8>)>>,
    writes: Vec<Vec<u8>>,
    failing_writes: usize,
    failing_reads: usize,
    created: Instant,
    closed: bool,
}

impl ScriptedChannel {
    pub(crate) fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            replies: VecDeque::new(),
            writes: Vec::new(),
            failing_writes: 0,
            failing_reads: 0,
            created: Instant::now(),
            closed: false,
        }
    }

    /// Deliver `data` at `at` after creation, independent of any write.
    pub(crate) fn stream(mut self, at: Duration, data: &str) -> Self {
        self.schedule(self.created + at, data.as_bytes().to_vec());
        self
    }

    /// Script the output that answers the next unanswered write.
    pub(crate) fn reply(mut self, chunks: &[(u64, &str)]) -> Self {
        self.replies.push_back(
            chunks
                .iter()
                .map(|(ms, data)| (Duration::from_millis(*ms), data.as_bytes().to_vec()))
                .collect(),
        );
        self
    }

    /// Fail the next `count` writes.
    pub(crate) fn fail_writes(mut self, count: usize) -> Self {
        self.failing_writes = count;
        self
    }

    /// Fail the next `count` reads.
    pub(crate) fn fail_reads(mut self, count: usize) -> Self {
        self.failing_reads = count;
        self
    }

    /// Every successful write, as text.
    pub(crate) fn writes(&self) -> Vec<String> {
        self.writes
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    fn schedule(&mut self, due: Instant, data: Vec<u8>) {
        self.pending.push_back((due, data));
        self.pending.make_contiguous().sort_by_key(|(due, _)| *due);
    }

    fn take_due(&mut self, buf: &mut [u8]) -> Option<usize> {
        let (due, _) = self.pending.front()?;
        if *due > Instant::now() {
            return None;
        }
        let (due, mut data) = self.pending.pop_front()?;
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        if n < data.len() {
            self.pending.push_front((due, data.split_off(n)));
        }
        Some(n)
    }
}

impl Channel for ScriptedChannel {
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted write failure"));
        }
        self.writes.push(data.to_vec());
        if let Some(script) = self.replies.pop_front() {
            let now = Instant::now();
            for (offset, chunk) in script {
                self.schedule(now + offset, chunk);
            }
        }
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        if self.failing_reads > 0 {
            self.failing_reads -= 1;
            return Err(io::Error::other("scripted read failure"));
        }
        if let Some(n) = self.take_due(buf) {
            return Ok(n);
        }

        let limit = Instant::now() + timeout;
        let wake = match self.pending.front() {
            Some((due, _)) => (*due).min(limit),
            None => limit,
        };
        sleep_until(wake).await;

        Ok(self.take_due(buf).unwrap_or(0))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(ChannelError::Closed.into());
        }
        self.closed = true;
        Ok(())
    }
}
