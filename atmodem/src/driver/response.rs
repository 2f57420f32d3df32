//! Result types for command exchanges.

use std::time::Duration;

use crate::command::CommandKey;

/// How a single token-delimited exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The success token was observed.
    Matched,

    /// An error token was observed before the success token.
    ErrorToken(String),

    /// The deadline passed with neither token observed.
    TimedOut,
}

/// Output of one exchange: everything read, and how it was classified.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// All text received during the exchange.
    pub text: String,

    /// Classification of the exchange.
    pub outcome: ExchangeOutcome,

    /// Time from the start of reading to the end of the exchange.
    pub elapsed: Duration,
}

impl Exchange {
    /// Whether the success token was observed.
    pub fn is_match(&self) -> bool {
        self.outcome == ExchangeOutcome::Matched
    }
}

/// Response from a command that eventually succeeded.
#[derive(Debug, Clone)]
pub struct Response {
    /// The full command line that was sent (without CRLF).
    pub command: String,

    /// The success token that was matched.
    pub expected: String,

    /// Text received during the successful attempt.
    pub result: String,

    /// Number of attempts used, starting at 1.
    pub attempts: u32,

    /// Time from the first write to the match, including failed attempts.
    pub elapsed: Duration,
}

impl Response {
    /// Check if the result contains a substring.
    pub fn contains(&self, pattern: &str) -> bool {
        self.result.contains(pattern)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}

/// One step of an automated run.
#[derive(Debug, Clone)]
pub struct SessionStep {
    /// Registry key of the command.
    pub key: CommandKey,

    /// The command's response.
    pub response: Response,
}

/// Result of a complete automated run.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Executed steps, in order.
    pub steps: Vec<SessionStep>,

    /// Total time for the run.
    pub elapsed: Duration,
}

impl SessionReport {
    /// Get the response for a key, if it was executed.
    pub fn response(&self, key: CommandKey) -> Option<&Response> {
        self.steps.iter().find(|s| s.key == key).map(|s| &s.response)
    }

    /// Total number of attempts across all steps.
    pub fn total_attempts(&self) -> u32 {
        self.steps.iter().map(|s| s.response.attempts).sum()
    }
}
