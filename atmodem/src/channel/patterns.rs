//! Token classification for accumulated modem output.

use super::buffer::ResponseBuffer;

/// Classification of an exchange's accumulated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// The success token is present.
    Success,

    /// One of the fixed error tokens is present (and the success token is not).
    Error(&'a str),

    /// Neither is present yet.
    Pending,
}

/// Matches a success token and a set of error tokens against a buffer.
///
/// The success token always wins: output holding both is a success.
#[derive(Debug, Clone, Copy)]
pub struct TokenMatcher<'a> {
    success: &'a str,
    errors: &'a [&'a str],
}

impl<'a> TokenMatcher<'a> {
    /// Create a matcher for one exchange.
    pub fn new(success: &'a str, errors: &'a [&'a str]) -> Self {
        Self { success, errors }
    }

    /// Classify the buffer contents.
    ///
    /// When several error tokens are present the longest (most specific)
    /// one is reported, so `+CME ERROR: 10` classifies as `+CME ERROR`
    /// rather than the bare `ERROR` it also contains.
    pub fn classify(&self, buffer: &ResponseBuffer) -> Classification<'a> {
        if buffer.contains(self.success) {
            return Classification::Success;
        }

        self.errors
            .iter()
            .copied()
            .filter(|token| !token.is_empty() && buffer.contains(token))
            .max_by_key(|token| token.len())
            .map_or(Classification::Pending, Classification::Error)
    }
}
