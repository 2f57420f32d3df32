//! Append-only accumulator for one command/response exchange.
//!
//! A fresh buffer is created for every exchange (one attempt of a command, or
//! one idle-framed window in interactive mode) and dropped when it ends.
//! Nothing is ever removed while the exchange is running, so a token that has
//! been observed stays observed.

use bytes::BytesMut;
use memchr::memmem;

/// Buffer for accumulating modem output and searching it for literal tokens.
#[derive(Debug)]
pub struct ResponseBuffer {
    /// The accumulated output.
    buffer: BytesMut,
}

impl ResponseBuffer {
    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Append a chunk read from the channel.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Case-sensitive literal substring search over the whole buffer.
    ///
    /// An empty token is contained in every buffer.
    pub fn contains(&self, token: &str) -> bool {
        memmem::find(&self.buffer, token.as_bytes()).is_some()
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the buffer, returning its text.
    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extend() {
        let mut buffer = ResponseBuffer::default();
        buffer.extend(b"AT\r\n");
        buffer.extend(b"OK\r\n");
        assert_eq!(buffer.as_slice(), b"AT\r\nOK\r\n");
        assert_eq!(buffer.len(), 8);
    }

    #[test]
    fn test_token_split_across_chunks() {
        let mut buffer = ResponseBuffer::default();
        buffer.extend(b"\r\n+CPIN: RE");
        assert!(!buffer.contains("+CPIN: READY"));
        buffer.extend(b"ADY\r\n");
        assert!(buffer.contains("+CPIN: READY"));
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let mut buffer = ResponseBuffer::default();
        buffer.extend(b"+cpin: ready\r\n");
        assert!(!buffer.contains("+CPIN: READY"));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let mut buffer = ResponseBuffer::default();
        buffer.extend(&[0xff, b'O', b'K']);
        assert!(buffer.contains("OK"));
        assert_eq!(buffer.into_string(), "\u{fffd}OK");
    }
}
