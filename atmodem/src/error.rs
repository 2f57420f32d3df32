//! Error types for atmodem.

use std::io;
use thiserror::Error;

use crate::command::CommandKey;

/// Main error type for atmodem operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Serial transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Operator terminal I/O errors
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error is the terminal "command never succeeded" outcome.
    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, Error::Driver(DriverError::RetriesExhausted { .. }))
    }
}

/// Transport layer errors (opening and enumerating serial ports).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to open the serial port
    #[error("Failed to open serial port {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: tokio_serial::Error,
    },

    /// Failed to list the serial ports of this host
    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(#[source] tokio_serial::Error),

    /// No serial port is present
    #[error("No serial ports found")]
    NoPorts,

    /// Baud rate not parseable
    #[error("Invalid baud rate '{input}'")]
    InvalidBaudRate { input: String },
}

/// Channel layer errors.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Writing a command to the channel failed
    #[error("Write failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,
}

/// Driver layer errors (command exchange, configuration).
#[derive(Error, Debug)]
pub enum DriverError {
    /// The success token never appeared within the attempt budget.
    #[error(
        "Command '{command}' failed after {attempts} attempts: expected '{expected}', received {received:?}"
    )]
    RetriesExhausted {
        command: String,
        expected: String,
        received: String,
        attempts: u32,
    },

    /// Every attempt failed while writing the command.
    #[error("Command '{command}' could not be written after {attempts} attempts: {source}")]
    WriteExhausted {
        command: String,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    /// The registry has no entry for a key the driver was asked to send.
    #[error("No command registered for '{key}'")]
    UnknownCommand { key: CommandKey },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Operating mode not recognised
    #[error("Unknown mode '{input}' (expected TEST or MANUAL)")]
    UnknownMode { input: String },
}

/// Result type alias using atmodem's Error.
pub type Result<T> = std::result::Result<T, Error>;
