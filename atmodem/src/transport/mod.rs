//! Serial transport layer wrapping tokio-serial.
//!
//! This module opens the modem's serial port as a [`Channel`](crate::channel::Channel)
//! and lists the ports available on this host.

pub mod config;
mod serial;

pub use config::SerialConfig;
pub use serial::{SerialTransport, available_ports};
