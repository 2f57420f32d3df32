//! # atmodem
//!
//! Async AT-command driver for cellular modems over a serial line.
//!
//! Each command is written with a CRLF terminator and the modem's output is
//! accumulated until a literal success token appears. A fixed set of error
//! tokens (`ERROR`, `+CME ERROR`, `+CMS ERROR`) ends the attempt early, and a
//! command that does not succeed within its attempt budget ends the run with
//! a typed error.
//!
//! ## Features
//!
//! - Token-matched exchanges with per-command deadlines
//! - Bounded retries with a terminal `RetriesExhausted` outcome
//! - Silence-framed interactive pass-through
//! - A named command registry instead of positional lookups
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atmodem::{DriverBuilder, SerialConfig, SerialTransport, SessionParameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), atmodem::Error> {
//!     let transport = SerialTransport::open(&SerialConfig::new("/dev/ttyUSB2"))?;
//!     let mut driver = DriverBuilder::new().build(transport)?;
//!
//!     let report = driver.run_automated(&SessionParameters::default()).await?;
//!     println!("{} commands succeeded", report.steps.len());
//!
//!     driver.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod command;
pub mod driver;
pub mod error;
pub mod transport;

// Re-export main types for convenience
pub use channel::Channel;
pub use command::{CommandDescriptor, CommandKey, CommandRegistry, SessionParameters};
pub use driver::{
    DriverBuilder, DriverConfig, InteractiveResult, Mode, ModemDriver, Response, SessionReport,
};
pub use error::Error;
pub use transport::{SerialConfig, SerialTransport};
