//! High-level driver for modem interaction.
//!
//! The driver layer provides the main API: token-matched command exchanges
//! with retries, the automated setup run, and the interactive pass-through.

mod builder;
mod generic;
mod interactive;
mod mode;
pub(crate) mod response;
mod session;

pub use builder::{DriverBuilder, DriverConfig};
pub use generic::ModemDriver;
pub use interactive::{InteractiveResult, InteractiveStep, LineOutcome, PROMPT, STOP_WORD};
pub use mode::Mode;
pub use response::{Exchange, ExchangeOutcome, Response, SessionReport, SessionStep};
