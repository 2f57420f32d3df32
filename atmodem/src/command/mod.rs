//! AT command definitions.
//!
//! This module holds the static command registry, keyed by name, and the
//! parameters used to format the commands that take arguments.

mod descriptor;
mod params;
mod registry;

pub use descriptor::CommandDescriptor;
pub use params::SessionParameters;
pub use registry::{CommandKey, CommandRegistry, ERROR_TOKENS, SETUP_SEQUENCE};
