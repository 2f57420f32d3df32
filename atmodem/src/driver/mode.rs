//! Operating mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, Error};

/// How a run drives the modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Issue the fixed setup sequence with retries.
    Automated,

    /// Pass operator lines through and show the replies.
    Interactive,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "TEST" | "AUTO" | "AUTOMATED" => Ok(Mode::Automated),
            "MANUAL" | "INTERACTIVE" => Ok(Mode::Interactive),
            _ => Err(DriverError::UnknownMode {
                input: input.trim().to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Automated => write!(f, "TEST"),
            Mode::Interactive => write!(f, "MANUAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("test".parse::<Mode>().unwrap(), Mode::Automated);
        assert_eq!(" Manual\n".parse::<Mode>().unwrap(), Mode::Interactive);
        assert_eq!("interactive".parse::<Mode>().unwrap(), Mode::Interactive);
        assert!(matches!(
            "debug".parse::<Mode>(),
            Err(Error::Driver(DriverError::UnknownMode { .. }))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [Mode::Automated, Mode::Interactive] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde() {
        let mode: Mode = serde_json::from_str("\"interactive\"").unwrap();
        assert_eq!(mode, Mode::Interactive);
        assert_eq!(serde_json::to_string(&Mode::Automated).unwrap(), "\"automated\"");
    }
}
