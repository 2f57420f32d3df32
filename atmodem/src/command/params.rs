//! PDP context parameters.

use serde::{Deserialize, Serialize};

/// Parameters of the data connection defined during an automated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParameters {
    /// PDP context identifier.
    pub context_id: u32,

    /// Bearer (PDP) type, e.g. `IP`.
    pub bearer_type: String,

    /// Access point name.
    pub access_point_name: String,
}

impl SessionParameters {
    /// Create session parameters.
    pub fn new(
        context_id: u32,
        bearer_type: impl Into<String>,
        access_point_name: impl Into<String>,
    ) -> Self {
        Self {
            context_id,
            bearer_type: bearer_type.into(),
            access_point_name: access_point_name.into(),
        }
    }

    /// Format as a context-definition argument: `1,"IP","internet"`.
    pub fn to_argument(&self) -> String {
        format!(
            "{},\"{}\",\"{}\"",
            self.context_id, self.bearer_type, self.access_point_name
        )
    }
}

impl Default for SessionParameters {
    fn default() -> Self {
        Self::new(1, "IP", "internet")
    }
}
