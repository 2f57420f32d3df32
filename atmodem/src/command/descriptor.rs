//! Command descriptor type.

use std::time::Duration;

/// An AT command together with the token that marks its success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// The command text, e.g. `AT+CPIN?`.
    ///
    /// An empty template is a sentinel: the entry documents a token and is
    /// never sent.
    pub template: &'static str,

    /// Literal substring whose presence marks success.
    pub success_token: &'static str,

    /// How long to wait for the success token on each attempt.
    pub timeout: Duration,
}

impl CommandDescriptor {
    /// Create a descriptor.
    pub const fn new(template: &'static str, success_token: &'static str, timeout: Duration) -> Self {
        Self {
            template,
            success_token,
            timeout,
        }
    }

    /// Create a sentinel entry that is never sent.
    pub const fn sentinel(token: &'static str) -> Self {
        Self::new("", token, Duration::from_secs(2))
    }

    /// Whether this entry is a real outbound command.
    pub fn is_sendable(&self) -> bool {
        !self.template.is_empty()
    }

    /// Build the full command line (without line terminator).
    ///
    /// With `argument`, the command becomes `TEMPLATE=argument`.
    pub fn render(&self, argument: Option<&str>) -> String {
        match argument {
            Some(arg) => format!("{}={}", self.template, arg),
            None => self.template.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let desc = CommandDescriptor::new("AT+CGATT?", "+CGATT: 1", Duration::from_secs(2));
        assert_eq!(desc.render(None), "AT+CGATT?");
        assert!(desc.is_sendable());
    }

    #[test]
    fn test_render_with_argument() {
        let desc = CommandDescriptor::new("BASECOMMAND", "OK", Duration::from_secs(1));
        assert_eq!(
            desc.render(Some(r#"1,"IP","internet""#)),
            r#"BASECOMMAND=1,"IP","internet""#
        );
    }

    #[test]
    fn test_sentinel() {
        let desc = CommandDescriptor::sentinel("+CME ERROR");
        assert!(!desc.is_sendable());
        assert_eq!(desc.success_token, "+CME ERROR");
    }
}
