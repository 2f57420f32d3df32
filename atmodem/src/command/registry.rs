//! The built-in command table, looked up by name.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::descriptor::CommandDescriptor;

/// Tokens that end an exchange as a failure as soon as they appear.
pub const ERROR_TOKENS: [&str; 3] = ["ERROR", "+CME ERROR", "+CMS ERROR"];

/// Commands of an automated run, in the order they are issued.
pub const SETUP_SEQUENCE: &[CommandKey] = &[
    CommandKey::BaudRate,
    CommandKey::EchoOff,
    CommandKey::SimReady,
    CommandKey::Registration,
    CommandKey::Identity,
    CommandKey::TimeZoneUpdate,
    CommandKey::Clock,
    CommandKey::Attach,
    CommandKey::DefineContext,
    CommandKey::ActivateContext,
    CommandKey::OpenConnection,
    CommandKey::DeactivateContext,
];

static BUILTIN: Lazy<CommandRegistry> = Lazy::new(CommandRegistry::builtin);

/// Name of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKey {
    /// `ERROR` sentinel.
    Error,
    /// `+CME ERROR` sentinel.
    CmeError,
    /// `+CMS ERROR` sentinel.
    CmsError,
    /// Fix the serial baud rate.
    BaudRate,
    /// Disable command echo.
    EchoOff,
    /// SIM ready check.
    SimReady,
    /// Network registration check.
    Registration,
    /// Device identity (IMEI) query.
    Identity,
    /// Automatic time zone update.
    TimeZoneUpdate,
    /// Clock read.
    Clock,
    /// Packet domain attach check.
    Attach,
    /// PDP context definition; takes [`SessionParameters`](super::SessionParameters).
    DefineContext,
    /// PDP context activation.
    ActivateContext,
    /// Connection open.
    OpenConnection,
    /// PDP context deactivation.
    DeactivateContext,
}

impl CommandKey {
    /// Whether this command is sent with the session parameters as argument.
    pub fn takes_session_parameters(self) -> bool {
        matches!(self, CommandKey::DefineContext)
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered table of command descriptors.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: IndexMap<CommandKey, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    /// The built-in registry for Quectel-style modems.
    pub fn global() -> &'static CommandRegistry {
        &BUILTIN
    }

    fn builtin() -> Self {
        let secs = Duration::from_secs;

        let mut registry = Self::new();
        registry
            .insert(CommandKey::Error, CommandDescriptor::sentinel(ERROR_TOKENS[0]))
            .insert(CommandKey::CmeError, CommandDescriptor::sentinel(ERROR_TOKENS[1]))
            .insert(CommandKey::CmsError, CommandDescriptor::sentinel(ERROR_TOKENS[2]))
            .insert(CommandKey::BaudRate, CommandDescriptor::new("AT+IPR=115200", "OK", secs(2)))
            .insert(CommandKey::EchoOff, CommandDescriptor::new("ATE0", "OK", secs(2)))
            .insert(CommandKey::SimReady, CommandDescriptor::new("AT+CPIN?", "+CPIN: READY", secs(5)))
            .insert(CommandKey::Registration, CommandDescriptor::new("AT+CREG?", "+CREG:", secs(2)))
            .insert(CommandKey::Identity, CommandDescriptor::new("AT+QGSN", "+QGSN:", secs(2)))
            .insert(CommandKey::TimeZoneUpdate, CommandDescriptor::new("AT+CTZU=3", "OK", secs(2)))
            .insert(CommandKey::Clock, CommandDescriptor::new("AT+CCLK?", "+CCLK:", secs(2)))
            .insert(CommandKey::Attach, CommandDescriptor::new("AT+CGATT?", "+CGATT: 1", secs(2)))
            .insert(CommandKey::DefineContext, CommandDescriptor::new("AT+CGDCONT", "OK", secs(1)))
            .insert(CommandKey::ActivateContext, CommandDescriptor::new("AT+CGACT=1,1", "OK", secs(150)))
            .insert(CommandKey::OpenConnection, CommandDescriptor::new("AT+QIOPEN", "CONNECT OK", secs(20)))
            .insert(CommandKey::DeactivateContext, CommandDescriptor::new("AT+QIDEACT", "DEACT OK", secs(2)));
        registry
    }

    /// Add or replace an entry. New keys are appended to the end.
    pub fn insert(&mut self, key: CommandKey, descriptor: CommandDescriptor) -> &mut Self {
        self.commands.insert(key, descriptor);
        self
    }

    /// Get a descriptor by key.
    pub fn get(&self, key: CommandKey) -> Option<&CommandDescriptor> {
        self.commands.get(&key)
    }

    /// Iterate entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (CommandKey, &CommandDescriptor)> {
        self.commands.iter().map(|(key, desc)| (*key, desc))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
