//! Platform-neutral views of inbound Discord interactions.
//!
//! The bot handler converts serenity interaction payloads into these types before
//! dispatching, so command handlers and the dispatcher can be exercised without a live
//! gateway connection.

use std::collections::HashMap;

use crate::error::AppError;

/// Kind of an inbound interaction, the first half of a routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Command,
    Autocomplete,
}

/// A resolved option value supplied with a slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Channel(u64),
    User(u64),
}

/// A slash command invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandRequest {
    /// Top-level command name, e.g. `wishlist`.
    pub command: String,
    /// Subcommand name, e.g. `add`, if the command uses subcommands.
    pub subcommand: Option<String>,
    /// Options of the invoked (sub)command keyed by option name.
    pub options: HashMap<String, OptionValue>,
    pub user_id: u64,
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    /// Whether the invoking member holds the Manage Server permission.
    pub can_manage_guild: bool,
}

impl CommandRequest {
    /// Full command path used in logs, e.g. `wishlist add`.
    pub fn display_name(&self) -> String {
        match &self.subcommand {
            Some(sub) => format!("{} {}", self.command, sub),
            None => self.command.clone(),
        }
    }

    /// Returns a string option, or `None` if it was not supplied.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - The option was supplied with a non-string type
    pub fn string(&self, name: &str) -> Result<Option<&str>, AppError> {
        match self.options.get(name) {
            None => Ok(None),
            Some(OptionValue::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(AppError::BadRequest(format!(
                "Option '{}' expected a string, got {:?}",
                name, other
            ))),
        }
    }

    /// Returns a string option that the command definition marks as required.
    pub fn require_string(&self, name: &str) -> Result<&str, AppError> {
        self.string(name)?
            .ok_or_else(|| AppError::BadRequest(format!("Missing required option '{}'", name)))
    }

    /// Returns a channel option, or `None` if it was not supplied.
    pub fn channel(&self, name: &str) -> Result<Option<u64>, AppError> {
        match self.options.get(name) {
            None => Ok(None),
            Some(OptionValue::Channel(id)) => Ok(Some(*id)),
            Some(other) => Err(AppError::BadRequest(format!(
                "Option '{}' expected a channel, got {:?}",
                name, other
            ))),
        }
    }
}

/// An autocomplete request for the focused option of a command.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteRequest {
    pub command: String,
    /// Name of the focused option; the second half of the autocomplete routing key.
    pub field: String,
    /// Text the user has typed so far.
    pub value: String,
    pub user_id: u64,
    pub guild_id: Option<u64>,
}

/// A single autocomplete choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Label shown to the user.
    pub name: String,
    /// Value submitted with the command when the choice is picked.
    pub value: String,
}

/// Terminal state of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
    Expired,
}
