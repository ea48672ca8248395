use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a stored Discord id from String
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// An interaction was routed to a handler that cannot process it.
    ///
    /// Raised when the registry maps a route to a handler that expects a different
    /// command or subcommand shape.
    #[error("Handler for '{command}' received unsupported subcommand '{subcommand}'")]
    UnsupportedSubcommand {
        /// The command name the handler is registered under
        command: String,
        /// The subcommand name that was received
        subcommand: String,
    },
}
