//! Inspection of Discord API error responses.

use serenity::http::HttpError;

/// Unknown Channel.
pub const UNKNOWN_CHANNEL: isize = 10003;
/// Unknown Interaction, returned when the interaction token already expired.
pub const UNKNOWN_INTERACTION: isize = 10062;
/// Missing Access.
pub const MISSING_ACCESS: isize = 50001;
/// Missing Permissions.
pub const MISSING_PERMISSIONS: isize = 50013;

/// HTTP status and Discord JSON error code of an unsuccessful API request.
///
/// Returns `None` for errors that never reached Discord, such as gateway or
/// serialization failures.
pub fn error_response(err: &serenity::Error) -> Option<(u16, isize)> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some((response.status_code.as_u16(), response.error.code))
        }
        _ => None,
    }
}

/// Whether the error means the interaction can no longer be answered.
pub fn is_expired_interaction(err: &serenity::Error) -> bool {
    matches!(error_response(err), Some((_, UNKNOWN_INTERACTION)))
}
