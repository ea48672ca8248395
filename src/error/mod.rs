//! Error types for the bot.
//!
//! `AppError` is the top-level error that wraps domain-specific errors. Errors raised while
//! handling an interaction never reach the end user verbatim: the interaction dispatcher logs
//! them with full context and replies with a generic message instead. Only errors raised
//! during startup are allowed to terminate the process.

pub mod config;
pub mod internal;
pub mod upstream;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, upstream::UpstreamError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// HTTP client construction error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Fault reported by an upstream game-data API.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Internal issue indicating unexpected behavior or a bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Malformed interaction input, such as an option of the wrong type.
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
