//! Typed faults raised by upstream HTTP APIs.
//!
//! Every call to an external game-data API funnels its failure through
//! [`UpstreamError::from_status`] or [`UpstreamError::from_reqwest`], so callers can match on a
//! stable [`UpstreamFaultKind`] instead of inspecting raw responses.

use reqwest::StatusCode;
use thiserror::Error;

/// Category of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFaultKind {
    /// Network failure, timeout or 5xx response.
    Unavailable,
    /// 429 Too Many Requests.
    RateLimited,
    /// 404 Not Found.
    NotFound,
    /// 401 or 403; for player lookups this usually means private stats.
    Forbidden,
    /// The response body did not match the expected shape.
    Malformed,
}

impl UpstreamFaultKind {
    /// Whether retrying later could succeed.
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Unavailable | Self::RateLimited)
    }
}

#[derive(Error, Debug)]
#[error("Upstream request to {endpoint} failed ({kind:?}, status {status:?}): {message}")]
pub struct UpstreamError {
    pub kind: UpstreamFaultKind,
    pub status: Option<u16>,
    pub endpoint: String,
    pub message: String,
}

impl UpstreamError {
    /// Builds an error for a non-success HTTP status.
    pub fn from_status(endpoint: &str, status: StatusCode, message: impl Into<String>) -> Self {
        let kind = match status.as_u16() {
            404 => UpstreamFaultKind::NotFound,
            401 | 403 => UpstreamFaultKind::Forbidden,
            429 => UpstreamFaultKind::RateLimited,
            _ => UpstreamFaultKind::Unavailable,
        };

        Self {
            kind,
            status: Some(status.as_u16()),
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    /// Builds an error from a transport or decoding failure.
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            UpstreamFaultKind::Malformed
        } else if let Some(status) = err.status() {
            return Self::from_status(endpoint, status, err.to_string());
        } else {
            UpstreamFaultKind::Unavailable
        };

        Self {
            kind,
            status: err.status().map(|s| s.as_u16()),
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    /// Builds an error for a body that decoded but violated the expected shape.
    pub fn malformed(endpoint: &str, message: impl Into<String>) -> Self {
        Self {
            kind: UpstreamFaultKind::Malformed,
            status: None,
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}
