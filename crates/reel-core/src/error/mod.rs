//! Error types and result aliases for Reelgate operations.
//!
//! Provides a unified error type covering transport, gateway, credential and
//! configuration failures. Every upstream-sourced failure is a returned
//! value, never a panic; only startup-time configuration violations may
//! abort the process.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for all Reelgate operations
#[derive(Error, Debug)]
pub enum GatewayError {
    // Transport errors
    #[error("network error: {detail}")]
    Network { detail: String },

    #[error("upstream rate limited{}", retry_after_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("upstream returned status {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("upstream payload could not be parsed (status {status})")]
    InvalidPayload { status: u16 },

    // Caller input validation
    #[error("search query must not be empty")]
    MissingQuery,

    #[error("upstream API key is not configured")]
    Unconfigured,

    // Credential errors
    #[error("authentication failed: {detail}")]
    AuthFailed { detail: String },

    // Config errors
    #[error("configuration field '{field}' is invalid: {reason}")]
    Config { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Reelgate operations
pub type GatewayResult<T> = Result<T, GatewayError>;

fn retry_after_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" (retry after {}s)", delay.as_secs()),
        None => String::new(),
    }
}

impl GatewayError {
    /// Create a network error from a detail message
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a config validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this failure is transient and safe to retry.
    ///
    /// Connection-level failures and the classic transient server statuses
    /// (500/502/503/504) qualify. Rate limiting explicitly does not: a 429
    /// is surfaced to the caller after a single attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Network { .. } => true,
            GatewayError::Upstream { status, .. } => {
                matches!(status, 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            GatewayError::Network { .. } => {
                Some("Check your internet connection and try again")
            }
            GatewayError::RateLimited { .. } => {
                Some("The upstream catalog is throttling requests; wait and retry")
            }
            GatewayError::MissingQuery => {
                Some("Provide a non-empty search query, e.g. 'reelgate catalog search Matrix'")
            }
            GatewayError::Unconfigured => {
                Some("Set TMDB_API_KEY or the [upstream] api_key in reelgate.toml")
            }
            GatewayError::AuthFailed { .. } => {
                Some("Check the backend username/password in your configuration, then run 'reelgate login'")
            }
            _ => None,
        }
    }
}
