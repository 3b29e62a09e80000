//! Error types for the hearth store
//!
//! Two families live here:
//! - [`ServiceError`]: what a backend collaborator reports. It is plain data so
//!   it can ride inside failure actions and be read back through selectors.
//! - [`Error`]: infrastructure failures (config, logging, runtime wiring).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a backend collaborator.
///
/// Every variant carries a human readable `message`; the UI layer renders it
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ServiceError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Timed out: {message}")]
    Timeout { message: String },

    /// The task running the request died before producing a result.
    #[error("Aborted: {message}")]
    Aborted { message: String },
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted {
            message: message.into(),
        }
    }

    /// The bare message, without the category prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Validation { message }
            | Self::Timeout { message }
            | Self::Aborted { message } => message,
        }
    }

    /// Whether retrying the same request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Aborted { .. }
        )
    }
}

/// Infrastructure error types organized by layer
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Store Wiring Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No async runtime available: {message}")]
    NoRuntime { message: String },

    #[error("Action rejected: {message}")]
    InvalidAction { message: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn no_runtime(message: impl Into<String>) -> Self {
        Self::NoRuntime {
            message: message.into(),
        }
    }

    pub fn invalid_action(message: impl Into<String>) -> Self {
        Self::InvalidAction {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::InvalidAction { .. } | Error::Json(_) => true,
            Error::Service(e) => e.is_transient(),
            _ => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_message_strips_prefix() {
        let err = ServiceError::network("connection reset");
        assert_eq!(err.message(), "connection reset");
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn test_service_error_serializes_with_kind_tag() {
        let err = ServiceError::forbidden("admin only");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "forbidden");
        assert_eq!(json["message"], "admin only");

        let back: ServiceError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_service_error_is_transient() {
        assert!(ServiceError::network("x").is_transient());
        assert!(ServiceError::timeout("x").is_transient());
        assert!(!ServiceError::validation("x").is_transient());
        assert!(!ServiceError::unauthorized("x").is_transient());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_service_keeps_message() {
        let err: Error = ServiceError::not_found("hearth 4").into();
        assert_eq!(err.to_string(), "Not found: hearth 4");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_classification() {
        assert!(!Error::no_runtime("outside tokio").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
        assert!(Error::invalid_action("unknown type").is_recoverable());
        assert!(Error::Service(ServiceError::timeout("slow")).is_recoverable());
    }

    #[test]
    fn test_context_passes_error_through() {
        let res: std::result::Result<(), ServiceError> = Err(ServiceError::network("down"));
        let err = res.context("loading hearths").unwrap_err();
        assert!(matches!(err, Error::Service(ServiceError::Network { .. })));
    }
}
