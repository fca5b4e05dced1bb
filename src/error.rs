//! Error types for netapply.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for netapply operations.
///
/// Variants fall into two classes. Programming/configuration errors
/// ([`InvalidInput`](Error::InvalidInput), [`UnsupportedBackend`](Error::UnsupportedBackend),
/// [`UnsupportedDeviceType`](Error::UnsupportedDeviceType),
/// [`UnsupportedOperation`](Error::UnsupportedOperation)) propagate to the
/// orchestrator's caller. Runtime conditions ([`Transport`](Error::Transport),
/// [`CheckFailed`](Error::CheckFailed)) are recorded in the job context and
/// execution continues with partial results.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed command/config arguments
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Unknown `library` backend selector
    #[error("Unknown backend '{name}'")]
    UnsupportedBackend { name: String },

    /// No backend-specific mapping for the caller's device-type string
    #[error("Device type '{device_type}' is not supported by the {backend} backend")]
    UnsupportedDeviceType {
        device_type: String,
        backend: &'static str,
    },

    /// Mutating call against a read-only backend
    #[error("Unsupported operation: {message}")]
    UnsupportedOperation { message: String },

    /// Pre/post validation mismatch — recorded, not raised
    #[error("{0}")]
    CheckFailed(String),

    /// Any failure surfaced by the underlying transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Template rendering collaborator failed
    #[error("Template render failed: {message}")]
    TemplateRender { message: String },
}

impl Error {
    /// Whether this error must propagate to the orchestrator's caller
    /// instead of being recorded as a partial failure.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. }
                | Error::UnsupportedBackend { .. }
                | Error::UnsupportedDeviceType { .. }
                | Error::UnsupportedOperation { .. }
        )
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }
}

/// Transport layer errors (connection, authentication, protocol).
///
/// Concrete transports map their library's failures into these variants.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to reach the device
    #[error("Connection failed to {host}: {message}")]
    ConnectionFailed { host: String, message: String },

    /// Authentication rejected
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Protocol-level failure reported by the device or library
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Session was closed unexpectedly
    #[error("Session closed")]
    Closed,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias using netapply's Error.
pub type Result<T> = std::result::Result<T, Error>;
