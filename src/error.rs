//! Error types for the SNP client
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

/// Result type alias using SnarlError
pub type Result<T> = std::result::Result<T, SnarlError>;

/// Unified error type for SNP client operations
#[derive(Debug, Error)]
pub enum SnarlError {
    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    /// A required argument was empty or contained a framing sequence.
    /// Raised before any network interaction.
    #[error("Validation error: {0}")]
    Validation(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Could not connect to {addr}: {source}")]
    Connection {
        addr: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Carries the raw response line that failed to parse.
    #[error("Protocol error: unexpected response {0:?}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Server Rejections (non-zero status codes)
    // -------------------------------------------------------------------------
    #[error("Registration failed: {0}")]
    Registration(String),

    #[error("Class registration failed: {0}")]
    ClassRegistration(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Unregistration failed: {0}")]
    Unregistration(String),
}
