//! Common error types for Passkeep.

use thiserror::Error;

/// Top-level error type for Passkeep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol outside the cipher alphabet was encountered.
    #[error("Invalid character: {0:?} is not in the cipher alphabet")]
    InvalidCharacter(char),

    /// Passphrase did not match the stored vault secret.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A password is already stored for this service.
    ///
    /// This is a decision point rather than an abort: the caller chooses
    /// whether to overwrite via regenerate or skip the service.
    #[error("A password for service '{0}' is already stored")]
    DuplicateService(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
