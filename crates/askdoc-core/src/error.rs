//! Error types for the askdoc engine

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the askdoc engine.
///
/// No variant is retried automatically anywhere in the engine; retry, if
/// desired, is a caller-level policy.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected caller input: empty question, empty file list, unsupported
    /// file extension.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The embedding credential is absent; no network call was attempted.
    #[error("Embedding provider unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// The embedding service returned a non-success status or a response
    /// missing the expected vector field.
    #[error("Embedding service error (status {status}): {body}")]
    EmbeddingService { status: u16, body: String },

    /// The runtime disallows local persistence and neither remote
    /// credentials nor the ephemeral-store override are configured.
    /// Callers map this to a "service unavailable" condition.
    #[error("Persistence not configured: {0}")]
    PersistenceNotConfigured(String),

    /// Malformed row, network failure, or any other backend-level fault.
    #[error("Vector store error: {0}")]
    StoreBackend(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
