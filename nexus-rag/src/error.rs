//! Error types for the `nexus-rag` crate.

use thiserror::Error;

/// Failures reported by a [`TextGenerator`](crate::generation::TextGenerator).
///
/// The assistant absorbs every variant and answers with a fixed
/// user-facing message; callers of the generator itself see them directly.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request could not be sent or the connection failed.
    #[error("Transport error ({provider}): {message}")]
    Transport {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Provider returned status {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Error detail extracted from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The call did not complete within the configured bound.
    #[error("Generation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// No API key was configured for the provider.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),
}

/// Errors that can occur while assembling retrieval or assistant components.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The corpus definition is inconsistent.
    #[error("Corpus error: {0}")]
    CorpusError(String),

    /// An error propagated from a generation provider.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
