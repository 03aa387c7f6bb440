//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Pictura
///
/// The variants follow the failure taxonomy of the retrieval engine:
/// per-item embedding failures are recoverable during ingestion (the item
/// is skipped) and fatal for a single query; artifact failures are fatal
/// to engine readiness; `EngineNotReady` is recoverable by retrying after
/// a successful load.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Embedding adapter failure for a specific input (decode error,
    /// empty payload, malformed response)
    #[error("Embedding error: {message}")]
    Embedding {
        /// Description of the embedding failure
        message: String,
    },

    /// Embedding adapter unreachable (connection refused, timeout,
    /// server-side failure). Unlike [`Error::Embedding`] this is never a
    /// property of the input: ingestion aborts on it rather than
    /// skipping items, and queries surface it as a server-side failure.
    #[error("Embedding provider unavailable: {message}")]
    ProviderUnavailable {
        /// Description of the transport failure
        message: String,
    },

    /// Vector dimensionality disagrees with the index
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensions the index was created with
        expected: usize,
        /// Dimensions of the offending vector
        actual: usize,
    },

    /// One or both halves of the persisted artifact pair are absent
    #[error("Artifact missing: {message}")]
    ArtifactMissing {
        /// Which file is missing and where it was expected
        message: String,
    },

    /// The persisted artifact pair is internally inconsistent
    #[error("Artifact corrupt: {message}")]
    ArtifactCorrupt {
        /// Description of the inconsistency
        message: String,
    },

    /// Query attempted before the engine finished a successful load
    #[error("Search engine is not ready")]
    EngineNotReady,

    /// Invalid argument provided by the caller
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Internal consistency violation (server-error class)
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create an embedding error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a provider unavailable error
    pub fn provider_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an artifact-missing error
    pub fn artifact_missing<S: Into<String>>(message: S) -> Self {
        Self::ArtifactMissing {
            message: message.into(),
        }
    }

    /// Create an artifact-corrupt error
    pub fn artifact_corrupt<S: Into<String>>(message: S) -> Self {
        Self::ArtifactCorrupt {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error means the caller should retry after the engine
    /// becomes ready, rather than fix its request.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::EngineNotReady)
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
