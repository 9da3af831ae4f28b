//! Error types for Tigris client operations

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use thiserror::Error;

/// Result type for Tigris client operations
pub type TigrisResult<T> = Result<T, TigrisError>;

/// Errors raised by this crate on top of the underlying S3 client.
///
/// Pass-through operations return the SDK's own `SdkError` untouched; only
/// client construction and response-header decoding produce these.
#[derive(Error, Debug)]
pub enum TigrisError {
    /// Configuration could not be loaded or is invalid
    #[error("Failed to load Tigris config: {message}")]
    ConfigLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The raw HTTP response was not available after a successful call
    #[error("Raw HTTP response missing from {operation} result")]
    TransportMetadata { operation: &'static str },

    /// Head bucket call failed. The SDK error is kept as-is; recover it with
    /// [`TigrisError::into_sdk_error`].
    #[error(transparent)]
    HeadBucket(#[from] SdkError<HeadBucketError>),
}

impl TigrisError {
    /// Create a new config load error
    pub fn config_load(message: impl Into<String>) -> Self {
        Self::ConfigLoad {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new config load error wrapping its cause
    pub fn config_load_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new transport metadata error
    pub fn transport_metadata(operation: &'static str) -> Self {
        Self::TransportMetadata { operation }
    }

    /// The underlying SDK error, if this wraps one.
    ///
    /// Other variants are handed back unchanged in `Err`.
    pub fn into_sdk_error(self) -> Result<SdkError<HeadBucketError>, Self> {
        match self {
            Self::HeadBucket(err) => Ok(err),
            other => Err(other),
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigLoad { .. } => "configuration",
            Self::TransportMetadata { .. } => "integration",
            Self::HeadBucket(_) => "operation",
        }
    }
}
