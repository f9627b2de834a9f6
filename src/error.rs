//! Error types for sampling and transform operations.

use thiserror::Error;

/// Main error type for medaug.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid transform or sampler configuration, detected at construction.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A sampler was asked for something it cannot produce.
    #[error("invalid sample request: {0}")]
    InvalidSampleRequest(String),

    /// Axis or rank problem with the input array.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Requested crop does not fit inside the source array.
    #[error("invalid crop region: {0}")]
    InvalidCropRegion(String),

    /// Related arrays (or per-channel outputs) do not line up.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Elementwise kernel needs a contiguous buffer.
    #[error("non-contiguous array: {0}")]
    NonContiguousArray(String),

    /// A named transform failed.
    #[error("{operation} failed: {reason}")]
    TransformError {
        /// Transform that failed.
        operation: String,
        /// Why it failed.
        reason: String,
    },
}

/// Result type for medaug operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a sample request error.
    pub fn sample_request(msg: impl Into<String>) -> Self {
        Self::InvalidSampleRequest(msg.into())
    }

    /// Create a transform error for the given operation.
    pub fn transform(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TransformError {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
