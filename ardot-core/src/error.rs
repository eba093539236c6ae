//! Error types shared by the overlay core.

use thiserror::Error;

/// Errors raised by the overlay core.
#[derive(Error, Debug)]
pub enum ArError {
    /// The device cannot run the AR experience (capability check failed).
    #[error("This device is not compatible with this AR experience.\n\nUser agent: {user_agent}")]
    UnsupportedDevice { user_agent: String },

    /// A reference image named in the manifest could not be decoded.
    #[error("Failed to load reference '{name}' from {url}: {reason}")]
    ReferenceLoad {
        name: String,
        url: String,
        reason: String,
    },

    /// The manifest was not valid JSON or had the wrong shape.
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A flat matrix buffer had the wrong number of elements.
    #[error("Expected {expected} matrix elements, got {actual}")]
    MatrixShape { expected: usize, actual: usize },

    /// A build-time constant did not parse.
    #[error("Invalid build constant {name}: {value:?}")]
    InvalidBuildInfo { name: &'static str, value: String },
}

/// Alias for `Result<T, ArError>`.
pub type Result<T> = std::result::Result<T, ArError>;
