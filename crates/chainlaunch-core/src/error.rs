//! Provider error types

use thiserror::Error;

/// Errors surfaced by resource lifecycle operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Bad input, rejected before any remote call
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transport failure or non-2xx response from the control plane
    #[error("Remote API error: {0}")]
    Remote(String),

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// A lookup selector did not resolve to any entity
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid import ID: {0}")]
    InvalidImportId(String),

    #[error("Malformed identity {value:?}: expected exactly two ':'-separated segments")]
    MalformedIdentity { value: String },

    #[error("Invalid identity component {segment:?} in {value:?}: expected a non-negative base-10 integer")]
    InvalidComponent { value: String, segment: String },

    #[error("State file error: {0}")]
    State(String),

    #[error("Lock acquisition failed: {0}")]
    Lock(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    /// Wrap a JSON decode failure with the endpoint it came from
    pub fn parse(context: impl std::fmt::Display, err: serde_json::Error) -> Self {
        Self::Parse(format!("{}: {}", context, err))
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
