//! Typed errors for the extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to keep failures
//! strongly typed at the orchestrator boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the pipeline orchestrator.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A local file could not be read or decoded as UTF-8 text
    #[error("failed to read {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A remote call failed (transport error or non-success status)
    #[error("{method} {endpoint} failed: {source}")]
    RemoteCall {
        method: &'static str,
        endpoint: String,
        #[source]
        source: StoreError,
    },

    /// A run is already active on this orchestrator
    #[error("a pipeline run is already active")]
    Busy,

    /// The run was cancelled
    #[error("run cancelled")]
    Cancelled,
}

/// Errors from an object store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The service answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport failure or undecodable response body
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Result type alias for object store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
