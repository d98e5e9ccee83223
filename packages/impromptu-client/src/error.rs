//! Typed errors for the Impromptu client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImpromptuError {
    /// Transport-level failure (connect, TLS, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ImpromptuError>;
