//! Error types for the backend layer.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (connection, TLS, DNS).
    #[error("http error: {0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The call did not complete within the caller-supplied deadline.
    #[error("backend call timed out")]
    Timeout,

    /// The API answered but produced no completion text.
    #[error("backend returned an empty completion")]
    EmptyCompletion,
}
