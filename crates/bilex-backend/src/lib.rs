//! Generative-text backend abstraction for bilex.
//!
//! This crate provides a unified interface for requesting free-form
//! completions from a generative model:
//! - `GenerativeBackend` trait consumed by the extraction pipeline
//! - `GeminiBackend` talking to the Google Generative Language API (behind
//!   the default `http` feature)
//!
//! The pipeline treats every backend failure the same way (fall back to
//! heuristics), so the error taxonomy here exists for logging and triage,
//! not for control flow upstream.

mod backend;
mod error;

pub use backend::GenerativeBackend;
pub use error::BackendError;

#[cfg(feature = "http")]
pub use backend::gemini::GeminiBackend;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;
