//! Error types for the bilex-core library.
//!
//! The pipeline entry point itself is total and never surfaces these to
//! callers; they exist so internal stages have typed failures to log and
//! fall back on.

use thiserror::Error;

/// A backend completion could not be turned into a structured payload.
#[derive(Error, Debug)]
pub enum ParseFailure {
    /// The completion contains no `{...}` region at all.
    #[error("completion contains no JSON object")]
    NoJson { raw: String },

    /// A JSON region was found but did not parse as an object.
    #[error("malformed payload: {reason}")]
    Malformed { reason: String, raw: String },
}

impl ParseFailure {
    /// The original completion text, kept for triage logging.
    pub fn raw(&self) -> &str {
        match self {
            ParseFailure::NoJson { raw } | ParseFailure::Malformed { raw, .. } => raw,
        }
    }
}
