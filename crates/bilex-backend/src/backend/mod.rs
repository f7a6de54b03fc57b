//! Backend trait and implementations.

#[cfg(feature = "http")]
pub mod gemini;

use async_trait::async_trait;

use crate::Result;

/// Trait for generative-text backends.
///
/// This trait abstracts over completion providers so the extraction
/// pipeline can run against the real Gemini API, a self-hosted model,
/// or a scripted mock in tests. Implementations must not block the
/// caller indefinitely on their own; the pipeline wraps every call in
/// a timeout and treats expiry as a backend error.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Request a completion for the given prompt.
    ///
    /// # Returns
    /// The raw completion text, which may or may not contain the JSON
    /// payload the prompt asked for.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}
