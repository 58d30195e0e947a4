//! Generative-text trait.

use async_trait::async_trait;

use crate::Result;

/// A generative-text collaborator.
///
/// Synchronous request/response: the implementation extracts a single text
/// field from the provider's response and surfaces a missing field as
/// [`Error::InvalidResponse`](crate::Error::InvalidResponse).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
