//! Text Generation Port
//!
//! The external capability the dispatcher delegates natural-language analysis
//! to: one prompt in, one block of text out. Implementations own transport,
//! authentication and model selection.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The generator was never set up (missing key, bad client config)
    #[error("text generator is not configured: {0}")]
    NotConfigured(String),

    /// The backend rejected the credential
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Quota or rate limit reached
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Connection, DNS, TLS or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered but the reply carried no usable text
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Any other error reported by the backend
    #[error("API error: {0}")]
    Api(String),
}

/// A remote text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Generate a reply for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
