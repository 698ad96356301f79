//! Generator used when the real backend could not be set up.
//!
//! Startup configuration failures are reported once; afterwards every call
//! through this generator fails individually with the original reason.

use async_trait::async_trait;

use super::text_generator::{GenerationError, TextGenerator};

/// A generator whose every call fails with [`GenerationError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct UnconfiguredGenerator {
    reason: String,
}

impl UnconfiguredGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured(self.reason.clone()))
    }
}
