//! Startup wiring for the text generator
//!
//! The generator is built exactly once per process from read-only
//! configuration. A failure here is a configuration error: it is reported
//! once and the process carries on with a generator that fails every call.

use std::sync::Arc;
use tracing::error;

use crate::domain::models::GeneratorConfig;
use crate::domain::ports::{TextGenerator, UnconfiguredGenerator};
use crate::infrastructure::gemini::{GeminiApiError, GeminiClient, GeminiClientConfig};
use crate::infrastructure::logging::SecretScrubber;

/// Outcome of building the text generator
pub struct GeneratorSetup {
    pub generator: Arc<dyn TextGenerator>,
    /// Set when the real backend could not be configured
    pub configuration_error: Option<String>,
}

/// Build the Gemini-backed generator, degrading to [`UnconfiguredGenerator`]
pub fn build_text_generator(config: &GeneratorConfig) -> GeneratorSetup {
    match try_build(config) {
        Ok(client) => GeneratorSetup {
            generator: Arc::new(client),
            configuration_error: None,
        },
        Err(err) => {
            let reason = SecretScrubber::new().scrub_message(&err.to_string());
            error!(error = %reason, "text generator configuration failed");
            GeneratorSetup {
                generator: Arc::new(UnconfiguredGenerator::new(reason.clone())),
                configuration_error: Some(reason),
            }
        }
    }
}

fn try_build(config: &GeneratorConfig) -> Result<GeminiClient, GeminiApiError> {
    let client_config = GeminiClientConfig::from_generator_config(config)?;
    GeminiClient::new(client_config)
}
