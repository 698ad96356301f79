use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::errors::GeminiApiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::domain::models::GeneratorConfig;
use crate::domain::ports::{GenerationError, TextGenerator};
use crate::infrastructure::logging::SecretScrubber;

/// Configuration for the Gemini HTTP client
#[derive(Clone)]
pub struct GeminiClientConfig {
    /// Google AI Studio API key
    pub api_key: String,

    /// Base URL for the generative language API
    pub base_url: String,

    /// Model identifier, e.g. `gemini-2.5-flash`
    pub model: String,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl GeminiClientConfig {
    /// Build client configuration from the application's generator settings
    pub fn from_generator_config(config: &GeneratorConfig) -> Result<Self, GeminiApiError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(GeminiApiError::MissingApiKey)?;

        if config.model.trim().is_empty() {
            return Err(GeminiApiError::InvalidConfig("model cannot be empty".to_string()));
        }
        if config.base_url.trim().is_empty() {
            return Err(GeminiApiError::InvalidConfig("base_url cannot be empty".to_string()));
        }
        if config.timeout_secs == Some(0) {
            return Err(GeminiApiError::InvalidConfig(
                "timeout_secs cannot be 0; omit it to wait indefinitely".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

/// HTTP client for the Gemini `generateContent` endpoint
///
/// One request per call: no rate limiting, no retries. A failure is returned
/// to the caller as-is.
pub struct GeminiClient {
    http_client: ReqwestClient,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini API client
    ///
    /// # Example
    /// ```no_run
    /// use ahp_diagnoser::infrastructure::gemini::{GeminiClient, GeminiClientConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new(GeminiClientConfig {
    ///     api_key: "AIza...".to_string(),
    ///     base_url: "https://generativelanguage.googleapis.com".to_string(),
    ///     model: "gemini-2.5-flash".to_string(),
    ///     timeout_secs: None,
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: GeminiClientConfig) -> Result<Self, GeminiApiError> {
        let api_key_scrubbed = if config.api_key.chars().count() > 8 {
            let prefix: String = config.api_key.chars().take(8).collect();
            format!("{prefix}...[REDACTED]")
        } else {
            "[REDACTED]".to_string()
        };

        info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = ?config.timeout_secs,
            api_key = %api_key_scrubbed,
            "initializing Gemini API client"
        );

        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|e| GeminiApiError::InvalidApiKey(e.to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("x-goog-api-key", api_key);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = ReqwestClient::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            model: config.model,
        })
    }

    /// Model this client sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one `generateContent` request
    #[instrument(skip(self, request), fields(model = %self.model))]
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let response = Self::handle_response(response).await?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "generateContent succeeded"
            );
        }

        Ok(response)
    }

    /// Handle HTTP response and convert to typed result
    async fn handle_response(response: Response) -> Result<GenerateContentResponse, GeminiApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(
                status = %status,
                body = %SecretScrubber::new().scrub_message(&body),
                "API error"
            );
            return Err(GeminiApiError::from_status(status, body));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::user_text(prompt);
        let response = self.generate_content(&request).await?;

        response.text().ok_or_else(|| {
            GeminiApiError::EmptyResponse(response.block_reason().map(str::to_string)).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GeminiClientConfig {
        GeminiClientConfig {
            api_key: "AIzaSyTestKeyTestKeyTestKey".to_string(),
            base_url: "https://example.invalid".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: None,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new(test_config()).unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_client_creation_with_timeout() {
        let config = GeminiClientConfig {
            timeout_secs: Some(30),
            ..test_config()
        };
        assert!(GeminiClient::new(config).is_ok());
    }

    #[test]
    fn test_invalid_header_key_rejected() {
        let config = GeminiClientConfig {
            api_key: "bad\nkey".to_string(),
            ..test_config()
        };
        assert!(matches!(
            GeminiClient::new(config),
            Err(GeminiApiError::InvalidApiKey(_))
        ));
    }

    #[test]
    fn test_config_requires_api_key() {
        let generator = GeneratorConfig::default();
        assert!(matches!(
            GeminiClientConfig::from_generator_config(&generator),
            Err(GeminiApiError::MissingApiKey)
        ));

        let empty = GeneratorConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(GeminiClientConfig::from_generator_config(&empty).is_err());
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let generator = GeneratorConfig {
            api_key: Some("key".to_string()),
            base_url: "http://localhost:1234/".to_string(),
            ..Default::default()
        };
        let config = GeminiClientConfig::from_generator_config(&generator).unwrap();
        assert_eq!(config.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_config_rejects_unusable_settings() {
        let with_key = || GeneratorConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };

        let empty_model = GeneratorConfig {
            model: "  ".to_string(),
            ..with_key()
        };
        let empty_url = GeneratorConfig {
            base_url: String::new(),
            ..with_key()
        };
        let zero_timeout = GeneratorConfig {
            timeout_secs: Some(0),
            ..with_key()
        };

        for config in [empty_model, empty_url, zero_timeout] {
            assert!(matches!(
                GeminiClientConfig::from_generator_config(&config),
                Err(GeminiApiError::InvalidConfig(_))
            ));
        }
    }
}
