use reqwest::StatusCode;
use thiserror::Error;

use super::types::ErrorEnvelope;
use crate::domain::ports::GenerationError;

/// Errors that can occur when interacting with the Gemini API
#[derive(Error, Debug)]
pub enum GeminiApiError {
    /// No API key in config or environment
    #[error("API key is not set (configure generator.api_key or GEMINI_API_KEY)")]
    MissingApiKey,

    /// Generator settings the client cannot work with
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),

    /// API key cannot be sent as a header value
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// Invalid request parameters or malformed request (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key (401, 403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Model or endpoint not found (404)
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Quota or rate limit exhausted (429)
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// API server encountered an internal error (5xx)
    #[error("API server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Successful status but no text in the reply
    #[error("Empty response{}", blocked_suffix(.0))]
    EmptyResponse(Option<String>),

    /// Unknown error occurred
    #[error("Unknown error: HTTP {0}: {1}")]
    UnknownError(StatusCode, String),
}

fn blocked_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|r| format!(" (blocked: {r})"))
        .unwrap_or_default()
}

impl GeminiApiError {
    /// Create error from HTTP status code and response body
    ///
    /// The body's `error.message` is used when the body is a Google error
    /// envelope; otherwise the raw body is kept.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .ok()
            .filter(|message| !message.is_empty())
            .unwrap_or(body);

        match status.as_u16() {
            400 => Self::InvalidRequest(message),
            401 | 403 => Self::AuthenticationFailed(message),
            404 => Self::ModelNotFound(message),
            429 => Self::QuotaExceeded(message),
            _ if status.is_server_error() => Self::ServerError(status, message),
            _ => Self::UnknownError(status, message),
        }
    }
}

impl From<GeminiApiError> for GenerationError {
    fn from(err: GeminiApiError) -> Self {
        let message = err.to_string();
        match err {
            GeminiApiError::MissingApiKey
            | GeminiApiError::InvalidConfig(_)
            | GeminiApiError::InvalidApiKey(_) => Self::NotConfigured(message),
            GeminiApiError::AuthenticationFailed(_) => Self::Authentication(message),
            GeminiApiError::QuotaExceeded(_) => Self::QuotaExceeded(message),
            GeminiApiError::NetworkError(_) => Self::Network(message),
            GeminiApiError::SerializationError(_) | GeminiApiError::EmptyResponse(_) => {
                Self::InvalidResponse(message)
            }
            GeminiApiError::InvalidRequest(_)
            | GeminiApiError::ModelNotFound(_)
            | GeminiApiError::ServerError(..)
            | GeminiApiError::UnknownError(..) => Self::Api(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_400() {
        let error = GeminiApiError::from_status(StatusCode::BAD_REQUEST, "bad".to_string());
        assert!(matches!(error, GeminiApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_from_status_401_and_403() {
        let error = GeminiApiError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(matches!(error, GeminiApiError::AuthenticationFailed(_)));
        let error = GeminiApiError::from_status(StatusCode::FORBIDDEN, String::new());
        assert!(matches!(error, GeminiApiError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_from_status_404() {
        let error = GeminiApiError::from_status(StatusCode::NOT_FOUND, "no model".to_string());
        assert!(matches!(error, GeminiApiError::ModelNotFound(_)));
    }

    #[test]
    fn test_from_status_429() {
        let error = GeminiApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new());
        assert!(matches!(error, GeminiApiError::QuotaExceeded(_)));
    }

    #[test]
    fn test_from_status_503() {
        let error =
            GeminiApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "busy".to_string());
        assert!(matches!(
            error,
            GeminiApiError::ServerError(StatusCode::SERVICE_UNAVAILABLE, _)
        ));
    }

    #[test]
    fn test_from_status_unknown() {
        let error = GeminiApiError::from_status(StatusCode::IM_A_TEAPOT, "teapot".to_string());
        assert!(matches!(error, GeminiApiError::UnknownError(..)));
        assert!(error.to_string().starts_with("Unknown error: HTTP 418"));
    }

    #[test]
    fn test_from_status_extracts_envelope_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let error = GeminiApiError::from_status(StatusCode::BAD_REQUEST, body.to_string());
        assert_eq!(error.to_string(), "Invalid request: API key not valid.");
    }

    #[test]
    fn test_empty_response_display() {
        assert_eq!(GeminiApiError::EmptyResponse(None).to_string(), "Empty response");
        assert_eq!(
            GeminiApiError::EmptyResponse(Some("SAFETY".into())).to_string(),
            "Empty response (blocked: SAFETY)"
        );
    }

    #[test]
    fn test_into_generation_error() {
        let err: GenerationError = GeminiApiError::MissingApiKey.into();
        assert!(matches!(err, GenerationError::NotConfigured(_)));

        let err: GenerationError =
            GeminiApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down".into()).into();
        assert_eq!(
            err,
            GenerationError::QuotaExceeded("Quota exceeded: slow down".into())
        );
    }
}
