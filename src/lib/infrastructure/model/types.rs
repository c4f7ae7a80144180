//! Request, response and error types shared by every backend

use crate::types::{ChatMessage, ToolSpec};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// One chat completion call routed by provider id
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub provider: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Tools the model may request; empty for a plain completion
    pub tools: Vec<ToolSpec>,
}

/// The assistant message a backend produced
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: ChatMessage,
}

impl ModelResponse {
    pub fn new(message: ChatMessage) -> Self {
        Self { message }
    }
}

/// Failures talking to a model backend
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' is not configured")]
    ProviderNotFound { provider: String },
    #[error("model '{model}' is not available for provider '{provider}'")]
    ModelNotFound { provider: String, model: String },
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' answered HTTP {status}: {detail}")]
    Status {
        provider: String,
        status: StatusCode,
        detail: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn provider_not_found(provider: impl Into<String>) -> Self {
        Self::ProviderNotFound {
            provider: provider.into(),
        }
    }

    pub fn model_not_found(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    /// Non-success reply; `body` is searched for the provider's error text.
    pub fn status(provider: impl Into<String>, status: StatusCode, body: &str) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            detail: error_detail(body),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Short message suitable for the chat transcript
    pub fn user_message(&self) -> String {
        match self {
            ModelError::ProviderNotFound { provider } => {
                format!("Model provider '{provider}' is not configured. Check client.toml.")
            }
            ModelError::ModelNotFound { provider, model } => {
                format!("Model '{model}' is not available from provider '{provider}'.")
            }
            ModelError::MissingApiKey { provider } => {
                format!("Provider '{provider}' needs an API key. Set it in .env.")
            }
            ModelError::Network { provider, source } if source.is_timeout() => {
                format!("Request to '{provider}' timed out.")
            }
            ModelError::Network { provider, source } if source.is_connect() => {
                format!("Could not connect to model provider '{provider}'.")
            }
            ModelError::Network { provider, .. } => {
                format!("Network error talking to '{provider}'.")
            }
            ModelError::Status {
                provider, status, ..
            } if matches!(*status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                format!("Provider '{provider}' rejected the API key.")
            }
            ModelError::Status {
                provider, status, ..
            } if *status == StatusCode::TOO_MANY_REQUESTS => {
                format!("Provider '{provider}' is rate limiting requests. Try again shortly.")
            }
            ModelError::Status {
                provider,
                status,
                detail,
            } => format!("Provider '{provider}' failed ({}): {detail}", status.as_u16()),
            ModelError::InvalidResponse { provider, reason } => {
                format!("Response from '{provider}' was not understood: {reason}")
            }
        }
    }
}

/// OpenAI and Gemini nest the text under `error.message`, Ollama sends
/// `error` as a plain string.
fn error_detail(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let nested = parsed.as_ref().and_then(|value| {
        let error = value.get("error")?;
        error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
            .map(str::to_string)
    });
    nested.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "empty response body".to_string()
        } else {
            trimmed.chars().take(200).collect()
        }
    })
}
