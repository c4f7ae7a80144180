//! Ollama client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::{AuthScheme, HttpClientBase, new_call_id};
use crate::config::ModelProviderConfig;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::{ChatMessage, ToolCall};

/// Ollama client for local LLM
#[derive(Clone)]
pub struct OllamaClient {
    base: HttpClientBase,
}

impl OllamaClient {
    /// Creates client from provider config.
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), None),
        }
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url("/api/chat");

        let payload = OllamaRequest {
            model: request.model.clone(),
            messages: MessageAdapter::to_ollama_format(&request.messages),
            tools: MessageAdapter::openai_tools(&request.tools),
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to Ollama"
        );

        let response: OllamaResponse = self.base.post_json(&url, &payload, AuthScheme::None).await?;
        debug!("Received response from Ollama");

        parse_response(&self.base.id, response)
    }
}

fn parse_response(provider: &str, response: OllamaResponse) -> Result<ModelResponse, ModelError> {
    let message = response
        .message
        .ok_or_else(|| ModelError::invalid_response(provider, "missing message"))?;

    // Ollama does not assign call ids.
    let tool_calls = message
        .tool_calls
        .into_iter()
        .map(|call| ToolCall::new(new_call_id(), call.function.name, call.function.arguments))
        .collect();

    Ok(ModelResponse::new(ChatMessage::assistant_with_tools(
        message.content,
        tool_calls,
    )))
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
    #[serde(default)]
    tool_calls: Vec<OllamaToolCall>,
}

#[derive(Deserialize)]
struct OllamaToolCall {
    function: OllamaFunction,
}

#[derive(Deserialize)]
struct OllamaFunction {
    name: String,
    #[serde(default)]
    arguments: Value,
}
