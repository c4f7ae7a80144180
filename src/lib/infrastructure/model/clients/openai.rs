//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::{AuthScheme, HttpClientBase};
use crate::config::ModelProviderConfig;
use crate::constants::DEFAULT_OPENAI_API_PATH;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::{ChatMessage, ToolCall};

/// OpenAI-compatible client (OpenAI, Groq, Mistral, vLLM, LM Studio, ...)
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    api_path: String,
}

impl OpenAIClient {
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key_var());
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), api_key),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_API_PATH.to_string()),
        }
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(&self.api_path);

        let payload = OpenAIRequest {
            model: request.model.clone(),
            messages: MessageAdapter::to_openai_format(&request.messages),
            tools: MessageAdapter::openai_tools(&request.tools),
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self
            .base
            .post_json(&url, &payload, AuthScheme::Bearer)
            .await?;
        let message = into_message(&self.base.id, response)?;
        debug!(
            tool_calls = message.tool_calls.len(),
            "Received response from OpenAI-compatible provider"
        );

        Ok(ModelResponse::new(message))
    }
}

fn into_message(provider: &str, response: OpenAIResponse) -> Result<ChatMessage, ModelError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .ok_or_else(|| ModelError::invalid_response(provider, "missing message"))?;

    let tool_calls = message
        .tool_calls
        .into_iter()
        .map(|call| {
            ToolCall::new(
                call.id,
                call.function.name,
                call.function.arguments.unwrap_or(Value::Null),
            )
        })
        .collect();

    Ok(ChatMessage::assistant_with_tools(
        message.content.unwrap_or_default(),
        tool_calls,
    ))
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<OpenAIToolCall>,
}

#[derive(Deserialize)]
struct OpenAIToolCall {
    id: String,
    function: OpenAIFunction,
}

#[derive(Deserialize)]
struct OpenAIFunction {
    name: String,
    /// Usually JSON text; some compatible servers send an object.
    arguments: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    fn parse(raw: &str) -> Result<ChatMessage, ModelError> {
        let response: OpenAIResponse = serde_json::from_str(raw).expect("valid response json");
        into_message("openai", response)
    }

    #[test]
    fn plain_answer_has_no_tool_calls() {
        let message = parse(
            r#"{"choices":[{"message":{"role":"assistant","content":"You spent 532.10 in total."}}]}"#,
        )
        .expect("message");

        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.content, "You spent 532.10 in total.");
        assert!(!message.has_tool_calls());
    }

    #[test]
    fn tool_call_keeps_encoded_arguments() {
        let message = parse(
            r#"{"choices":[{"message":{"role":"assistant","content":null,"tool_calls":[
                {"id":"call_abc","type":"function","function":{"name":"get_expenses_summary","arguments":"{}"}}
            ]}}]}"#,
        )
        .expect("message");

        assert_eq!(message.content, "");
        assert_eq!(message.tool_calls.len(), 1);
        let call = &message.tool_calls[0];
        assert_eq!(call.id, "call_abc");
        assert_eq!(call.name, "get_expenses_summary");
        assert_eq!(call.arguments, Value::String("{}".into()));
    }

    #[test]
    fn empty_choices_is_invalid() {
        let result = parse(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(ModelError::InvalidResponse { .. })));
    }
}
