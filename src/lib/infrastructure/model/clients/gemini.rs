//! Gemini client implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::base::{AuthScheme, HttpClientBase, new_call_id};
use crate::config::ModelProviderConfig;
use crate::constants::DEFAULT_GEMINI_API_PATH;
use crate::infrastructure::model::adapter::MessageAdapter;
use crate::infrastructure::model::factory::resolve_api_key;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::{ChatMessage, ToolCall};

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    api_path: String,
}

impl GeminiClient {
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key_var());
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), api_key),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
        }
    }

    fn build_model_url(&self, model: &str) -> String {
        let base = self.base.endpoint.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        format!("{base}/{path}/{model}:generateContent")
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.build_model_url(&request.model);
        let (system_text, contents) = MessageAdapter::to_gemini_format(&request.messages);

        let mut payload = json!({ "contents": contents });
        if let Some(system) = system_text {
            payload["system_instruction"] = json!({
                "parts": [{"text": system}]
            });
        }
        if !request.tools.is_empty() {
            payload["tools"] = json!([{
                "functionDeclarations": MessageAdapter::gemini_function_declarations(&request.tools)
            }]);
        }

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending request to Gemini"
        );

        let response: GeminiResponse = self
            .base
            .post_json(&url, &payload, AuthScheme::QueryKey)
            .await?;
        debug!("Received response from Gemini");

        into_message(&self.base.id, response).map(ModelResponse::new)
    }
}

fn into_message(provider: &str, response: GeminiResponse) -> Result<ChatMessage, ModelError> {
    let parts = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| ModelError::invalid_response(provider, "missing candidate content"))?;

    let mut text = String::new();
    let mut tool_calls = Vec::new();
    for part in parts {
        if let Some(chunk) = part.text {
            text.push_str(&chunk);
        }
        if let Some(call) = part.function_call {
            tool_calls.push(ToolCall::new(new_call_id(), call.name, call.args));
        }
    }

    Ok(ChatMessage::assistant_with_tools(text, tool_calls))
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_calls_get_distinct_ids() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"functionCall": {"name": "get_expenses_summary", "args": {}}},
                        {"functionCall": {"name": "list_expenses", "args": {"month": "2024-05"}}}
                    ]
                }
            }]
        }))
        .expect("response");

        let message = into_message("gemini", response).expect("message");
        assert_eq!(message.tool_calls.len(), 2);
        assert!(message.tool_calls[0].id.starts_with("call_"));
        assert_ne!(message.tool_calls[0].id, message.tool_calls[1].id);
        assert_eq!(message.tool_calls[1].arguments["month"], "2024-05");
    }

    #[test]
    fn text_parts_are_concatenated() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Total: "}, {"text": "532.10"}]}}]
        }))
        .expect("response");

        let message = into_message("gemini", response).expect("message");
        assert_eq!(message.content, "Total: 532.10");
        assert!(!message.has_tool_calls());
    }

    #[test]
    fn missing_candidates_is_invalid() {
        let response: GeminiResponse = serde_json::from_value(json!({})).expect("response");
        assert!(matches!(
            into_message("gemini", response),
            Err(ModelError::InvalidResponse { .. })
        ));
    }
}
