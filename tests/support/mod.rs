//! Shared doubles: a scripted model provider and a recording tool.
#![allow(dead_code)]

use async_trait::async_trait;
use expense_mcp_chat::application::binding::ModelBinding;
use expense_mcp_chat::client::{ClientConfig, McpClient};
use expense_mcp_chat::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use expense_mcp_chat::tooling::{ToolDescriptor, ToolInvokeError, ToolInvoker, ToolRegistry};
use expense_mcp_chat::types::{ChatMessage, ToolCall};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SYSTEM_PROMPT: &str = "You have access to tools. When you choose to call a tool, do not narrate status updates. After tools run, return only a concise final answer.";

pub enum Scripted {
    Reply(ChatMessage),
    Fail,
}

pub fn text(content: &str) -> Scripted {
    Scripted::Reply(ChatMessage::assistant(content))
}

pub fn calls(calls: Vec<ToolCall>) -> Scripted {
    Scripted::Reply(ChatMessage::assistant_with_tools("", calls))
}

pub fn call(id: &str, name: &str, arguments: Value) -> ToolCall {
    ToolCall::new(id, name, arguments)
}

#[derive(Clone)]
pub struct ScriptedProvider {
    responses: Arc<Mutex<Vec<Scripted>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            recordings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "no scripted reply left"));
        }
        match responses.remove(0) {
            Scripted::Reply(message) => Ok(ModelResponse::new(message)),
            Scripted::Fail => Err(ModelError::invalid_response("scripted", "provider failure")),
        }
    }
}

/// Tool handle returning a fixed value and recording every invocation.
#[derive(Clone)]
pub struct StubTool {
    result: Result<Value, String>,
    invocations: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubTool {
    pub fn returning(result: Value) -> Self {
        Self {
            result: Ok(result),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn invocations(&self) -> Vec<(String, Value)> {
        self.invocations.lock().await.clone()
    }
}

#[async_trait]
impl ToolInvoker for StubTool {
    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        self.invocations
            .lock()
            .await
            .push((tool.to_string(), arguments));
        self.result
            .clone()
            .map_err(|message| ToolInvokeError::ToolFailed {
                server: "Summarize".into(),
                tool: tool.to_string(),
                message,
            })
    }
}

pub fn registry_with(tools: &[(&str, StubTool)]) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for (name, stub) in tools {
        registry.insert(ToolDescriptor {
            name: name.to_string(),
            description: Some(format!("{name} tool")),
            input_schema: Some(json!({"type": "object", "properties": {}})),
            server: "Summarize".into(),
            handle: Arc::new(stub.clone()),
        });
    }
    registry
}

pub fn client_with(
    provider: ScriptedProvider,
    registry: ToolRegistry,
) -> McpClient<ScriptedProvider> {
    let config = ClientConfig::new("openai", "gpt-5").with_system_prompt(Some(SYSTEM_PROMPT.into()));
    McpClient::with_registry(provider, config, registry)
}

pub fn bare_binding(provider: ScriptedProvider) -> ModelBinding<ScriptedProvider> {
    ModelBinding::new(provider, "openai", "gpt-5")
}
