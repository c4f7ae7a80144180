//! Message adapters - convert history and tool definitions between wire formats

use crate::types::{ChatMessage, MessageRole, ToolCall, ToolSpec};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Adapter for converting messages to different API formats
pub struct MessageAdapter;

impl MessageAdapter {
    /// OpenAI chat completions messages. Tool call arguments travel as JSON text.
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::Assistant if msg.has_tool_calls() => {
                    let calls: Vec<Value> = msg
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "id": call.id,
                                "type": "function",
                                "function": {
                                    "name": call.name,
                                    "arguments": call.arguments_text(),
                                }
                            })
                        })
                        .collect();
                    let content = if msg.content.is_empty() {
                        Value::Null
                    } else {
                        Value::String(msg.content.clone())
                    };
                    json!({
                        "role": "assistant",
                        "content": content,
                        "tool_calls": calls,
                    })
                }
                MessageRole::Tool => json!({
                    "role": "tool",
                    "tool_call_id": msg.tool_call_id.clone().unwrap_or_default(),
                    "content": msg.content,
                }),
                role => json!({
                    "role": role.as_str(),
                    "content": msg.content,
                }),
            })
            .collect()
    }

    /// Ollama chat messages. Same shape as OpenAI but arguments are objects
    /// and tool results are tagged with the tool name.
    pub fn to_ollama_format(messages: &[ChatMessage]) -> Vec<Value> {
        let names = answered_tools(messages);
        messages
            .iter()
            .zip(names)
            .map(|(msg, name)| match msg.role {
                MessageRole::Assistant if msg.has_tool_calls() => {
                    let calls: Vec<Value> = msg
                        .tool_calls
                        .iter()
                        .map(|call| {
                            json!({
                                "function": {
                                    "name": call.name,
                                    "arguments": arguments_object(call),
                                }
                            })
                        })
                        .collect();
                    json!({
                        "role": "assistant",
                        "content": msg.content,
                        "tool_calls": calls,
                    })
                }
                MessageRole::Tool => {
                    let mut value = json!({
                        "role": "tool",
                        "content": msg.content,
                    });
                    if let Some(name) = name {
                        value["tool_name"] = Value::String(name);
                    }
                    value
                }
                role => json!({
                    "role": role.as_str(),
                    "content": msg.content,
                }),
            })
            .collect()
    }

    /// Gemini `generateContent` contents.
    /// Returns: (system_instruction_text, contents)
    pub fn to_gemini_format(messages: &[ChatMessage]) -> (Option<String>, Vec<Value>) {
        let names = answered_tools(messages);
        let mut system_parts = Vec::new();
        let mut contents: Vec<Value> = Vec::new();

        for (message, name) in messages.iter().zip(names) {
            match message.role {
                MessageRole::System => system_parts.push(message.content.clone()),
                MessageRole::User => contents.push(json!({
                    "role": "user",
                    "parts": [{"text": message.content}]
                })),
                MessageRole::Assistant => {
                    let mut parts = Vec::new();
                    if !message.content.is_empty() {
                        parts.push(json!({"text": message.content}));
                    }
                    for call in &message.tool_calls {
                        parts.push(json!({
                            "functionCall": {
                                "name": call.name,
                                "args": arguments_object(call),
                            }
                        }));
                    }
                    if !parts.is_empty() {
                        contents.push(json!({"role": "model", "parts": parts}));
                    }
                }
                MessageRole::Tool => {
                    let name = name.unwrap_or_default();
                    let part = json!({
                        "functionResponse": {
                            "name": name,
                            "response": {"content": message.content},
                        }
                    });
                    // Consecutive results answer one model turn and share a content entry.
                    match contents.last_mut() {
                        Some(last) if is_function_response_turn(last) => {
                            if let Some(parts) = last["parts"].as_array_mut() {
                                parts.push(part);
                            }
                        }
                        _ => contents.push(json!({"role": "user", "parts": [part]})),
                    }
                }
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system_instruction, contents)
    }

    /// OpenAI `tools` array (also accepted by Ollama).
    pub fn openai_tools(tools: &[ToolSpec]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description.clone().unwrap_or_default(),
                        "parameters": parameters_or_empty(&tool.parameters),
                    }
                })
            })
            .collect()
    }

    /// Gemini `functionDeclarations`. Gemini rejects some JSON Schema keywords.
    pub fn gemini_function_declarations(tools: &[ToolSpec]) -> Vec<Value> {
        tools
            .iter()
            .map(|tool| {
                let mut parameters = parameters_or_empty(&tool.parameters);
                strip_unsupported_schema_keys(&mut parameters);
                json!({
                    "name": tool.name,
                    "description": tool.description.clone().unwrap_or_default(),
                    "parameters": parameters,
                })
            })
            .collect()
    }
}

/// For each message, the name of the tool it answers.
///
/// A tool result is matched against the calls of the closest preceding
/// assistant message only; call ids are not unique across a session.
fn answered_tools(messages: &[ChatMessage]) -> Vec<Option<String>> {
    let mut open: HashMap<&str, &str> = HashMap::new();
    messages
        .iter()
        .map(|msg| {
            if msg.has_tool_calls() {
                open = msg
                    .tool_calls
                    .iter()
                    .map(|call| (call.id.as_str(), call.name.as_str()))
                    .collect();
            }
            match msg.role {
                MessageRole::Tool => msg
                    .tool_call_id
                    .as_deref()
                    .and_then(|id| open.get(id))
                    .map(|name| name.to_string()),
                _ => None,
            }
        })
        .collect()
}

fn arguments_object(call: &ToolCall) -> Value {
    match &call.arguments {
        Value::Object(_) => call.arguments.clone(),
        Value::String(text) => serde_json::from_str::<Value>(text)
            .ok()
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::Object(Map::new())),
        _ => Value::Object(Map::new()),
    }
}

fn parameters_or_empty(parameters: &Value) -> Value {
    if parameters.is_object() {
        parameters.clone()
    } else {
        json!({"type": "object", "properties": {}})
    }
}

fn is_function_response_turn(content: &Value) -> bool {
    content["role"] == "user"
        && content["parts"]
            .as_array()
            .is_some_and(|parts| parts.iter().all(|p| p.get("functionResponse").is_some()))
}

fn strip_unsupported_schema_keys(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };
    for key in ["$schema", "additionalProperties", "title"] {
        map.remove(key);
    }
    if let Some(Value::Object(properties)) = map.get_mut("properties") {
        properties
            .values_mut()
            .for_each(strip_unsupported_schema_keys);
    }
    if let Some(items) = map.get_mut("items") {
        strip_unsupported_schema_keys(items);
    }
    for key in ["anyOf", "oneOf", "allOf"] {
        if let Some(Value::Array(variants)) = map.get_mut(key) {
            variants.iter_mut().for_each(strip_unsupported_schema_keys);
        }
    }
}
