//! Adapting `tools/call` results into plain JSON values

use super::error::ToolInvokeError;
use serde_json::Value;

/// Reduce an MCP `tools/call` result to the value handed back to the model.
///
/// Text-only content collapses to a string (one block) or an array of
/// strings; anything else is passed through as the raw content blocks.
pub fn adapt_call_result(server: &str, tool: &str, result: Value) -> Result<Value, ToolInvokeError> {
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let content = result
        .get("content")
        .and_then(Value::as_array)
        .filter(|blocks| !blocks.is_empty());

    if is_error {
        let message = content
            .and_then(|blocks| texts(blocks))
            .map(|parts| parts.join("\n"))
            .unwrap_or_else(|| "tool returned an error".to_string());
        return Err(ToolInvokeError::ToolFailed {
            server: server.to_string(),
            tool: tool.to_string(),
            message,
        });
    }

    match content {
        Some(blocks) => match texts(blocks) {
            Some(mut parts) if parts.len() == 1 => Ok(Value::String(parts.remove(0))),
            Some(parts) => Ok(Value::Array(parts.into_iter().map(Value::String).collect())),
            None => Ok(Value::Array(blocks.clone())),
        },
        None => Ok(result
            .get("structuredContent")
            .cloned()
            .unwrap_or(Value::Null)),
    }
}

fn texts(blocks: &[Value]) -> Option<Vec<String>> {
    blocks
        .iter()
        .map(|block| match block.get("type").and_then(Value::as_str) {
            Some("text") => block.get("text").and_then(Value::as_str).map(String::from),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_text_block_becomes_string() {
        let result = json!({
            "content": [{"type": "text", "text": "{\"total\": 532.10}"}],
            "isError": false
        });
        let value = adapt_call_result("Summarize", "get_expenses_summary", result).expect("value");
        assert_eq!(value, Value::String("{\"total\": 532.10}".into()));
        assert_eq!(
            serde_json::to_string(&value).expect("encode"),
            "\"{\\\"total\\\": 532.10}\""
        );
    }

    #[test]
    fn several_text_blocks_become_array() {
        let result = json!({
            "content": [
                {"type": "text", "text": "food: 120"},
                {"type": "text", "text": "rent: 400"}
            ]
        });
        let value = adapt_call_result("s", "t", result).expect("value");
        assert_eq!(value, json!(["food: 120", "rent: 400"]));
    }

    #[test]
    fn mixed_content_is_passed_through() {
        let blocks = json!([
            {"type": "text", "text": "chart"},
            {"type": "image", "data": "AAAA", "mimeType": "image/png"}
        ]);
        let value = adapt_call_result("s", "t", json!({ "content": blocks.clone() })).expect("value");
        assert_eq!(value, blocks);
    }

    #[test]
    fn structured_content_used_when_no_blocks() {
        let result = json!({ "content": [], "structuredContent": {"total": 12} });
        let value = adapt_call_result("s", "t", result).expect("value");
        assert_eq!(value, json!({"total": 12}));
    }

    #[test]
    fn error_flag_becomes_tool_failure() {
        let result = json!({
            "content": [{"type": "text", "text": "database locked"}],
            "isError": true
        });
        match adapt_call_result("Summarize", "get_expenses_summary", result) {
            Err(ToolInvokeError::ToolFailed { tool, message, .. }) => {
                assert_eq!(tool, "get_expenses_summary");
                assert_eq!(message, "database locked");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
