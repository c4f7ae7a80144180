use super::errors::ToolError;
use serde_json::{Map, Value};

/// Normalise the arguments of a tool call into a JSON object.
///
/// Accepted: `null`, a blank string, an object, or a string holding an
/// encoded object. Everything else is rejected.
pub fn parse_arguments(tool: &str, raw: &Value) -> Result<Value, ToolError> {
    match raw {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(raw.clone()),
        Value::String(text) if text.trim().is_empty() => Ok(Value::Object(Map::new())),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded @ Value::Object(_)) => Ok(decoded),
            Ok(other) => Err(invalid(tool, format!("expected a JSON object, got {}", kind(&other)))),
            Err(err) => Err(invalid(tool, format!("malformed JSON: {err}"))),
        },
        other => Err(invalid(tool, format!("expected a JSON object, got {}", kind(other)))),
    }
}

fn invalid(tool: &str, reason: String) -> ToolError {
    ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_inputs_become_empty_object() {
        assert_eq!(parse_arguments("t", &Value::Null).unwrap(), json!({}));
        assert_eq!(parse_arguments("t", &json!("  ")).unwrap(), json!({}));
    }

    #[test]
    fn objects_pass_through() {
        let args = json!({"month": "2024-05"});
        assert_eq!(parse_arguments("t", &args).unwrap(), args);
    }

    #[test]
    fn encoded_object_is_decoded() {
        let args = json!("{\"category\": \"food\"}");
        assert_eq!(
            parse_arguments("t", &args).unwrap(),
            json!({"category": "food"})
        );
    }

    #[test]
    fn malformed_text_is_rejected() {
        let err = parse_arguments("get_expenses_summary", &json!("{not json")).unwrap_err();
        match err {
            ToolError::InvalidArguments { tool, reason } => {
                assert_eq!(tool, "get_expenses_summary");
                assert!(reason.starts_with("malformed JSON"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_object_values_are_rejected() {
        assert!(parse_arguments("t", &json!([1, 2])).is_err());
        assert!(parse_arguments("t", &json!(42)).is_err());
        assert!(parse_arguments("t", &json!("[1, 2]")).is_err());
        assert!(parse_arguments("t", &json!("\"text\"")).is_err());
    }
}
