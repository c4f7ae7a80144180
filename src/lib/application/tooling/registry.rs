use super::interface::ToolInvoker;
use crate::types::ToolSpec;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// A discovered tool and the handle used to invoke it.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Option<Value>,
    pub server: String,
    pub handle: Arc<dyn ToolInvoker>,
}

impl ToolDescriptor {
    /// Definition handed to the model.
    pub fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self
                .input_schema
                .clone()
                .unwrap_or_else(|| json!({"type": "object", "properties": {}})),
        }
    }

    pub async fn invoke(&self, arguments: Value) -> Result<Value, super::ToolInvokeError> {
        self.handle.invoke(&self.name, arguments).await
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

/// Name to tool mapping built once at startup.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
    instructions: Vec<(String, String)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A later tool with the same name replaces the earlier one.
    pub fn insert(&mut self, descriptor: ToolDescriptor) {
        match self.index.get(&descriptor.name) {
            Some(&slot) => {
                warn!(
                    tool = descriptor.name.as_str(),
                    previous_server = self.tools[slot].server.as_str(),
                    server = descriptor.server.as_str(),
                    "Tool name registered twice; keeping the later server's tool"
                );
                self.tools[slot] = descriptor;
            }
            None => {
                self.index.insert(descriptor.name.clone(), self.tools.len());
                self.tools.push(descriptor);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    /// Tool definitions in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(ToolDescriptor::spec).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn add_instructions(&mut self, server: impl Into<String>, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.instructions.push((server.into(), text.trim().to_string()));
        }
    }

    /// `(server, instructions)` pairs in discovery order.
    pub fn instructions(&self) -> &[(String, String)] {
        &self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tooling::ToolInvokeError;
    use async_trait::async_trait;

    struct Echo(&'static str);

    #[async_trait]
    impl ToolInvoker for Echo {
        async fn invoke(&self, tool: &str, _arguments: Value) -> Result<Value, ToolInvokeError> {
            Ok(Value::String(format!("{}:{tool}", self.0)))
        }
    }

    fn descriptor(name: &str, server: &'static str) -> ToolDescriptor {
        ToolDescriptor {
            name: name.into(),
            description: None,
            input_schema: None,
            server: server.into(),
            handle: Arc::new(Echo(server)),
        }
    }

    #[tokio::test]
    async fn later_duplicate_replaces_earlier() {
        let mut registry = ToolRegistry::new();
        registry.insert(descriptor("get_expenses_summary", "first"));
        registry.insert(descriptor("add_expense", "first"));
        registry.insert(descriptor("get_expenses_summary", "second"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["get_expenses_summary", "add_expense"]);
        let tool = registry.get("get_expenses_summary").expect("tool");
        assert_eq!(tool.server, "second");
        assert_eq!(
            tool.invoke(json!({})).await.expect("invoke"),
            json!("second:get_expenses_summary")
        );
    }

    #[test]
    fn missing_tool_is_none() {
        let registry = ToolRegistry::new();
        assert!(registry.get("get_expenses_summary").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn spec_defaults_to_empty_object_schema() {
        let spec = descriptor("get_expenses_summary", "s").spec();
        assert_eq!(spec.parameters, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn blank_instructions_are_ignored() {
        let mut registry = ToolRegistry::new();
        registry.add_instructions("Summarize", "  ");
        registry.add_instructions("Summarize", " Amounts are in USD. ");
        assert_eq!(
            registry.instructions(),
            &[("Summarize".to_string(), "Amounts are in USD.".to_string())]
        );
    }
}
