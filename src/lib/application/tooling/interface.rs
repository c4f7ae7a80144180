use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::error::ToolInvokeError;

/// Tool entry as advertised by a server's `tools/list`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerToolInfo {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Option<Value>,
}

/// Invocation handle for the tools of one server.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError>;
}

#[async_trait]
impl<T: ToolInvoker + ?Sized> ToolInvoker for Arc<T> {
    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        (**self).invoke(tool, arguments).await
    }
}
