use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("failed to spawn MCP server '{server}': {source}")]
    Spawn {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("MCP server '{server}' transport error: {message}")]
    Transport { server: String, message: String },
    #[error("MCP server '{server}' returned invalid JSON: {source}")]
    InvalidJson {
        server: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP server '{server}' returned JSON-RPC error {code}: {message}")]
    Rpc {
        server: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{server}' terminated unexpectedly")]
    Terminated { server: String },
    #[error("MCP server '{server}' request cancelled")]
    Cancelled { server: String },
    #[error("tool '{tool}' on MCP server '{server}' reported failure: {message}")]
    ToolFailed {
        server: String,
        tool: String,
        message: String,
    },
}

/// Tool discovery failed for one server; startup cannot continue.
#[derive(Debug, Error)]
#[error("failed to discover tools from MCP server '{server}': {source}")]
pub struct DiscoveryError {
    pub server: String,
    #[source]
    pub source: ToolInvokeError,
}
