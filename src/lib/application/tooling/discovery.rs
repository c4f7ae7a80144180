use super::error::DiscoveryError;
use super::process::McpProcess;
use super::registry::{ToolDescriptor, ToolRegistry};
use crate::config::ServerConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Spawn every configured server in order and collect its tools.
///
/// The first failing server aborts discovery; no partial registry is returned.
pub async fn discover_tools(servers: &[ServerConfig]) -> Result<ToolRegistry, DiscoveryError> {
    let mut registry = ToolRegistry::new();

    for server in servers {
        debug!(
            server = server.name.as_str(),
            transport = %server.transport,
            "Connecting to MCP server"
        );
        let process = McpProcess::spawn(server.clone())
            .await
            .map_err(|source| DiscoveryError {
                server: server.name.clone(),
                source,
            })?;

        if let Some(text) = process.instructions().await {
            registry.add_instructions(server.name.clone(), text);
        }

        let tools = process.tools().await;
        info!(
            server = server.name.as_str(),
            tools = tools.len(),
            "Discovered MCP tools"
        );

        let handle = Arc::new(process);
        for tool in tools {
            registry.insert(ToolDescriptor {
                name: tool.name,
                description: tool.description,
                input_schema: tool.input_schema,
                server: server.name.clone(),
                handle: handle.clone(),
            });
        }
    }

    Ok(registry)
}
