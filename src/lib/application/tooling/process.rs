use super::error::ToolInvokeError;
use super::interface::{ServerToolInfo, ToolInvoker};
use super::result::adapt_call_result;
use crate::config::ServerConfig;
use crate::constants::MCP_PROTOCOL_VERSION;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tracing::{debug, info, warn};

type Responder = oneshot::Sender<Result<Value, ToolInvokeError>>;

/// A running MCP server speaking newline-delimited JSON-RPC over stdio.
///
/// The child is killed once the last handle is dropped.
#[derive(Clone)]
pub struct McpProcess {
    inner: Arc<McpProcessInner>,
}

struct McpProcessInner {
    server: ServerConfig,
    child: AsyncMutex<Option<Child>>,
    writer: AsyncMutex<Option<BufWriter<ChildStdin>>>,
    pending: AsyncMutex<HashMap<String, Responder>>,
    id_counter: AtomicU64,
    instructions: AsyncMutex<Option<String>>,
    tools: AsyncMutex<Vec<ServerToolInfo>>,
}

impl McpProcess {
    /// Spawn the server and complete the initialize handshake plus the first
    /// `tools/list`.
    pub async fn spawn(server: ServerConfig) -> Result<Self, ToolInvokeError> {
        let inner = Arc::new(McpProcessInner {
            server,
            child: AsyncMutex::new(None),
            writer: AsyncMutex::new(None),
            pending: AsyncMutex::new(HashMap::new()),
            id_counter: AtomicU64::new(1),
            instructions: AsyncMutex::new(None),
            tools: AsyncMutex::new(Vec::new()),
        });

        inner.start().await?;
        if let Err(err) = inner.initialize_sequence().await {
            inner.reset().await;
            return Err(err);
        }
        Ok(Self { inner })
    }

    pub async fn tools(&self) -> Vec<ServerToolInfo> {
        self.inner.tools.lock().await.clone()
    }

    pub async fn instructions(&self) -> Option<String> {
        self.inner.instructions.lock().await.clone()
    }
}

#[async_trait]
impl ToolInvoker for McpProcess {
    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        let result = self.inner.call_tool(tool, arguments).await?;
        adapt_call_result(&self.inner.server.name, tool, result)
    }
}

impl McpProcessInner {
    async fn start(self: &Arc<Self>) -> Result<(), ToolInvokeError> {
        let mut command = Command::new(&self.server.command);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.server.workdir {
            command.current_dir(dir);
        }
        command.args(&self.server.args);
        for (key, value) in &self.server.env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| ToolInvokeError::Spawn {
            server: self.server.name.clone(),
            source,
        })?;
        info!(
            server = %self.server.name,
            command = %self.server.command.display(),
            pid = child.id(),
            "Spawned MCP server"
        );

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.transport_error("failed to capture server stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.transport_error("failed to capture server stdout"))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_stderr(self.server.name.clone(), stderr));
        }

        *self.writer.lock().await = Some(BufWriter::new(stdin));
        *self.child.lock().await = Some(child);

        tokio::spawn(reader_loop(Arc::downgrade(self), stdout));
        Ok(())
    }

    async fn initialize_sequence(&self) -> Result<(), ToolInvokeError> {
        let params = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "title": "Expense MCP Chat"
            },
            "capabilities": {}
        });
        let init_result = self.send_request("initialize", params).await?;
        if let Some(text) = init_result.get("instructions").and_then(Value::as_str) {
            *self.instructions.lock().await = Some(text.to_string());
        }
        self.send_notification("notifications/initialized", json!({}))
            .await?;

        self.refresh_tools().await
    }

    async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value, ToolInvokeError> {
        let params = json!({
            "name": tool,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        debug!(server = %self.server.name, tool, "Calling MCP tool");
        self.send_request("tools/call", params).await
    }

    async fn refresh_tools(&self) -> Result<(), ToolInvokeError> {
        let result = self.send_request("tools/list", json!({})).await?;
        let tools = parse_tool_list(&result);
        debug!(
            server = %self.server.name,
            tools = tools.len(),
            "Refreshed tool catalogue"
        );
        *self.tools.lock().await = tools;
        Ok(())
    }

    async fn process_inbound_message(self: &Arc<Self>, value: Value) -> Result<(), ToolInvokeError> {
        match (value.get("id").cloned(), value.get("method").is_some()) {
            (Some(id), true) => self.handle_server_request(id, &value).await,
            (Some(id), false) => {
                self.handle_response(&id, value).await;
                Ok(())
            }
            (None, true) => {
                self.handle_notification(&value);
                Ok(())
            }
            (None, false) => Ok(()),
        }
    }

    async fn handle_response(&self, id: &Value, value: Value) {
        let Some(key) = response_key(id) else {
            return;
        };

        let responder = self.pending.lock().await.remove(&key);
        let Some(sender) = responder else {
            debug!(
                server = %self.server.name,
                response_id = key,
                "received response for unknown request"
            );
            return;
        };

        let outcome = match value.get("error") {
            Some(Value::Object(err)) => Err(ToolInvokeError::Rpc {
                server: self.server.name.clone(),
                code: err.get("code").and_then(Value::as_i64).unwrap_or(-32000),
                message: err
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            }),
            Some(_) => Err(self.transport_error("malformed error payload in response")),
            None => Ok(value.get("result").cloned().unwrap_or(Value::Null)),
        };
        let _ = sender.send(outcome);
    }

    async fn handle_server_request(&self, id: Value, value: &Value) -> Result<(), ToolInvokeError> {
        let method = value
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if method == "ping" {
            return self
                .write_message(&json!({ "jsonrpc": "2.0", "id": id, "result": {} }))
                .await;
        }

        warn!(
            server = %self.server.name,
            method,
            "server sent unsupported request"
        );
        let error = json!({
            "code": -32601,
            "message": format!("client does not implement method '{method}'"),
        });
        self.write_message(&json!({ "jsonrpc": "2.0", "id": id, "error": error }))
            .await
    }

    fn handle_notification(self: &Arc<Self>, value: &Value) {
        let Some(method) = value.get("method").and_then(Value::as_str) else {
            return;
        };
        debug!(
            server = %self.server.name,
            method,
            "received notification from server"
        );
        if method == "notifications/tools/list_changed" {
            // The reader loop must keep draining stdout while the refresh waits.
            let this = Arc::clone(self);
            tokio::spawn(async move {
                if let Err(err) = this.refresh_tools().await {
                    warn!(
                        server = %this.server.name,
                        %err,
                        "failed to refresh tool catalogue"
                    );
                }
            });
        }
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, ToolInvokeError> {
        let id = self.next_id();
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id.clone(), tx);

        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        if let Err(err) = self.write_message(&payload).await {
            self.pending.lock().await.remove(&id);
            return Err(err);
        }

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(ToolInvokeError::Cancelled {
                server: self.server.name.clone(),
            }),
        }
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), ToolInvokeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        });
        self.write_message(&payload).await
    }

    async fn write_message(&self, message: &Value) -> Result<(), ToolInvokeError> {
        let mut encoded =
            serde_json::to_string(message).map_err(|source| ToolInvokeError::InvalidJson {
                server: self.server.name.clone(),
                source,
            })?;
        encoded.push('\n');

        let mut writer = self.writer.lock().await;
        let stream = writer
            .as_mut()
            .ok_or_else(|| ToolInvokeError::Terminated {
                server: self.server.name.clone(),
            })?;
        stream
            .write_all(encoded.as_bytes())
            .await
            .map_err(|source| self.transport_error(source.to_string()))?;
        stream
            .flush()
            .await
            .map_err(|source| self.transport_error(source.to_string()))
    }

    async fn reset(&self) {
        self.writer.lock().await.take();

        if let Some(mut child) = self.child.lock().await.take() {
            if let Err(err) = child.kill().await {
                debug!(
                    server = %self.server.name,
                    %err,
                    "failed to kill MCP server process (may have already exited)"
                );
            }
        }

        self.fail_all_pending().await;
        self.tools.lock().await.clear();
        self.instructions.lock().await.take();
    }

    async fn fail_all_pending(&self) {
        let mut pending = self.pending.lock().await;
        for (_, sender) in pending.drain() {
            let _ = sender.send(Err(ToolInvokeError::Terminated {
                server: self.server.name.clone(),
            }));
        }
    }

    fn next_id(&self) -> String {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("req-{id}")
    }

    fn transport_error(&self, message: impl Into<String>) -> ToolInvokeError {
        ToolInvokeError::Transport {
            server: self.server.name.clone(),
            message: message.into(),
        }
    }
}

async fn reader_loop(process: Weak<McpProcessInner>, stdout: ChildStdout) {
    let mut lines = BufReader::new(stdout).lines();
    while let Ok(Some(raw)) = lines.next_line().await {
        let Some(inner) = process.upgrade() else {
            return;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('\u{1b}') {
            debug!(
                server = %inner.server.name,
                line = trimmed,
                "skipping non-JSON ANSI log line from MCP server"
            );
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => {
                if let Err(err) = inner.process_inbound_message(value).await {
                    warn!(
                        server = %inner.server.name,
                        %err,
                        "failed to process message from MCP server"
                    );
                }
            }
            Err(source) => {
                warn!(
                    server = %inner.server.name,
                    line = trimmed,
                    %source,
                    "received invalid JSON from MCP server"
                );
            }
        }
    }

    if let Some(inner) = process.upgrade() {
        debug!(server = %inner.server.name, "MCP server closed stdout");
        inner.reset().await;
    }
}

async fn forward_stderr(server: String, stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if !line.trim().is_empty() {
            debug!(server = %server, line = line.trim_end(), "MCP server stderr");
        }
    }
}

fn parse_tool_list(result: &Value) -> Vec<ServerToolInfo> {
    result
        .get("tools")
        .and_then(Value::as_array)
        .map(|tools| {
            tools
                .iter()
                .filter_map(|tool| {
                    let name = tool.get("name").and_then(Value::as_str)?;
                    Some(ServerToolInfo {
                        name: name.to_string(),
                        description: tool
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        input_schema: tool.get("inputSchema").cloned(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn response_key(id: &Value) -> Option<String> {
    match id {
        Value::String(value) => Some(value.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}
