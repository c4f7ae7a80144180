use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "expense-mcp-chat",
    version,
    about = "Chat with an LLM that can call your local MCP tool servers"
)]
pub struct Cli {
    /// Path to client.toml (defaults to config/client.toml)
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long, short, value_enum, default_value_t = RunMode::Once)]
    pub mode: RunMode,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// Run the configured one-shot prompt and print the answer
    Once,
    /// Full-screen interactive chat
    Chat,
}
