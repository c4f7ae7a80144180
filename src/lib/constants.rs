//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/client.toml";

/// Environment file holding provider credentials
pub const ENV_PATH: &str = ".env";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default OpenAI-compatible chat completions path
pub const DEFAULT_OPENAI_API_PATH: &str = "/v1/chat/completions";

/// MCP protocol revision announced during the handshake
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";
