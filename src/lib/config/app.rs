use super::defaults::DEFAULT_ONESHOT_PROMPT;
use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use super::server::ServerConfig;
use std::path::Path;

/// Application configuration loaded from client.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub oneshot_prompt: Option<String>,
    pub servers: Vec<ServerConfig>,
    pub providers: Vec<ModelProviderConfig>,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Prompt used by the one-shot mode
    pub fn oneshot_prompt(&self) -> &str {
        self.oneshot_prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or(DEFAULT_ONESHOT_PROMPT)
    }

    /// Provider entry the default model is served from
    pub fn active_provider(&self) -> Option<&ModelProviderConfig> {
        self.providers
            .iter()
            .find(|provider| provider.id == self.default_provider)
    }
}
