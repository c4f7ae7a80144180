use super::CONFIG_PATH;
use super::defaults::DEFAULT_SYSTEM_PROMPT;
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::server::{RawServer, ServerConfig};
use crate::constants::ENV_PATH;
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub model: Option<String>,
    pub default_provider: Option<String>,
    pub system_prompt: Option<String>,
    pub oneshot_prompt: Option<String>,
    #[serde(default)]
    pub servers: Vec<RawServer>,
    #[serde(default)]
    pub providers: Vec<RawProviderConfig>,
}

/// Ensures provider credentials from `.env` are present in the process environment
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| match from_filename(ENV_PATH) {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(err) => debug!(%err, "No environment file loaded"),
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    read_config(config_path)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str, origin: &Path) -> Result<super::AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn read_config(path: &Path) -> Result<super::AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading client configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

fn validate_and_build(parsed: RawConfig) -> Result<super::AppConfig, ConfigError> {
    let model = parsed.model.ok_or(ConfigError::MissingModel)?;
    let default_provider = parsed
        .default_provider
        .ok_or(ConfigError::MissingDefaultProvider)?;

    if parsed.providers.is_empty() {
        return Err(ConfigError::NoProvidersConfigured);
    }
    if parsed.servers.is_empty() {
        return Err(ConfigError::NoServersConfigured);
    }

    let mut providers: Vec<ModelProviderConfig> = Vec::new();
    for raw_provider in parsed.providers {
        if raw_provider.endpoint.as_deref().is_none_or(|e| e.trim().is_empty()) {
            return Err(ConfigError::MissingEndpoint {
                provider: raw_provider.id.clone(),
            });
        }
        if providers.iter().any(|p| p.id == raw_provider.id) {
            return Err(ConfigError::DuplicateProvider {
                provider: raw_provider.id.clone(),
            });
        }
        providers.push(ModelProviderConfig::from(raw_provider));
    }
    if !providers.iter().any(|p| p.id == default_provider) {
        return Err(ConfigError::ProviderNotFound {
            provider: default_provider,
        });
    }
    // The configured model is always routable through the default provider.
    if let Some(provider) = providers.iter_mut().find(|p| p.id == default_provider) {
        provider.ensure_model(&model);
    }

    let mut servers = Vec::with_capacity(parsed.servers.len());
    for raw_server in parsed.servers {
        let missing = raw_server
            .command
            .as_deref()
            .map(str::trim)
            .is_none_or(str::is_empty);
        if missing {
            return Err(ConfigError::MissingCommand {
                server: raw_server.name.clone(),
            });
        }
        if servers.iter().any(|s: &ServerConfig| s.name == raw_server.name) {
            return Err(ConfigError::DuplicateServer {
                server: raw_server.name.clone(),
            });
        }
        servers.push(ServerConfig::from(raw_server));
    }

    let system_prompt = match parsed.system_prompt {
        Some(prompt) if prompt.trim().is_empty() => None,
        Some(prompt) => Some(prompt),
        None => Some(DEFAULT_SYSTEM_PROMPT.to_string()),
    };

    Ok(super::AppConfig {
        default_provider,
        model,
        system_prompt,
        oneshot_prompt: parsed.oneshot_prompt,
        servers,
        providers,
    })
}
