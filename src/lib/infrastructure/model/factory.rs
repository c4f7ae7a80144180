//! Provider factory - creates clients from config

use super::clients::{GeminiClient, OllamaClient, OpenAIClient};
use super::traits::ModelClient;
use crate::config::{ModelProviderConfig, ProviderKind};
use std::env;
use tracing::{debug, warn};

/// Resolve API key from the environment variable named by `spec`.
///
/// `spec` may be a bare name (`OPENAI_API_KEY`) or `${OPENAI_API_KEY}`.
pub fn resolve_api_key(provider: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim)?;
    let name = raw
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(raw);
    if name.is_empty() {
        return None;
    }
    match env::var(name) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = name,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates the client speaking the provider's wire format.
    pub fn create(config: &ModelProviderConfig) -> Box<dyn ModelClient> {
        debug!(provider = config.id.as_str(), kind = %config.kind, "Creating model client");
        match config.kind {
            ProviderKind::Ollama => Box::new(OllamaClient::from_config(config)),
            ProviderKind::Gemini => Box::new(GeminiClient::from_config(config)),
            ProviderKind::OpenAi => Box::new(OpenAIClient::from_config(config)),
        }
    }
}
