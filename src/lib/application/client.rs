use super::binding::ModelBinding;
use super::orchestrator::{TurnError, TurnOptions, TurnOrchestrator, TurnOutcome};
use super::tooling::{DiscoveryError, ToolRegistry, discover_tools};
use crate::config::{AppConfig, ModelProviderConfig, ServerConfig};
use crate::domain::SessionContext;
use crate::model::{DynamicModelProvider, ModelError, ModelProvider};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub default_provider: String,
    pub default_model: String,
    pub system_prompt: Option<String>,
    pub servers: Vec<ServerConfig>,
    pub providers: Vec<ModelProviderConfig>,
}

impl ClientConfig {
    pub fn new(default_provider: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            default_provider: default_provider.into(),
            default_model: default_model.into(),
            system_prompt: None,
            servers: Vec::new(),
            providers: Vec::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_servers(mut self, servers: Vec<ServerConfig>) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_providers(mut self, providers: Vec<ModelProviderConfig>) -> Self {
        self.providers = providers;
        self
    }
}

impl From<&AppConfig> for ClientConfig {
    fn from(config: &AppConfig) -> Self {
        ClientConfig::new(config.default_provider.clone(), config.model.clone())
            .with_system_prompt(config.system_prompt.clone())
            .with_servers(config.servers.clone())
            .with_providers(config.providers.clone())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Model binding, tool registry and system prompt assembled for a run.
pub struct McpClient<P: ModelProvider> {
    orchestrator: TurnOrchestrator<P>,
    system_prompt: Option<String>,
}

impl McpClient<DynamicModelProvider> {
    /// Build the provider routing table from config, then discover tools.
    pub async fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        debug!(
            provider_count = config.providers.len(),
            "Initializing dynamic model providers"
        );
        let provider = DynamicModelProvider::from_configs(&config.providers)?;
        Self::connect(provider, config).await
    }
}

impl<P: ModelProvider> McpClient<P> {
    /// Discover tools from every configured server and bind them to the model.
    pub async fn connect(provider: P, config: ClientConfig) -> Result<Self, ClientError> {
        let registry = discover_tools(&config.servers).await?;
        info!(
            servers = config.servers.len(),
            tools = registry.len(),
            "Tool registry ready"
        );
        Ok(Self::with_registry(provider, config, registry))
    }

    pub fn with_registry(provider: P, config: ClientConfig, registry: ToolRegistry) -> Self {
        let system_prompt = compose_system_prompt(config.system_prompt.as_deref(), &registry);
        let binding = ModelBinding::new(provider, config.default_provider, config.default_model)
            .with_tools(registry.specs());
        Self {
            orchestrator: TurnOrchestrator::new(Arc::new(binding), Arc::new(registry)),
            system_prompt,
        }
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator<P> {
        &self.orchestrator
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn default_provider(&self) -> &str {
        self.orchestrator.binding().provider_id()
    }

    pub fn default_model(&self) -> &str {
        self.orchestrator.binding().model()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.orchestrator.registry().names()
    }

    /// Fresh session seeded with the system prompt.
    pub fn new_session(&self) -> SessionContext {
        SessionContext::new(self.system_prompt())
    }

    pub async fn turn(
        &self,
        context: &SessionContext,
        input: &str,
        options: TurnOptions,
    ) -> Result<TurnOutcome, TurnError> {
        self.orchestrator.run_turn(context, input, options).await
    }
}

fn compose_system_prompt(base: Option<&str>, registry: &ToolRegistry) -> Option<String> {
    let base = base.map(str::trim).filter(|text| !text.is_empty());
    let instructions = registry.instructions();
    if instructions.is_empty() {
        return base.map(str::to_string);
    }

    let mut prompt = base.map(|text| format!("{text}\n\n")).unwrap_or_default();
    prompt.push_str("Tool server instructions:");
    for (server, text) in instructions {
        prompt.push_str(&format!("\n[{server}] {text}"));
    }
    Some(prompt)
}

pub(crate) fn summarise(text: &str) -> String {
    const SNIPPET_LIMIT: usize = 160;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "(empty)".to_string();
    }
    let single_line = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = single_line.chars();
    let mut result: String = chars.by_ref().take(SNIPPET_LIMIT).collect();
    if chars.next().is_some() {
        result.push('…');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarise_collapses_whitespace_and_truncates() {
        assert_eq!(summarise("  total:\n  532.10 "), "total: 532.10");
        assert_eq!(summarise("   "), "(empty)");
        let long = "x".repeat(200);
        let snippet = summarise(&long);
        assert_eq!(snippet.chars().count(), 161);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn instructions_are_appended_to_system_prompt() {
        let mut registry = ToolRegistry::new();
        assert_eq!(
            compose_system_prompt(Some(" be brief "), &registry).as_deref(),
            Some("be brief")
        );
        assert_eq!(compose_system_prompt(None, &registry), None);

        registry.add_instructions("Summarize", "Amounts are in USD.");
        assert_eq!(
            compose_system_prompt(Some("be brief"), &registry).as_deref(),
            Some("be brief\n\nTool server instructions:\n[Summarize] Amounts are in USD.")
        );
    }
}
