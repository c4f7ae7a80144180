//! Dynamic model provider with multiple backends

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::factory::ProviderFactory;
use super::traits::{ModelClient, ModelProvider};
use super::types::{ModelError, ModelRequest, ModelResponse};
use crate::config::ModelProviderConfig;

/// Runtime container for a provider backend
struct ProviderRuntime {
    models: HashSet<String>,
    client: Box<dyn ModelClient>,
}

impl ProviderRuntime {
    fn supports(&self, model: &str) -> bool {
        self.models.is_empty() || self.models.contains(model)
    }
}

/// Routes each request to the backend registered under its provider id
#[derive(Default)]
pub struct DynamicModelProvider {
    backends: HashMap<String, ProviderRuntime>,
}

impl DynamicModelProvider {
    /// Create provider from config list using factory
    pub fn from_configs(configs: &[ModelProviderConfig]) -> Result<Self, ModelError> {
        let mut backends = HashMap::new();

        for config in configs {
            let models: HashSet<String> = config.models.iter().cloned().collect();
            let client = ProviderFactory::create(config);
            debug!(
                provider = client.id(),
                models = models.len(),
                "Registered model backend"
            );
            backends.insert(config.id.clone(), ProviderRuntime { models, client });
        }

        Ok(Self { backends })
    }

    /// Check if provider exists
    pub fn contains(&self, provider: &str) -> bool {
        self.backends.contains_key(provider)
    }
}

#[async_trait]
impl ModelProvider for DynamicModelProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let provider_id = &request.provider;

        let runtime = self
            .backends
            .get(provider_id)
            .ok_or_else(|| ModelError::provider_not_found(provider_id))?;

        if !runtime.supports(&request.model) {
            return Err(ModelError::model_not_found(provider_id, &request.model));
        }

        runtime.client.chat(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    fn openai_config() -> ModelProviderConfig {
        ModelProviderConfig::new("openai", ProviderKind::OpenAi, "http://127.0.0.1:9")
            .with_models(["gpt-5"])
    }

    fn request(provider: &str, model: &str) -> ModelRequest {
        ModelRequest {
            provider: provider.into(),
            model: model.into(),
            messages: Vec::new(),
            tools: Vec::new(),
        }
    }

    #[tokio::test]
    async fn unknown_provider_is_rejected() {
        let provider = DynamicModelProvider::from_configs(&[openai_config()]).expect("provider");
        assert!(provider.contains("openai"));

        let err = provider
            .chat(request("anthropic", "gpt-5"))
            .await
            .expect_err("unknown provider");
        assert!(matches!(err, ModelError::ProviderNotFound { .. }));
    }

    #[tokio::test]
    async fn unlisted_model_is_rejected() {
        let provider = DynamicModelProvider::from_configs(&[openai_config()]).expect("provider");
        let err = provider
            .chat(request("openai", "gpt-4o"))
            .await
            .expect_err("unknown model");
        assert!(matches!(err, ModelError::ModelNotFound { .. }));
    }
}
