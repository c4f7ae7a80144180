use crate::domain::Conversation;
use crate::model::{ModelError, ModelProvider, ModelRequest};
use crate::types::{ChatMessage, ToolSpec};
use tracing::debug;

/// A chat model together with the tools it is allowed to request.
pub struct ModelBinding<P: ModelProvider> {
    provider: P,
    provider_id: String,
    model: String,
    tools: Vec<ToolSpec>,
}

impl<P: ModelProvider> ModelBinding<P> {
    pub fn new(provider: P, provider_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider,
            provider_id: provider_id.into(),
            model: model.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Ask the model for the next assistant message; tools are advertised.
    pub async fn respond(&self, history: &Conversation) -> Result<ChatMessage, ModelError> {
        self.request(history, self.tools.clone()).await
    }

    /// Same as [`respond`](Self::respond) without advertising any tool.
    pub async fn respond_plain(&self, history: &Conversation) -> Result<ChatMessage, ModelError> {
        self.request(history, Vec::new()).await
    }

    async fn request(
        &self,
        history: &Conversation,
        tools: Vec<ToolSpec>,
    ) -> Result<ChatMessage, ModelError> {
        debug!(
            provider = self.provider_id.as_str(),
            model = self.model.as_str(),
            messages = history.len(),
            tools = tools.len(),
            "Submitting history to model provider"
        );
        let response = self
            .provider
            .chat(ModelRequest {
                provider: self.provider_id.clone(),
                model: self.model.clone(),
                messages: history.messages().to_vec(),
                tools,
            })
            .await?;
        Ok(response.message)
    }
}
