//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Anything that can answer a chat request, routing included.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

#[async_trait]
impl<P: ModelProvider + ?Sized> ModelProvider for Arc<P> {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        (**self).chat(request).await
    }
}

/// A single backend speaking one provider's wire format.
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn id(&self) -> &str;

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
