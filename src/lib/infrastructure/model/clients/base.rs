//! Base HTTP client with shared logic

use crate::infrastructure::model::types::ModelError;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// How a provider expects its API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `?key=<key>` query parameter (Gemini)
    QueryKey,
    /// Local services such as Ollama
    None,
}

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(id: String, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            id,
            endpoint,
            api_key,
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|err| {
                    warn!(%err, "Falling back to default HTTP client");
                    Client::new()
                }),
        }
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// POST a JSON body and decode a JSON reply.
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        body: &Req,
        auth: AuthScheme,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let request = self.authorize(self.http.post(url), auth)?;
        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;

        let status = response.status();
        debug!(provider = self.id.as_str(), %status, "Provider responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::status(&self.id, status, &body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;
        serde_json::from_str(&text)
            .map_err(|e| ModelError::invalid_response(&self.id, e.to_string()))
    }

    fn authorize(
        &self,
        request: RequestBuilder,
        auth: AuthScheme,
    ) -> Result<RequestBuilder, ModelError> {
        match auth {
            AuthScheme::None => Ok(request),
            AuthScheme::Bearer => Ok(request.bearer_auth(self.require_api_key()?)),
            AuthScheme::QueryKey => Ok(request.query(&[("key", self.require_api_key()?)])),
        }
    }

    fn require_api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))
    }
}

/// Call id for backends that do not assign their own; unique per session.
pub(super) fn new_call_id() -> String {
    format!("call_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        let base = HttpClientBase::new("openai".into(), "https://api.openai.com/".into(), None);
        assert_eq!(
            base.build_url("/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let base = HttpClientBase::new("openai".into(), "http://x".into(), Some("  ".into()));
        assert!(matches!(
            base.require_api_key(),
            Err(ModelError::MissingApiKey { .. })
        ));
    }
}
