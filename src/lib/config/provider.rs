//! # Provider Configuration
//!
//! `[[providers]]` entries name the LLM backends the model binding can reach.
//!
//! | `type` | Wire format | API Key Required |
//! |--------|-------------|-----------------|
//! | `openai` (default) | OpenAI-compatible chat completions | Yes |
//! | `gemini`, `google` | Google Gemini `generateContent` | Yes |
//! | `ollama`, `localai` | Ollama `/api/chat` | No |

use serde::Deserialize;
use std::fmt;

/// Wire format spoken by a provider endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
    Ollama,
}

impl ProviderKind {
    /// Map a configured `type` string; unrecognised types are treated as
    /// OpenAI-compatible.
    ///
    /// ```
    /// use expense_mcp_chat::config::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::from_type_name("Ollama"), ProviderKind::Ollama);
    /// assert_eq!(ProviderKind::from_type_name("google"), ProviderKind::Gemini);
    /// assert_eq!(ProviderKind::from_type_name("groq"), ProviderKind::OpenAi);
    /// ```
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ollama" | "localai" => ProviderKind::Ollama,
            "gemini" | "google" | "google-ai" => ProviderKind::Gemini,
            _ => ProviderKind::OpenAi,
        }
    }

    /// Environment variable consulted when the entry names none.
    pub fn default_api_key_var(self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Ollama => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Ollama => "ollama",
        })
    }
}

/// Validated provider entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key: Option<String>,
    /// Overrides the backend's default request path
    pub api_path: Option<String>,
    /// Model identifiers served here; empty accepts any model
    pub models: Vec<String>,
}

impl ModelProviderConfig {
    pub fn new(id: impl Into<String>, kind: ProviderKind, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            endpoint: endpoint.into(),
            api_key: None,
            api_path: None,
            models: Vec::new(),
        }
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Make sure `model` is routable through this provider.
    pub fn ensure_model(&mut self, model: &str) {
        if !self.models.iter().any(|name| name == model) {
            self.models.push(model.to_string());
        }
    }

    /// Configured key variable, or the kind's conventional one.
    pub fn api_key_var(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .or_else(|| self.kind.default_api_key_var())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: String,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) models: Vec<RawModelEntry>,
}

/// Models may be listed as bare names or as `{ name = "..." }` tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawModelEntry {
    Name(String),
    Table { name: String },
}

impl From<RawProviderConfig> for ModelProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        Self {
            id: raw.id,
            kind: ProviderKind::from_type_name(&raw.provider_type),
            endpoint: raw.endpoint.unwrap_or_default(),
            api_key: raw.api_key.filter(|name| !name.trim().is_empty()),
            api_path: raw.api_path,
            models: raw
                .models
                .into_iter()
                .map(|entry| match entry {
                    RawModelEntry::Name(name) | RawModelEntry::Table { name } => name,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_accept_names_and_tables() {
        let raw: RawProviderConfig = toml::from_str(
            r#"
id = "local"
type = "ollama"
endpoint = "http://127.0.0.1:11434"
models = ["llama3.2", { name = "qwen2.5" }]
"#,
        )
        .expect("parse");
        let config = ModelProviderConfig::from(raw);
        assert_eq!(config.kind, ProviderKind::Ollama);
        assert_eq!(config.models, vec!["llama3.2", "qwen2.5"]);
        assert_eq!(config.api_key_var(), None);
    }

    #[test]
    fn api_key_falls_back_to_kind_default() {
        let config = ModelProviderConfig::new("openai", ProviderKind::OpenAi, "https://api.openai.com");
        assert_eq!(config.api_key_var(), Some("OPENAI_API_KEY"));

        let mut named = config.clone();
        named.api_key = Some("WORK_OPENAI_KEY".into());
        assert_eq!(named.api_key_var(), Some("WORK_OPENAI_KEY"));
    }

    #[test]
    fn ensure_model_does_not_duplicate() {
        let mut config = ModelProviderConfig::new("openai", ProviderKind::OpenAi, "x")
            .with_models(["gpt-5"]);
        config.ensure_model("gpt-5");
        config.ensure_model("gpt-4o-mini");
        assert_eq!(config.models, vec!["gpt-5", "gpt-4o-mini"]);
    }
}
