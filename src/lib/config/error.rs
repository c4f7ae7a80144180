use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons `client.toml` cannot be turned into an [`AppConfig`](super::AppConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'model' is required")]
    MissingModel,

    #[error("'default_provider' is required")]
    MissingDefaultProvider,

    #[error("at least one [[providers]] entry is required")]
    NoProvidersConfigured,

    #[error("at least one [[servers]] entry is required to supply tools")]
    NoServersConfigured,

    #[error("default provider '{provider}' has no [[providers]] entry")]
    ProviderNotFound { provider: String },

    #[error("provider '{provider}' needs an 'endpoint'")]
    MissingEndpoint { provider: String },

    #[error("provider id '{provider}' is configured more than once")]
    DuplicateProvider { provider: String },

    #[error("server '{server}' needs a 'command' to launch")]
    MissingCommand { server: String },

    #[error("server name '{server}' is configured more than once")]
    DuplicateServer { server: String },
}
