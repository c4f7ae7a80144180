pub mod app;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod provider;
pub mod server;

pub use crate::constants::CONFIG_PATH;

pub use app::AppConfig;
pub use error::ConfigError;
pub use provider::{ModelProviderConfig, ProviderKind};
pub use server::{ServerConfig, TransportKind};
