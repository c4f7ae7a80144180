pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod tui;

pub use application::{client, oneshot, orchestrator, tooling};
pub use cli::{Cli, RunMode};
pub use config::{AppConfig, ModelProviderConfig};
pub use domain::types;
pub use infrastructure::model;

use application::client::{ClientConfig, McpClient};
use std::error::Error;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let quiet_mode = cli.mode == RunMode::Chat;
    init_tracing(quiet_mode);
    info!("Starting expense-mcp-chat");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let file_config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }

    let client = McpClient::from_config(ClientConfig::from(&file_config)).await?;

    info!(mode = ?cli.mode, "Running client in selected mode");
    match cli.mode {
        RunMode::Once => {
            let mut stdout = io::stdout().lock();
            oneshot::run(&client, file_config.oneshot_prompt(), &mut stdout).await?;
        }
        RunMode::Chat => {
            tui::run_chat(Arc::new(client)).await?;
        }
    }
    info!("Client execution finished");
    Ok(())
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
