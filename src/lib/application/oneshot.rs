use super::client::McpClient;
use super::orchestrator::{TurnError, TurnOptions, TurnOutcome};
use crate::model::ModelProvider;
use std::io::{self, Write};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OneShotError {
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error("failed to write reply: {0}")]
    Io(#[from] io::Error),
}

/// Run `prompt` as the only turn of a fresh session and write the reply to `out`.
pub async fn run<P: ModelProvider>(
    client: &McpClient<P>,
    prompt: &str,
    out: &mut impl Write,
) -> Result<TurnOutcome, OneShotError> {
    let session = client.new_session();
    info!(
        session_id = session.id(),
        tools = client.tool_names().len(),
        "Running one-shot prompt"
    );

    let outcome = client.turn(&session, prompt, TurnOptions::bound()).await?;
    writeln!(out, "{}", outcome.reply)?;
    out.flush()?;
    Ok(outcome)
}
