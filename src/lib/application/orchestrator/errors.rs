use crate::application::tooling::ToolInvokeError;
use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl TurnError {
    pub fn user_message(&self) -> String {
        match self {
            TurnError::Model(err) => err.user_message(),
            TurnError::Tool(err) => err.user_message(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool requested: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },
    #[error("failed to execute tool '{tool}': {source}")]
    Execution {
        tool: String,
        #[source]
        source: ToolInvokeError,
    },
}

impl ToolError {
    pub fn user_message(&self) -> String {
        match self {
            ToolError::UnknownTool(name) => {
                format!("The model asked for tool \"{name}\", which no server provides.")
            }
            ToolError::InvalidArguments { tool, reason } => {
                format!("The model sent unusable arguments for tool \"{tool}\": {reason}")
            }
            ToolError::Execution { tool, source } => match source {
                ToolInvokeError::ToolFailed { message, .. } => {
                    format!("Tool \"{tool}\" failed: {message}")
                }
                other => format!("Running tool \"{tool}\" failed: {other}"),
            },
        }
    }
}
