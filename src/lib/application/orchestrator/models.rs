use crate::domain::SessionContext;
use serde::Serialize;
use serde_json::Value;

/// Which tools the second model call of a turn may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinalPass {
    /// Tools stay advertised; any calls the model makes are not run.
    #[default]
    Bound,
    /// No tools are advertised.
    Plain,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TurnOptions {
    pub final_pass: FinalPass,
}

impl TurnOptions {
    pub fn bound() -> Self {
        Self {
            final_pass: FinalPass::Bound,
        }
    }

    pub fn plain() -> Self {
        Self {
            final_pass: FinalPass::Plain,
        }
    }
}

/// One executed tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolStep {
    pub call_id: String,
    pub tool: String,
    pub input: Value,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub context: SessionContext,
    pub reply: String,
    pub steps: Vec<ToolStep>,
    pub model_calls: usize,
    pub logs: Vec<String>,
}
