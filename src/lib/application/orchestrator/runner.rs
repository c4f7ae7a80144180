use super::arguments::parse_arguments;
use super::errors::{ToolError, TurnError};
use super::models::{FinalPass, ToolStep, TurnOptions, TurnOutcome};
use crate::application::binding::ModelBinding;
use crate::application::client::summarise;
use crate::application::tooling::ToolRegistry;
use crate::domain::{Conversation, SessionContext};
use crate::model::ModelProvider;
use crate::types::{ChatMessage, ToolCall};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs user turns: first query, at most one round of tool calls, final query.
pub struct TurnOrchestrator<P: ModelProvider> {
    binding: Arc<ModelBinding<P>>,
    registry: Arc<ToolRegistry>,
}

impl<P: ModelProvider> Clone for TurnOrchestrator<P> {
    fn clone(&self) -> Self {
        Self {
            binding: Arc::clone(&self.binding),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P: ModelProvider> TurnOrchestrator<P> {
    pub fn new(binding: Arc<ModelBinding<P>>, registry: Arc<ToolRegistry>) -> Self {
        Self { binding, registry }
    }

    pub fn binding(&self) -> &ModelBinding<P> {
        &self.binding
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one turn against `context`.
    ///
    /// The returned outcome carries the extended context; `context` itself is
    /// never modified, so a failed turn leaves the session as it was.
    pub async fn run_turn(
        &self,
        context: &SessionContext,
        input: &str,
        options: TurnOptions,
    ) -> Result<TurnOutcome, TurnError> {
        let mut history = context.history().clone();
        let mut logs = vec![format!(
            "Provider '{}' with model '{}'",
            self.binding.provider_id(),
            self.binding.model()
        )];

        history.push(ChatMessage::user(input));
        logs.push(format!("User: {}", summarise(input)));

        let first = self.binding.respond(&history).await?;
        let mut model_calls = 1;
        let mut steps = Vec::new();

        if !first.has_tool_calls() {
            debug!(session_id = context.id(), "Model answered without tools");
            logs.push(format!("Model: {}", summarise(&first.content)));
            let reply = first.content.clone();
            history.push(first);
            return Ok(self.finish(context, history, reply, steps, model_calls, logs));
        }

        let calls = first.tool_calls.clone();
        info!(
            session_id = context.id(),
            calls = calls.len(),
            "Model requested tool calls"
        );
        history.push(first);

        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            let step = self.dispatch(call).await?;
            logs.push(format!(
                "Tool '{}' ({}) returned: {}",
                step.tool,
                step.call_id,
                summarise(&step.content)
            ));
            results.push(ChatMessage::tool_result(&step.call_id, step.content.clone()));
            steps.push(step);
        }
        history.extend(results);

        let mut last = match options.final_pass {
            FinalPass::Bound => self.binding.respond(&history).await?,
            FinalPass::Plain => self.binding.respond_plain(&history).await?,
        };
        model_calls += 1;

        if last.has_tool_calls() {
            let dropped: Vec<&str> = last.tool_calls.iter().map(|c| c.name.as_str()).collect();
            warn!(
                session_id = context.id(),
                tools = ?dropped,
                "Final response requested more tools; they will not be run"
            );
            logs.push(format!("Ignored follow-up tool calls: {}", dropped.join(", ")));
            last.tool_calls.clear();
        }

        logs.push(format!("Model: {}", summarise(&last.content)));
        let reply = last.content.clone();
        history.push(last);
        Ok(self.finish(context, history, reply, steps, model_calls, logs))
    }

    async fn dispatch(&self, call: &ToolCall) -> Result<ToolStep, ToolError> {
        let tool = self
            .registry
            .get(&call.name)
            .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;
        let input = parse_arguments(&call.name, &call.arguments)?;

        debug!(
            tool = call.name.as_str(),
            call_id = call.id.as_str(),
            server = tool.server.as_str(),
            "Dispatching tool call"
        );
        let output = tool
            .invoke(input.clone())
            .await
            .map_err(|source| ToolError::Execution {
                tool: call.name.clone(),
                source,
            })?;

        Ok(ToolStep {
            call_id: call.id.clone(),
            tool: call.name.clone(),
            input,
            content: output.to_string(),
        })
    }

    fn finish(
        &self,
        context: &SessionContext,
        history: Conversation,
        reply: String,
        steps: Vec<ToolStep>,
        model_calls: usize,
        logs: Vec<String>,
    ) -> TurnOutcome {
        let context = context.advance(history);
        for entry in &logs {
            info!(session_id = context.id(), %entry, "Interaction log");
        }
        TurnOutcome {
            context,
            reply,
            steps,
            model_calls,
            logs,
        }
    }
}
