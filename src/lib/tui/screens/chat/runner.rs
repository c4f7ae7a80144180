//! Chat runner - main event loop coordinator

use super::input::{InputAction, handle_input};
use super::state::ChatState;
use super::ui::{ChatInfo, ChatUI};
use crate::application::client::McpClient;
use crate::application::orchestrator::{TurnOptions, TurnOutcome};
use crate::domain::SessionContext;
use crate::model::ModelProvider;
use crate::tui::terminal::{Tui, init_terminal, restore_terminal};
use crossterm::event;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Events from the background turn task
enum ResponseEvent {
    Completed(Box<TurnOutcome>),
    Failed(String),
}

/// Run the TUI chat interface until the user exits
pub async fn run_chat<P>(client: Arc<McpClient<P>>) -> Result<(), Box<dyn Error>>
where
    P: ModelProvider + 'static,
{
    let mut terminal = init_terminal()?;
    let mut state = ChatState::new(client.new_session());
    info!(session_id = state.session.id(), "Interactive chat started");

    let result = run_chat_loop(&mut terminal, &mut state, client).await;

    restore_terminal()?;
    result
}

async fn run_chat_loop<P>(
    terminal: &mut Tui,
    state: &mut ChatState,
    client: Arc<McpClient<P>>,
) -> Result<(), Box<dyn Error>>
where
    P: ModelProvider + 'static,
{
    let (response_tx, mut response_rx) = mpsc::channel::<ResponseEvent>(4);
    let tools = client.tool_names();
    let info = ChatInfo {
        provider: client.default_provider(),
        model: client.default_model(),
        tools: &tools,
    };

    loop {
        let mut max_scroll = 0;
        terminal.draw(|frame| {
            max_scroll = ChatUI::render(frame, state, &info);
        })?;
        state.max_scroll = max_scroll;

        while let Ok(event) = response_rx.try_recv() {
            apply_event(state, event);
        }

        let timeout = if state.loading {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if !event::poll(timeout)? {
            state.tick_loading();
            continue;
        }

        match handle_input(state, event::read()?) {
            InputAction::Exit => {
                info!(turns = state.turn_count(), "Interactive chat closed");
                return Ok(());
            }
            InputAction::Submit => {
                let input = state.take_input();
                state.begin_turn(input.clone());
                tokio::spawn(send_message(
                    client.clone(),
                    state.session.clone(),
                    input,
                    response_tx.clone(),
                ));
            }
            InputAction::ScrollUp => state.scroll_up(),
            InputAction::ScrollDown => state.scroll_down(),
            InputAction::ScrollTop => state.scroll_to_top(),
            InputAction::ScrollBottom => state.scroll_to_bottom(),
            InputAction::None => {}
        }
    }
}

fn apply_event(state: &mut ChatState, event: ResponseEvent) {
    match event {
        ResponseEvent::Completed(outcome) => state.complete_turn(*outcome),
        ResponseEvent::Failed(message) => state.fail_turn(message),
    }
}

/// Run one turn on a snapshot of the session and report back
async fn send_message<P>(
    client: Arc<McpClient<P>>,
    session: SessionContext,
    prompt: String,
    tx: mpsc::Sender<ResponseEvent>,
) where
    P: ModelProvider + 'static,
{
    let event = match client.turn(&session, &prompt, TurnOptions::plain()).await {
        Ok(outcome) => {
            debug!(
                session_id = session.id(),
                steps = outcome.steps.len(),
                model_calls = outcome.model_calls,
                "Turn completed"
            );
            ResponseEvent::Completed(Box::new(outcome))
        }
        Err(err) => {
            debug!(session_id = session.id(), %err, "Turn failed");
            ResponseEvent::Failed(err.user_message())
        }
    };
    let _ = tx.send(event).await;
}
