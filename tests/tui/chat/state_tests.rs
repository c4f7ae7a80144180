//! Chat state tests

use crate::support::{ScriptedProvider, StubTool, call, calls, client_with, registry_with, text};
use expense_mcp_chat::domain::SessionContext;
use expense_mcp_chat::orchestrator::TurnOptions;
use expense_mcp_chat::tui::screens::chat::{ChatState, EntryRole};
use serde_json::json;

fn state() -> ChatState {
    ChatState::new(SessionContext::new(Some("system")))
}

#[test]
fn test_new_state_is_idle() {
    let state = state();
    assert!(state.input.is_empty());
    assert!(!state.loading);
    assert!(state.notices.is_empty());
    assert_eq!(state.turn_count(), 0);
}

#[test]
fn test_multibyte_editing() {
    let mut state = state();
    for c in "€5".chars() {
        state.insert_char(c);
    }
    state.move_cursor_left();
    state.delete_char();
    assert_eq!(state.input, "5");
    assert_eq!(state.cursor_pos, 0);

    state.move_cursor_end();
    state.insert_char('€');
    assert_eq!(state.input, "5€");
}

#[test]
fn test_take_input_resets_cursor() {
    let mut state = state();
    state.insert_char('a');
    assert_eq!(state.take_input(), "a");
    assert!(state.input.is_empty());
    assert_eq!(state.cursor_pos, 0);
}

#[test]
fn test_scroll_is_clamped() {
    let mut state = state();
    state.max_scroll = 3;
    for _ in 0..5 {
        state.scroll_down();
    }
    assert_eq!(state.scroll_offset, 3);

    state.scroll_to_bottom();
    state.scroll_up();
    assert_eq!(state.scroll_offset, 2);

    state.scroll_to_top();
    state.scroll_up();
    assert_eq!(state.scroll_offset, 0);
}

#[test]
fn test_loading_animation_only_ticks_while_loading() {
    let mut state = state();
    state.tick_loading();
    assert_eq!(state.loading_frame, 0);

    state.begin_turn("hi");
    for _ in 0..5 {
        state.tick_loading();
    }
    assert_eq!(state.loading_frame, 1);
}

#[tokio::test]
async fn test_completed_turn_replaces_session() {
    let provider = ScriptedProvider::new(vec![
        calls(vec![call("call_1", "get_expenses_summary", json!({}))]),
        text("532.10"),
    ]);
    let client = client_with(
        provider,
        registry_with(&[("get_expenses_summary", StubTool::returning(json!("532.10")))]),
    );
    let mut state = ChatState::new(client.new_session());

    state.begin_turn("total?");
    assert!(state.loading);
    assert_eq!(state.pending_prompt.as_deref(), Some("total?"));

    let outcome = client
        .turn(&state.session, "total?", TurnOptions::plain())
        .await
        .expect("turn succeeds");
    state.complete_turn(outcome);

    assert!(!state.loading);
    assert!(state.pending_prompt.is_none());
    assert_eq!(state.turn_count(), 1);
    assert_eq!(state.last_steps.len(), 1);
    assert!(!state.last_logs.is_empty());
    let status = state.status_message.as_deref().unwrap_or_default();
    assert!(status.starts_with("Answered at"));
    assert!(status.ends_with("using 1 tool call(s)"));
}

#[test]
fn test_failed_turn_keeps_session_and_adds_notice() {
    let mut state = state();
    let before = state.session.clone();

    state.begin_turn("total?");
    state.fail_turn("Tool \"get_expenses_summary\" failed: database locked");

    assert_eq!(state.session, before);
    assert!(!state.loading);
    assert!(state.pending_prompt.is_none());
    assert_eq!(state.notices.len(), 1);
    assert_eq!(state.notices[0].after, 0);
    assert_eq!(state.notices[0].entry.role, EntryRole::Error);
    assert!(state.notices[0].entry.timestamp.is_some());
    assert_eq!(state.status_message.as_deref(), Some("Last message failed"));
}
