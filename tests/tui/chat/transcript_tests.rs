//! Transcript view tests

use crate::support::{ScriptedProvider, StubTool, call, calls, client_with, registry_with, text};
use expense_mcp_chat::domain::SessionContext;
use expense_mcp_chat::orchestrator::TurnOptions;
use expense_mcp_chat::tui::screens::chat::{
    ChatState, EntryRole, transcript_entries, visible_transcript,
};
use serde_json::json;

fn roles_and_text(entries: &[expense_mcp_chat::tui::screens::chat::TranscriptEntry]) -> Vec<(EntryRole, &str)> {
    entries
        .iter()
        .map(|entry| (entry.role, entry.content.as_str()))
        .collect()
}

#[tokio::test]
async fn test_tool_traffic_is_hidden() {
    let provider = ScriptedProvider::new(vec![
        calls(vec![call("call_1", "get_expenses_summary", json!({}))]),
        text("You spent 532.10."),
    ]);
    let client = client_with(
        provider,
        registry_with(&[("get_expenses_summary", StubTool::returning(json!("532.10")))]),
    );
    let outcome = client
        .turn(&client.new_session(), "total?", TurnOptions::plain())
        .await
        .expect("turn succeeds");

    let entries = transcript_entries(outcome.context.history());
    assert_eq!(
        roles_and_text(&entries),
        vec![
            (EntryRole::User, "total?"),
            (EntryRole::Assistant, "You spent 532.10."),
        ]
    );
}

#[tokio::test]
async fn test_notices_are_interleaved_in_order() {
    let provider = ScriptedProvider::new(vec![text("first answer")]);
    let client = client_with(provider, registry_with(&[]));
    let mut state = ChatState::new(client.new_session());

    state.begin_turn("broken");
    state.fail_turn("model unavailable");

    let outcome = client
        .turn(&state.session, "hello", TurnOptions::plain())
        .await
        .expect("turn succeeds");
    state.complete_turn(outcome);

    state.begin_turn("again");
    state.fail_turn("still failing");

    let visible = visible_transcript(&state);
    assert_eq!(
        roles_and_text(&visible),
        vec![
            (EntryRole::Error, "model unavailable"),
            (EntryRole::User, "hello"),
            (EntryRole::Assistant, "first answer"),
            (EntryRole::Error, "still failing"),
        ]
    );
}

#[test]
fn test_pending_prompt_is_shown_last() {
    let mut state = ChatState::new(SessionContext::new(Some("system")));
    state.begin_turn("what about May?");

    let visible = visible_transcript(&state);
    assert_eq!(
        roles_and_text(&visible),
        vec![(EntryRole::User, "what about May?")]
    );
}

#[test]
fn test_system_prompt_is_not_shown() {
    let session = SessionContext::new(Some("system"));
    assert!(transcript_entries(session.history()).is_empty());
}
