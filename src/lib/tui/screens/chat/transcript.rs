//! Deriving the visible transcript from session history

use super::state::{ChatState, TranscriptEntry};
use crate::domain::Conversation;
use crate::types::MessageRole;

/// User and assistant messages, in order.
///
/// System messages, tool results and assistant messages that only carry
/// tool calls are not shown.
pub fn transcript_entries(history: &Conversation) -> Vec<TranscriptEntry> {
    history
        .iter()
        .filter_map(|message| match message.role {
            MessageRole::User => Some(TranscriptEntry::user(message.content.clone())),
            MessageRole::Assistant if !message.has_tool_calls() => {
                Some(TranscriptEntry::assistant(message.content.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Everything the transcript pane draws: history entries with error notices
/// interleaved, then the prompt of a turn still in flight.
pub fn visible_transcript(state: &ChatState) -> Vec<TranscriptEntry> {
    let entries = transcript_entries(state.session.history());
    let mut visible = Vec::with_capacity(entries.len() + state.notices.len() + 1);
    let mut notices = state.notices.iter().peekable();

    for (idx, entry) in entries.into_iter().enumerate() {
        while let Some(notice) = notices.next_if(|notice| notice.after <= idx) {
            visible.push(notice.entry.clone());
        }
        visible.push(entry);
    }
    visible.extend(notices.map(|notice| notice.entry.clone()));

    if let Some(prompt) = &state.pending_prompt {
        visible.push(TranscriptEntry::user(prompt.clone()));
    }
    visible
}
