use super::types::ChatMessage;
use serde::Serialize;
use uuid::Uuid;

/// Ordered message history. Messages can be appended but never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = ChatMessage>) {
        self.messages.extend(messages);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Per-session state handed to each turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    id: String,
    history: Conversation,
}

impl SessionContext {
    /// Fresh session, seeded with the system prompt when one is given.
    pub fn new(system_prompt: Option<&str>) -> Self {
        let mut history = Conversation::new();
        if let Some(prompt) = system_prompt.map(str::trim).filter(|p| !p.is_empty()) {
            history.push(ChatMessage::system(prompt));
        }
        Self {
            id: Uuid::new_v4().to_string(),
            history,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    /// Same session with a longer history.
    pub(crate) fn advance(&self, history: Conversation) -> Self {
        Self {
            id: self.id.clone(),
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    #[test]
    fn new_session_seeds_system_prompt() {
        let session = SessionContext::new(Some("  be brief  "));
        assert_eq!(session.history().len(), 1);
        let first = &session.history().messages()[0];
        assert_eq!(first.role, MessageRole::System);
        assert_eq!(first.content, "be brief");
    }

    #[test]
    fn blank_system_prompt_is_skipped() {
        let session = SessionContext::new(Some("   "));
        assert!(session.history().is_empty());
        assert!(SessionContext::new(None).history().is_empty());
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let a = SessionContext::new(None);
        let b = SessionContext::new(None);
        assert_ne!(a.id(), b.id());
    }
}
