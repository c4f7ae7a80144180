//! Chat state management

use crate::application::orchestrator::{ToolStep, TurnOutcome};
use crate::domain::SessionContext;
use chrono::{DateTime, Local};

/// Who a transcript line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    User,
    Assistant,
    Error,
}

/// A single line of the rendered transcript
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub role: EntryRole,
    pub content: String,
    pub timestamp: Option<DateTime<Local>>,
}

impl TranscriptEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: EntryRole::User,
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: EntryRole::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: EntryRole::Error,
            content: content.into(),
            timestamp: Some(Local::now()),
        }
    }
}

/// Error line pinned after the first `after` history-derived entries
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub after: usize,
    pub entry: TranscriptEntry,
}

/// Chat session state
pub struct ChatState {
    /// Conversation so far; replaced wholesale when a turn completes
    pub session: SessionContext,
    /// Current input buffer
    pub input: String,
    /// Cursor position in input, in chars
    pub cursor_pos: usize,
    /// Scroll offset for messages; `u16::MAX` pins the view to the bottom
    pub scroll_offset: u16,
    /// Largest useful offset, measured by the last render
    pub max_scroll: u16,
    /// Whether waiting for response
    pub loading: bool,
    /// Loading animation frame
    pub loading_frame: usize,
    /// Prompt of the turn in flight
    pub pending_prompt: Option<String>,
    /// Failed turns, shown inline
    pub notices: Vec<Notice>,
    /// Logs from the last completed turn
    pub last_logs: Vec<String>,
    /// Tool steps from the last completed turn
    pub last_steps: Vec<ToolStep>,
    /// Status message
    pub status_message: Option<String>,
}

impl ChatState {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            max_scroll: 0,
            loading: false,
            loading_frame: 0,
            pending_prompt: None,
            notices: Vec::new(),
            last_logs: Vec::new(),
            last_steps: Vec::new(),
            status_message: None,
        }
    }

    /// Get the current input and clear it
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_pos);
        self.input.insert(idx, c);
        self.cursor_pos += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let idx = self.byte_index(self.cursor_pos - 1);
            self.input.remove(idx);
            self.cursor_pos -= 1;
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor_pos < self.input_len() {
            let idx = self.byte_index(self.cursor_pos);
            self.input.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.input_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input_len();
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll).saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset < self.max_scroll {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to bottom of messages; clamped during render
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = u16::MAX;
    }

    /// Update loading animation frame
    pub fn tick_loading(&mut self) {
        if self.loading {
            self.loading_frame = (self.loading_frame + 1) % 4;
        }
    }

    /// Lock input and remember the prompt while the turn runs
    pub fn begin_turn(&mut self, prompt: impl Into<String>) {
        self.pending_prompt = Some(prompt.into());
        self.loading = true;
        self.status_message = None;
        self.scroll_to_bottom();
    }

    /// Adopt the context produced by a successful turn
    pub fn complete_turn(&mut self, outcome: TurnOutcome) {
        self.session = outcome.context;
        self.last_logs = outcome.logs;
        self.last_steps = outcome.steps;
        self.loading = false;
        self.pending_prompt = None;
        let tools = self.last_steps.len();
        self.status_message = Some(if tools == 0 {
            format!("Answered at {}", Local::now().format("%H:%M:%S"))
        } else {
            format!(
                "Answered at {} using {tools} tool call(s)",
                Local::now().format("%H:%M:%S")
            )
        });
        self.scroll_to_bottom();
    }

    /// Keep the previous session and show the error inline
    pub fn fail_turn(&mut self, message: impl Into<String>) {
        let after = super::transcript::transcript_entries(self.session.history()).len();
        self.notices.push(Notice {
            after,
            entry: TranscriptEntry::error(message),
        });
        self.loading = false;
        self.pending_prompt = None;
        self.status_message = Some("Last message failed".into());
        self.scroll_to_bottom();
    }

    /// Number of turns sent so far in this session
    pub fn turn_count(&self) -> usize {
        self.session
            .history()
            .iter()
            .filter(|message| message.role == crate::types::MessageRole::User)
            .count()
    }
}
