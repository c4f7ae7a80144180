//! TUI unit tests
//!
//! - chat/: ChatState editing and scrolling, key handling, transcript view

mod support;
mod tui;
