//! TUI Chat interface module
//!
//! - state.rs: chat state, input buffer and turn bookkeeping
//! - transcript.rs: visible transcript derived from the session history
//! - ui.rs: rendering
//! - input.rs: key handling
//! - runner.rs: event loop and background turns

mod input;
mod runner;
mod state;
mod transcript;
mod ui;

pub use input::{InputAction, handle_input};
pub use runner::run_chat;
pub use state::{ChatState, EntryRole, Notice, TranscriptEntry};
pub use transcript::{transcript_entries, visible_transcript};
pub use ui::{EXAMPLE_PROMPTS, SUBTITLE, TITLE};
