pub mod conversation;
pub mod types;

pub use conversation::{Conversation, SessionContext};
