//! TUI module for the interactive chat using Ratatui

pub mod screens;
mod terminal;
pub mod theme;

pub use screens::run_chat;
