//! # Turn Orchestrator
//!
//! Runs a single user turn against a bound model and the tool registry.
//!
//! ## Turn flow
//!
//! 1. Append the user message and query the model with tools advertised
//! 2. No tool calls: the assistant text is the reply
//! 3. Otherwise run every requested call once, in order, and append one
//!    tool result per call
//! 4. Query the model again (bound or plain) for the final reply
//!
//! Calls requested by the final response are never executed.

mod arguments;
mod errors;
mod models;
mod runner;

pub use arguments::parse_arguments;
pub use errors::{ToolError, TurnError};
pub use models::{FinalPass, ToolStep, TurnOptions, TurnOutcome};
pub use runner::TurnOrchestrator;
