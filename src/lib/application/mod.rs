//! # Application Module
//!
//! Core logic of the client.
//!
//! ## Submodules
//!
//! - [`tooling`] - MCP server processes, tool discovery and the tool registry
//! - [`binding`] - A chat model bound to the tools it may request
//! - [`orchestrator`] - Runs one user turn, tool dispatch included
//! - [`client`] - Assembles binding, registry and system prompt
//! - [`oneshot`] - Single prompt run printing the reply

pub mod binding;
pub mod client;
pub mod oneshot;
pub mod orchestrator;
pub mod tooling;
