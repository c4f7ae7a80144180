//! Infrastructure: LLM provider backends

pub mod model;
