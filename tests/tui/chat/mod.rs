//! Chat screen tests

mod input_tests;
mod state_tests;
mod transcript_tests;
