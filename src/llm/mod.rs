// src/llm/mod.rs
// =============================================================================
// This module talks to the remote language model.
//
// Submodules:
// - client: sends one prompt, returns the answer or a GenerateError
// - types: request/response shapes of the chat completions API
// =============================================================================

mod client;
mod types;

pub use client::{CompletionClient, GenerateError};
