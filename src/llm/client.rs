// src/llm/client.rs
// =============================================================================
// This module sends one prompt to a chat completion endpoint and returns
// the model's answer.
//
// Request:
//   POST <completion url>
//   Authorization: Bearer <api key>
//   {"model": "...", "messages": [{"role": "user", "content": "<prompt>"}]}
//
// Response (the part we read):
//   {"choices": [{"message": {"content": "<answer>"}}]}
//
// Anything else (network failure, bad status, missing field, empty answer)
// becomes a GenerateError. The caller always gets either real text or an
// error it can tell apart from text.
//
// Rust concepts:
// - thiserror: one enum variant per failure mode
// - reqwest's json() builder for request bodies
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use tracing::{debug, error};

use super::types::{ChatRequest, ChatResponse};
use crate::config::CompletionConfig;
use crate::github::describe_error;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("completion API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion API response could not be parsed: {0}")]
    Malformed(String),

    #[error("completion API reported an error: {0}")]
    Api(String),

    #[error("completion API response has no choices[0].message.content")]
    MissingContent,

    #[error("completion API returned an empty answer")]
    EmptyContent,
}

/// Calls the chat completion endpoint
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends `prompt` as a single user message and returns the answer
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let result = self.request(prompt).await;

        if let Err(e) = &result {
            error!(model = %self.config.model, error = %e, "completion failed");
        }

        result
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerateError> {
        debug!(model = %self.config.model, prompt_chars = prompt.len(), "requesting completion");

        let mut request = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::single_user_message(&self.config.model, prompt));

        // Optional attribution headers understood by OpenRouter
        if let Some(site_url) = &self.config.site_url {
            request = request.header("HTTP-Referer", site_url);
        }
        if let Some(site_name) = &self.config.site_name {
            request = request.header("X-Title", site_name);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerateError::Transport(describe_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Transport(describe_error(&e)))?;

        if !status.is_success() {
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| GenerateError::Malformed(e.to_string()))?;

        if let Some(api_error) = parsed.error.as_ref().filter(|_| parsed.choices.is_empty()) {
            return Err(GenerateError::Api(api_error.message.clone()));
        }

        let content = parsed.first_content().ok_or(GenerateError::MissingContent)?;

        if content.trim().is_empty() {
            return Err(GenerateError::EmptyContent);
        }

        debug!(answer_chars = content.len(), "completion received");
        Ok(content)
    }
}

// Keeps error bodies short enough for one log line
fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
