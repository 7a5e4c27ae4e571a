//! LLM client module
//!
//! Provides the completion client trait and the OpenAI-compatible
//! chat-completions implementation used for itinerary generation.

pub mod client;
mod error;
mod openai;

pub use client::PlannerClient;
pub use error::LlmError;
pub use openai::OpenAIClient;

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
}

/// The assistant's reply
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
}
