//! Thin client for the upstream OpenAI-compatible chat-completions API.

pub mod api;
pub mod config;

pub use api::{ChatCompletionRequest, ChatCompletionResponse, OpenAiApi, OpenAiApiError};
pub use config::OpenAiConfig;
