//! REST client for an OpenAI-compatible chat-completions endpoint.
//!
//! Wraps `POST {base}/chat/completions` using [`reqwest`]. The client is
//! deliberately small: one request shape, one response shape, Bearer auth.

use askcharlie_core::chat::ChatMessage;
use serde::{Deserialize, Serialize};

/// HTTP client for a single chat-completions backend.
pub struct OpenAiApi {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// Body of a chat-completions request.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Full conversation, system message first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-reply completion token cap.
    pub max_tokens: u32,
}

/// Response returned by the chat-completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Candidate completions; the first one is the reply.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// A single completion candidate.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The assistant message produced for this candidate.
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or the empty string when the upstream
    /// returned no choices.
    pub fn first_text(&self) -> String {
        self.choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}

/// Errors from the chat-completions client.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status code.
    #[error("upstream API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl OpenAiApi {
    /// Create a new client.
    ///
    /// * `api_url` - Base URL, e.g. `https://api.openai.com/v1`.
    /// * `api_key` - Bearer token sent with every request.
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across services).
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Request a chat completion.
    ///
    /// Sends `POST {base}/chat/completions` with Bearer auth and returns
    /// the parsed response. Non-2xx statuses become
    /// [`OpenAiApiError::ApiError`] with the raw body preserved.
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiApiError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`OpenAiApiError::ApiError`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, OpenAiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OpenAiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OpenAiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_returns_first_choice_content() {
        let response = ChatCompletionResponse {
            choices: vec![ChatChoice {
                message: ChatMessage::assistant("Grace and peace."),
            }],
        };
        assert_eq!(response.first_text(), "Grace and peace.");
    }

    #[test]
    fn first_text_empty_when_no_choices() {
        let response = ChatCompletionResponse { choices: vec![] };
        assert_eq!(response.first_text(), "");
    }

    #[test]
    fn response_deserializes_without_choices_field() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());
    }
}
