//! Upstream API configuration loaded from environment variables.

/// Default chat-completions base URL.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Default model for persona chat.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the upstream chat-completions API.
///
/// A missing `OPENAI_API_KEY` is not an error: the chat handler answers with
/// a canned demo response instead of calling upstream.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL of the chat-completions API (default:
    /// `https://api.openai.com/v1`). Overridable for self-hosted gateways
    /// and tests.
    pub api_url: String,
    /// Bearer token. `None` puts the proxy in demo mode.
    pub api_key: Option<String>,
    /// Model name sent with every request (default: `gpt-4o-mini`).
    pub model: String,
}

impl OpenAiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default                     |
    /// |------------------|-----------------------------|
    /// | `OPENAI_API_URL` | `https://api.openai.com/v1` |
    /// | `OPENAI_API_KEY` | unset (demo mode)           |
    /// | `OPENAI_MODEL`   | `gpt-4o-mini`               |
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            api_url,
            api_key,
            model,
        }
    }

    /// Whether an API key is configured. When `false`, the chat proxy serves
    /// demo responses without calling upstream.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
