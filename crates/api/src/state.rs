use std::sync::Arc;

use askcharlie_llm::{OpenAiApi, OpenAiConfig};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: askcharlie_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Upstream LLM configuration (model name, demo-mode flag).
    pub openai_config: Arc<OpenAiConfig>,
    /// Chat-completions client. `None` when no API key is configured, in
    /// which case the chat proxy answers with a demo response.
    pub openai_api: Option<Arc<OpenAiApi>>,
}

impl AppState {
    /// Build application state from the given pool and configs, constructing
    /// the upstream client only when an API key is present.
    pub fn new(pool: askcharlie_db::DbPool, config: ServerConfig, openai: OpenAiConfig) -> Self {
        let openai_api = openai
            .api_key
            .as_ref()
            .map(|key| Arc::new(OpenAiApi::new(openai.api_url.clone(), key.clone())));

        Self {
            pool,
            config: Arc::new(config),
            openai_config: Arc::new(openai),
            openai_api,
        }
    }
}
