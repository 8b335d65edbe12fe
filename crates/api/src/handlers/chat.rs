//! Handler for the persona chat proxy (`POST /api/openai/chat`).
//!
//! Assembles the persona system prompt (with optional mode line and retrieved
//! source snippets), forwards the conversation to the upstream
//! chat-completions API, and returns the assistant's reply as `{ "text": ... }`.
//!
//! When no API key is configured the endpoint stays functional and answers
//! with a canned demo response, so front-end development does not require
//! upstream credentials.

use askcharlie_core::chat::{ChatMessage, DebateMode};
use askcharlie_core::prompt::build_system_message;
use askcharlie_core::retrieval::{truncate_chars, RagSnippet};
use askcharlie_llm::{ChatCompletionRequest, OpenAiApiError};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Sampling temperature for persona replies.
const CHAT_TEMPERATURE: f64 = 0.7;

/// Completion token cap per reply.
const CHAT_MAX_TOKENS: u32 = 300;

/// Maximum characters of an upstream error body echoed back to the client.
const UPSTREAM_DETAILS_CHARS: usize = 200;

/// Canned reply served when no upstream API key is configured.
const DEMO_RESPONSE: &str = "OpenAI not configured. (Demo mode response)";

/// Request body for `POST /api/openai/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatProxyRequest {
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub character_persona: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    /// Conversation mode name (`"Debate"` or `"Lecture"`). Unknown values
    /// are ignored rather than rejected.
    #[serde(default)]
    pub mode: Option<String>,
    /// Retrieved snippets for grounding. Entries may be bare strings or
    /// `{ content, source }` objects.
    #[serde(default)]
    pub rag_context: Option<Vec<RagContextEntry>>,
}

/// A grounding context entry as sent by the client.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RagContextEntry {
    Text(String),
    Snippet {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        source: Option<String>,
    },
}

impl RagContextEntry {
    fn into_snippet(self) -> RagSnippet {
        match self {
            RagContextEntry::Text(content) => RagSnippet {
                content,
                source: None,
                score: None,
            },
            RagContextEntry::Snippet { content, source } => RagSnippet {
                content: content.unwrap_or_default(),
                source,
                score: None,
            },
        }
    }
}

/// Response body: the assistant's reply text.
#[derive(Debug, Serialize)]
pub struct ChatProxyResponse {
    pub text: String,
}

/// POST /api/openai/chat
///
/// Proxy a persona conversation to the upstream chat-completions API.
pub async fn chat(
    State(state): State<AppState>,
    Json(input): Json<ChatProxyRequest>,
) -> AppResult<Json<ChatProxyResponse>> {
    let name = input.character_name.as_deref().unwrap_or("");
    let persona = input.character_persona.as_deref().unwrap_or("");

    let Some(messages) = input.messages else {
        return Err(missing_fields());
    };
    if name.is_empty() || persona.is_empty() {
        return Err(missing_fields());
    }

    // Demo mode: no upstream key configured.
    let Some(api) = &state.openai_api else {
        return Ok(Json(ChatProxyResponse {
            text: DEMO_RESPONSE.to_string(),
        }));
    };

    let mode = parse_mode(input.mode.as_deref());

    let context: Vec<RagSnippet> = input
        .rag_context
        .unwrap_or_default()
        .into_iter()
        .map(RagContextEntry::into_snippet)
        .collect();

    let system = build_system_message(name, persona, mode, &context);

    let mut conversation: Vec<ChatMessage> = Vec::with_capacity(messages.len() + 1);
    conversation.push(system);
    conversation.extend(messages);

    let request = ChatCompletionRequest {
        model: state.openai_config.model.clone(),
        messages: conversation,
        temperature: CHAT_TEMPERATURE,
        max_tokens: CHAT_MAX_TOKENS,
    };

    let response = api
        .create_chat_completion(&request)
        .await
        .map_err(map_upstream_error)?;

    Ok(Json(ChatProxyResponse {
        text: response.first_text(),
    }))
}

/// GET /api/openai/chat
///
/// Liveness probe kept for parity with the serverless deployment this
/// endpoint replaced.
pub async fn probe() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

fn missing_fields() -> AppError {
    AppError::BadRequest("Missing characterName, characterPersona or messages".to_string())
}

/// Map a known mode name to [`DebateMode`]. Unknown or empty values fall
/// back to no mode line.
fn parse_mode(mode: Option<&str>) -> Option<DebateMode> {
    match mode {
        Some("Debate") => Some(DebateMode::Debate),
        Some("Lecture") => Some(DebateMode::Lecture),
        _ => None,
    }
}

fn map_upstream_error(err: OpenAiApiError) -> AppError {
    match err {
        OpenAiApiError::ApiError { status, body } => {
            tracing::warn!(status, "Upstream chat-completions error");
            AppError::UpstreamError {
                status,
                details: truncate_chars(&body, UPSTREAM_DETAILS_CHARS).to_string(),
            }
        }
        OpenAiApiError::Request(e) => AppError::UpstreamUnreachable(e.to_string()),
    }
}
