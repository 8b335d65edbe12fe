//! System prompt assembly for the persona chat proxy.
//!
//! The prompt layout is fixed: an optional mode line, the persona framing,
//! a standing instruction to stay concise, and an optional block of
//! retrieved source snippets for grounding.

use crate::chat::{ChatMessage, DebateMode};
use crate::retrieval::{truncate_chars, RagSnippet, MAX_PROMPT_SNIPPETS, SNIPPET_PREVIEW_CHARS};

/// Fallback label for snippets that carry no source attribution.
const UNKNOWN_SOURCE_LABEL: &str = "source";

/// Build the system message for a persona conversation.
///
/// * `name`    - display name of the character (e.g. `"Charlie Kirk"`).
/// * `persona` - the persona system prompt describing tone and worldview.
/// * `mode`    - optional conversation mode, rendered as `Mode: {mode}.`
/// * `context` - retrieved snippets; at most [`MAX_PROMPT_SNIPPETS`] are
///   folded in, each previewed at [`SNIPPET_PREVIEW_CHARS`] characters.
pub fn build_system_message(
    name: &str,
    persona: &str,
    mode: Option<DebateMode>,
    context: &[RagSnippet],
) -> ChatMessage {
    let mode_line = mode
        .map(|m| format!("Mode: {}.", m.as_str()))
        .unwrap_or_default();

    let sources_block = build_sources_block(context);

    ChatMessage::system(format!(
        "{mode_line}\nYou are {name}. {persona}\nKeep replies concise; stay respectful and on-topic.{sources_block}"
    ))
}

/// Render the `SOURCES (for grounding)` block, or an empty string when there
/// is no usable context.
fn build_sources_block(context: &[RagSnippet]) -> String {
    let lines: Vec<String> = context
        .iter()
        .take(MAX_PROMPT_SNIPPETS)
        .map(|snippet| {
            let source = snippet.source.as_deref().unwrap_or(UNKNOWN_SOURCE_LABEL);
            let preview = truncate_chars(&snippet.content, SNIPPET_PREVIEW_CHARS);
            format!("- {source}: {preview}...")
        })
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        format!("\n\nSOURCES (for grounding)\n{}", lines.join("\n"))
    }
}
