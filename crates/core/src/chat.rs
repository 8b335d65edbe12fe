//! Chat conversation types shared between the proxy handler and the LLM client.

use serde::{Deserialize, Serialize};

/// Role of a single chat message in the OpenAI wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message in a conversation, in OpenAI chat-completions format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation mode driving the persona's tone.
///
/// - `Debate`: adversarial, challenges the user's positions.
/// - `Lecture`: explanatory, educates without confrontation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebateMode {
    Debate,
    Lecture,
}

impl DebateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateMode::Debate => "Debate",
            DebateMode::Lecture => "Lecture",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_role_serializes_lowercase() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn chat_message_round_trips_from_wire_format() {
        let msg: ChatMessage =
            serde_json::from_value(serde_json::json!({"role": "user", "content": "hello"}))
                .unwrap();
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn debate_mode_names() {
        assert_eq!(DebateMode::Debate.as_str(), "Debate");
        assert_eq!(DebateMode::Lecture.as_str(), "Lecture");
    }
}
