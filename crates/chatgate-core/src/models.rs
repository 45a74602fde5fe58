//! Wire models for the inbound chat-completions API and the backend
//! conversation API.
//!
//! Inbound types follow the OpenAI request shape; only the fields the
//! translator needs are modelled, everything else in the request is ignored.

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound Chat Completion Types
// =============================================================================

/// Request to the `/v1/chat/completions` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Ordered chat history to send to the backend.
    pub messages: Vec<ChatMessage>,
}

/// Author role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

// =============================================================================
// Backend Conversation Types
// =============================================================================

/// Payload posted to the backend conversation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationPayload {
    /// Always `"next"`.
    pub action: String,
    pub messages: Vec<ConversationTurn>,
    pub parent_message_id: String,
    pub model: String,
    pub timezone_offset_min: i32,
    pub suggestions: Vec<String>,
    pub history_and_training_disabled: bool,
    pub conversation_mode: ConversationMode,
    pub websocket_request_id: String,
}

/// One chat message in the backend's representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub author: Author,
    pub content: TurnContent,
}

impl From<&ChatMessage> for ConversationTurn {
    fn from(message: &ChatMessage) -> Self {
        Self {
            author: Author { role: message.role },
            content: TurnContent::text(message.content.clone()),
        }
    }
}

/// Author of a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub role: Role,
}

/// Content block of a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContent {
    /// Always `"text"` for translated messages.
    pub content_type: String,
    pub parts: Vec<String>,
}

impl TurnContent {
    /// Single-part text content.
    pub fn text(part: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            parts: vec![part.into()],
        }
    }
}

/// Conversation mode selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMode {
    pub kind: String,
}

// =============================================================================
// Error Response Types
// =============================================================================

/// Error body returned to callers for every failure.
///
/// Serializes as `{"status":false,"error":{"message":...,"type":...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: bool,
    pub error: ErrorDetail,
}

/// Error detail within an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
}

impl ErrorEnvelope {
    /// Error type reported for every failure.
    pub const INVALID_REQUEST: &'static str = "invalid_request_error";

    /// Create an `invalid_request_error` envelope with the given message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: false,
            error: ErrorDetail {
                message: message.into(),
                r#type: Self::INVALID_REQUEST.to_string(),
            },
        }
    }

    /// Envelope returned for unknown routes.
    pub fn not_found() -> Self {
        Self::invalid_request("The requested endpoint was not found.")
    }
}
