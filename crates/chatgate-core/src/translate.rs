//! Translation from chat-completion requests to backend conversation payloads.

use serde_json::Value;
use thiserror::Error;

use crate::ids::new_uuid;
use crate::models::{ChatCompletionRequest, ConversationMode, ConversationPayload, ConversationTurn};

/// Model identifier sent to the backend unless configured otherwise.
pub const DEFAULT_MODEL: &str = "text-davinci-002-render-sha";

/// Timezone offset (minutes) sent to the backend unless configured otherwise.
pub const DEFAULT_TIMEZONE_OFFSET_MIN: i32 = -180;

/// Conversation mode sent to the backend unless configured otherwise.
pub const DEFAULT_CONVERSATION_MODE: &str = "primary_assistant";

/// Errors raised while reading an inbound request.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(serde_json::Error),

    /// `messages` is absent or not an array.
    #[error("Request body must contain a `messages` array")]
    MissingMessages,

    /// A message is missing `role`/`content` or has an unknown role.
    #[error("Invalid message: {0}")]
    InvalidMessage(serde_json::Error),
}

/// Fixed payload fields that are not derived from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSettings {
    pub model: String,
    pub timezone_offset_min: i32,
    pub conversation_mode: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timezone_offset_min: DEFAULT_TIMEZONE_OFFSET_MIN,
            conversation_mode: DEFAULT_CONVERSATION_MODE.to_string(),
        }
    }
}

/// Parse an inbound request body.
///
/// Only `messages` is inspected; other fields such as `model` or `stream`
/// are accepted and ignored.
pub fn parse_request(body: &[u8]) -> Result<ChatCompletionRequest, TranslateError> {
    let mut value: Value = serde_json::from_slice(body).map_err(TranslateError::InvalidJson)?;

    let messages = match value.get_mut("messages") {
        Some(messages) if messages.is_array() => messages.take(),
        _ => return Err(TranslateError::MissingMessages),
    };

    let messages = serde_json::from_value(messages).map_err(TranslateError::InvalidMessage)?;
    Ok(ChatCompletionRequest { messages })
}

/// Build the backend payload for `request`.
///
/// Pure apart from the two injected correlation identifiers: calling it twice
/// with the same arguments yields equal payloads.
pub fn translate(
    request: &ChatCompletionRequest,
    parent_message_id: String,
    websocket_request_id: String,
    settings: &TranslationSettings,
) -> ConversationPayload {
    ConversationPayload {
        action: "next".to_string(),
        messages: request.messages.iter().map(ConversationTurn::from).collect(),
        parent_message_id,
        model: settings.model.clone(),
        timezone_offset_min: settings.timezone_offset_min,
        suggestions: Vec::new(),
        history_and_training_disabled: true,
        conversation_mode: ConversationMode {
            kind: settings.conversation_mode.clone(),
        },
        websocket_request_id,
    }
}

/// [`translate`] with freshly generated correlation identifiers.
pub fn translate_fresh(
    request: &ChatCompletionRequest,
    settings: &TranslationSettings,
) -> ConversationPayload {
    translate(request, new_uuid(), new_uuid(), settings)
}
