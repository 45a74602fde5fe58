//! Core domain types for chatgate.
//!
//! This crate holds everything that does not touch the network: the
//! inbound and outbound wire models, the request translator, identifier
//! generation, the shared session credential holder and proxy
//! configuration. Adapters (`chatgate-proxy`, `chatgate-cli`) build on it.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod credentials;
pub mod ids;
pub mod models;
pub mod translate;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ProxyConfig};
pub use credentials::{CredentialStore, SessionCredentials};
pub use ids::{DEFAULT_COMPLETION_PREFIX, new_completion_id, new_uuid};
pub use models::{
    Author, ChatCompletionRequest, ChatMessage, ConversationMode, ConversationPayload,
    ConversationTurn, ErrorEnvelope, Role, TurnContent,
};
pub use translate::{TranslateError, TranslationSettings, parse_request, translate, translate_fresh};
