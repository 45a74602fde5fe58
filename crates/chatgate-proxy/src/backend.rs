//! Backend endpoint layout and shared HTTP client construction.

use std::time::Duration;

use reqwest::Client;

/// Header carrying the device id on every backend call.
pub const DEVICE_ID_HEADER: &str = "oai-device-id";

/// Header carrying the session token on conversation calls.
pub const SENTINEL_TOKEN_HEADER: &str = "openai-sentinel-chat-requirements-token";

/// Path of the anonymous-session (chat requirements) endpoint.
pub const SESSION_PATH: &str = "/backend-anon/sentinel/chat-requirements";

/// Path of the conversation endpoint.
pub const CONVERSATION_PATH: &str = "/backend-api/conversation";

/// Resolved backend URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoints {
    pub session_url: String,
    pub conversation_url: String,
}

impl BackendEndpoints {
    /// Derive both endpoint URLs from a base URL such as `https://chat.openai.com`.
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            session_url: format!("{base}{SESSION_PATH}"),
            conversation_url: format!("{base}{CONVERSATION_PATH}"),
        }
    }
}

/// Build the HTTP client shared by the bootstrapper and the forwarding client.
///
/// Without a timeout, a call waits until the backend answers or the
/// connection fails.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().pool_max_idle_per_host(10);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
