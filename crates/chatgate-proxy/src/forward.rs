//! Forwarding of translated payloads to the backend conversation endpoint.
//!
//! Successful bodies are relayed byte-for-byte; they are only parsed to
//! check that they are JSON.

use bytes::Bytes;
use chatgate_core::{ConversationPayload, CredentialStore};
use reqwest::Client;
use serde::de::IgnoredAny;
use thiserror::Error;
use tracing::{debug, error};

use crate::backend::{BackendEndpoints, DEVICE_ID_HEADER, SENTINEL_TOKEN_HEADER};

/// Errors from forwarding a payload to the backend.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// No session credentials have been acquired yet.
    #[error("Session credentials are not available yet")]
    NoCredentials,

    /// The backend could not be reached.
    #[error("Failed to reach backend: {0}")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API response status: {0}")]
    Status(u16),

    /// The response body could not be read.
    #[error("Failed to read backend response: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The response body is not JSON.
    #[error("Backend returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// Client for the backend conversation endpoint.
#[derive(Debug, Clone)]
pub struct ForwardingClient {
    client: Client,
    conversation_url: String,
    store: CredentialStore,
}

impl ForwardingClient {
    /// Create a forwarding client reading credentials from `store`.
    pub fn new(client: Client, endpoints: &BackendEndpoints, store: CredentialStore) -> Self {
        Self {
            client,
            conversation_url: endpoints.conversation_url.clone(),
            store,
        }
    }

    /// Send `payload` to the backend and return the raw response body.
    ///
    /// Credentials are read once, so the device id and token always come from
    /// the same refresh. Nothing is retried.
    pub async fn forward(&self, payload: &ConversationPayload) -> Result<Bytes, ForwardError> {
        let credentials = self.store.current().ok_or(ForwardError::NoCredentials)?;

        debug!(
            url = %self.conversation_url,
            turns = payload.messages.len(),
            device_id = %credentials.device_id,
            "Forwarding conversation"
        );

        let response = self
            .client
            .post(&self.conversation_url)
            .header(DEVICE_ID_HEADER, &credentials.device_id)
            .header(SENTINEL_TOKEN_HEADER, &credentials.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to connect to backend: {e}");
                ForwardError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ForwardError::ReadBody)?;
        serde_json::from_slice::<IgnoredAny>(&body).map_err(ForwardError::InvalidJson)?;

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgate_core::{ChatCompletionRequest, TranslationSettings, translate_fresh};

    #[test]
    fn test_status_error_message() {
        assert_eq!(
            ForwardError::Status(503).to_string(),
            "API response status: 503"
        );
    }

    #[tokio::test]
    async fn test_forward_without_credentials() {
        let client = ForwardingClient::new(
            Client::new(),
            &BackendEndpoints::from_base("http://127.0.0.1:1"),
            CredentialStore::new(),
        );
        let payload = translate_fresh(
            &ChatCompletionRequest { messages: vec![] },
            &TranslationSettings::default(),
        );

        let err = client.forward(&payload).await.unwrap_err();
        assert!(matches!(err, ForwardError::NoCredentials));
    }
}
