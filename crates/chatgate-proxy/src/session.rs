//! Session bootstrapping for the anonymous backend session.
//!
//! [`SessionBootstrapper`] acquires a device id and session token from the
//! backend's chat-requirements endpoint and stores them in the shared
//! [`CredentialStore`]. [`SessionBootstrapper::spawn_refresh_loop`] repeats
//! this on a fixed interval until cancelled.
//!
//! A failed refresh never stops the loop and never clears the store: the
//! previous credentials stay in place until a later attempt succeeds. Each
//! attempt's outcome is logged and published on a watch channel.

use std::time::Duration;

use chatgate_core::{CredentialStore, SessionCredentials, new_uuid};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::{BackendEndpoints, DEVICE_ID_HEADER};

/// Errors from a single credential refresh attempt.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session endpoint could not be reached.
    #[error("Failed to reach session endpoint: {0}")]
    Request(#[source] reqwest::Error),

    /// The session endpoint answered with a non-success status.
    #[error("Session endpoint returned status {0}")]
    Status(u16),

    /// The response body could not be read or lacks a `token` string.
    #[error("Malformed session response: {0}")]
    InvalidBody(String),
}

/// Result of one refresh attempt, as published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New credentials were stored.
    Refreshed { device_id: String },
    /// The attempt failed; stored credentials were left untouched.
    Failed { reason: String },
}

impl RefreshOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Refreshed { .. })
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequirements {
    token: String,
}

/// Maintains the shared session credentials.
#[derive(Debug)]
pub struct SessionBootstrapper {
    client: Client,
    session_url: String,
    store: CredentialStore,
    refresh_interval: Duration,
    outcome_tx: watch::Sender<Option<RefreshOutcome>>,
}

impl SessionBootstrapper {
    /// Create a bootstrapper writing into `store`.
    pub fn new(
        client: Client,
        endpoints: &BackendEndpoints,
        store: CredentialStore,
        refresh_interval: Duration,
    ) -> Self {
        let (outcome_tx, _) = watch::channel(None);
        Self {
            client,
            session_url: endpoints.session_url.clone(),
            store,
            refresh_interval,
            outcome_tx,
        }
    }

    /// The store this bootstrapper writes to.
    pub const fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Subscribe to refresh outcomes. The value is `None` until the first
    /// attempt completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<RefreshOutcome>> {
        self.outcome_tx.subscribe()
    }

    /// Acquire a fresh device id and token and store them together.
    ///
    /// On error the store is left unchanged.
    pub async fn refresh_credentials(&self) -> Result<SessionCredentials, SessionError> {
        let device_id = new_uuid();
        debug!(device_id = %device_id, url = %self.session_url, "Requesting session token");

        let response = self
            .client
            .get(&self.session_url)
            .header(DEVICE_ID_HEADER, &device_id)
            .header("accept", "*/*")
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(SessionError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SessionError::InvalidBody(e.to_string()))?;
        let requirements: ChatRequirements = serde_json::from_slice(&body)
            .map_err(|e| SessionError::InvalidBody(e.to_string()))?;

        let credentials = SessionCredentials::new(device_id, requirements.token);
        self.store.replace(credentials.clone());
        Ok(credentials)
    }

    /// Run one refresh attempt, log it and publish the outcome.
    pub async fn refresh_once(&self) -> RefreshOutcome {
        let outcome = match self.refresh_credentials().await {
            Ok(credentials) => {
                info!(device_id = %credentials.device_id, "Session credentials refreshed");
                RefreshOutcome::Refreshed {
                    device_id: credentials.device_id,
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    has_previous = self.store.is_set(),
                    "Session refresh failed; keeping previous credentials"
                );
                RefreshOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        self.outcome_tx.send_replace(Some(outcome.clone()));
        outcome
    }

    /// Spawn the periodic refresh task.
    ///
    /// The first attempt runs immediately, then one per interval regardless
    /// of earlier failures. The task ends when `cancel` is triggered, even
    /// mid-request.
    pub fn spawn_refresh_loop(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(self.refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                interval_secs = self.refresh_interval.as_secs_f64(),
                "Starting session refresh loop"
            );

            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = self.refresh_once() => {}
                }
            }

            debug!("Session refresh loop cancelled");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_success() {
        assert!(RefreshOutcome::Refreshed {
            device_id: "d".to_string()
        }
        .is_success());
        assert!(!RefreshOutcome::Failed {
            reason: "down".to_string()
        }
        .is_success());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SessionError::Status(403).to_string(),
            "Session endpoint returned status 403"
        );
        assert_eq!(
            SessionError::InvalidBody("missing field `token`".to_string()).to_string(),
            "Malformed session response: missing field `token`"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_keeps_credentials() {
        let store = CredentialStore::new();
        store.replace(SessionCredentials::new("old-device", "old-token"));

        // Port 1 is reserved and refuses connections.
        let endpoints = BackendEndpoints::from_base("http://127.0.0.1:1");
        let bootstrapper = SessionBootstrapper::new(
            Client::new(),
            &endpoints,
            store.clone(),
            Duration::from_secs(60),
        );

        let outcome = bootstrapper.refresh_once().await;
        assert!(!outcome.is_success());
        assert_eq!(
            *store.current().unwrap(),
            SessionCredentials::new("old-device", "old-token")
        );
        assert_eq!(*bootstrapper.subscribe().borrow(), Some(outcome));
    }

    #[tokio::test]
    async fn test_refresh_loop_stops_on_cancel() {
        let endpoints = BackendEndpoints::from_base("http://127.0.0.1:1");
        let bootstrapper = SessionBootstrapper::new(
            Client::new(),
            &endpoints,
            CredentialStore::new(),
            Duration::from_millis(20),
        );
        let mut outcomes = bootstrapper.subscribe();
        let cancel = CancellationToken::new();
        let handle = bootstrapper.spawn_refresh_loop(cancel.clone());

        // Two failed attempts prove the loop survives failures.
        for _ in 0..2 {
            outcomes.changed().await.unwrap();
            let outcome = outcomes.borrow_and_update().clone();
            assert!(matches!(outcome, Some(RefreshOutcome::Failed { .. })));
        }

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresh loop did not stop")
            .expect("refresh loop panicked");
    }
}
