//! Shared session credentials.
//!
//! The backend requires a device id and a session token that were issued
//! together. [`CredentialStore`] keeps the pair behind a single
//! `Arc<SessionCredentials>` so a reader always sees a matching pair: the
//! writer swaps the whole snapshot, never individual fields.

use std::sync::{Arc, PoisonError, RwLock};

/// Device id and session token issued together by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    /// Value sent in the `oai-device-id` header.
    pub device_id: String,
    /// Value sent in the sentinel token header.
    pub token: String,
}

impl SessionCredentials {
    pub fn new(device_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            token: token.into(),
        }
    }
}

/// Process-wide holder for the current [`SessionCredentials`].
///
/// Cheap to clone; all clones share the same slot. Empty until the first
/// successful bootstrap.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<Arc<SessionCredentials>>>>,
}

impl CredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current credentials, if any have been acquired.
    pub fn current(&self) -> Option<Arc<SessionCredentials>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the stored credentials in one step.
    pub fn replace(&self, credentials: SessionCredentials) {
        let next = Arc::new(credentials);
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(next);
    }

    /// Whether credentials have been acquired at least once.
    pub fn is_set(&self) -> bool {
        self.current().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = CredentialStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_set());
    }

    #[test]
    fn replace_swaps_both_fields() {
        let store = CredentialStore::new();
        store.replace(SessionCredentials::new("device-a", "token-a"));
        store.replace(SessionCredentials::new("device-b", "token-b"));

        let current = store.current().unwrap();
        assert_eq!(current.device_id, "device-b");
        assert_eq!(current.token, "token-b");
    }

    #[test]
    fn clones_share_state() {
        let store = CredentialStore::new();
        let reader = store.clone();
        store.replace(SessionCredentials::new("d", "t"));
        assert_eq!(reader.current().unwrap().token, "t");
    }

    #[test]
    fn snapshot_survives_replacement() {
        let store = CredentialStore::new();
        store.replace(SessionCredentials::new("old-device", "old-token"));
        let snapshot = store.current().unwrap();

        store.replace(SessionCredentials::new("new-device", "new-token"));

        assert_eq!(snapshot.device_id, "old-device");
        assert_eq!(snapshot.token, "old-token");
    }

    #[test]
    fn concurrent_readers_never_see_mixed_pairs() {
        let store = CredentialStore::new();
        store.replace(SessionCredentials::new("device-0", "token-0"));

        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 1..500 {
                    store.replace(SessionCredentials::new(
                        format!("device-{i}"),
                        format!("token-{i}"),
                    ));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let snap = store.current().unwrap();
                        let d = snap.device_id.trim_start_matches("device-");
                        let t = snap.token.trim_start_matches("token-");
                        assert_eq!(d, t);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
