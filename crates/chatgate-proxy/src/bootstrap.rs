//! Proxy bootstrap - the composition root.
//!
//! Wires the shared HTTP client, credential store, session bootstrapper and
//! forwarding client together from a [`ProxyConfig`], and runs the refresh
//! loop alongside the server under a single cancellation token.

use anyhow::{Context, Result};
use chatgate_core::{CredentialStore, ProxyConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::backend::{BackendEndpoints, build_client};
use crate::forward::ForwardingClient;
use crate::server::{AppState, serve};
use crate::session::SessionBootstrapper;

/// All initialized services for one proxy instance.
#[derive(Debug)]
pub struct ProxyContext {
    /// Writes credentials; consumed by the refresh loop.
    pub bootstrapper: SessionBootstrapper,
    /// Reads credentials; shared by request handlers.
    pub forwarder: ForwardingClient,
    /// Store shared by the two above.
    pub store: CredentialStore,
}

/// Build the proxy services for `config`.
pub fn bootstrap(config: &ProxyConfig) -> Result<ProxyContext> {
    config.validate()?;

    let client = build_client(config.request_timeout).context("Failed to build HTTP client")?;
    let endpoints = BackendEndpoints::from_base(config.backend_base());
    let store = CredentialStore::new();

    info!(
        session_url = %endpoints.session_url,
        conversation_url = %endpoints.conversation_url,
        refresh_secs = config.refresh_interval.as_secs(),
        "Proxy bootstrap resolved backend endpoints"
    );

    let bootstrapper = SessionBootstrapper::new(
        client.clone(),
        &endpoints,
        store.clone(),
        config.refresh_interval,
    );
    let forwarder = ForwardingClient::new(client, &endpoints, store.clone());

    Ok(ProxyContext {
        bootstrapper,
        forwarder,
        store,
    })
}

/// Bind, start the refresh loop and serve until `cancel` is triggered.
///
/// The refresh loop is stopped and awaited before returning, whether the
/// server exits cleanly or with an error.
pub async fn run(config: ProxyConfig, cancel: CancellationToken) -> Result<()> {
    let ctx = bootstrap(&config)?;

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    let refresh = ctx.bootstrapper.spawn_refresh_loop(cancel.child_token());
    let state = AppState::new(ctx.forwarder, config.translation.clone());

    let result = serve(listener, state, cancel.clone()).await;

    cancel.cancel();
    if let Err(e) = refresh.await {
        warn!("Session refresh task ended abnormally: {e}");
    }

    result
}
