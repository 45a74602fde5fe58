//! `chatgate serve`: run the proxy until Ctrl-C.

use anyhow::Result;
use chatgate_core::ProxyConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Run the proxy and shut it down gracefully on Ctrl-C.
pub async fn execute(config: ProxyConfig) -> Result<()> {
    let cancel = CancellationToken::new();

    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => warn!("Failed to listen for shutdown signal: {e}"),
        }
        signal_cancel.cancel();
    });

    chatgate_proxy::run(config, cancel).await
}
