//! `chatgate check`: one credential refresh against the configured backend.

use anyhow::{Context, Result};
use chatgate_core::ProxyConfig;

/// Acquire credentials once and print the device id on success.
pub async fn execute(config: &ProxyConfig) -> Result<()> {
    let ctx = chatgate_proxy::bootstrap(config)?;

    let credentials = ctx
        .bootstrapper
        .refresh_credentials()
        .await
        .with_context(|| format!("Session bootstrap against {} failed", config.backend_base()))?;

    tracing::debug!(token_len = credentials.token.len(), "Received session token");
    println!("Session acquired (device id {})", credentials.device_id);
    Ok(())
}
