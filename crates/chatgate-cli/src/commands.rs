//! Subcommand definitions.

use std::time::Duration;

use chatgate_core::{ConfigError, ProxyConfig};
use clap::{Args, Subcommand};

/// Available subcommands. Running without one is the same as `serve`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the proxy server
    Serve(ServeArgs),
    /// Acquire session credentials once and report the result
    Check(ServeArgs),
}

/// Overrides applied on top of the environment configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (0 picks a free port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Backend base URL
    #[arg(long = "backend-url")]
    pub backend_url: Option<String>,

    /// Seconds between session credential refreshes
    #[arg(long = "refresh-secs")]
    pub refresh_secs: Option<u64>,

    /// Timeout in seconds for backend calls (no timeout when unset)
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Backend model identifier
    #[arg(long)]
    pub model: Option<String>,
}

impl ServeArgs {
    /// Apply these overrides to `config` and re-validate it.
    pub fn apply(&self, mut config: ProxyConfig) -> Result<ProxyConfig, ConfigError> {
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(url) = &self.backend_url {
            config.backend_base_url.clone_from(url);
        }
        if let Some(secs) = self.refresh_secs {
            config.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(model) = &self.model {
            config.translation.model.clone_from(model);
        }
        config.validate()?;
        Ok(config)
    }
}
