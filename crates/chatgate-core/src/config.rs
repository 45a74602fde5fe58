//! Proxy configuration.
//!
//! **Environment variables:**
//! - `CHATGATE_HOST`: bind host (default: 127.0.0.1)
//! - `CHATGATE_PORT`: bind port (default: 8080)
//! - `CHATGATE_BACKEND_URL`: backend base URL (default: https://chat.openai.com)
//! - `CHATGATE_REFRESH_SECS`: credential refresh interval (default: 60)
//! - `CHATGATE_TIMEOUT_SECS`: upstream request timeout (default: none)
//! - `CHATGATE_MODEL`: backend model identifier
//! - `CHATGATE_TZ_OFFSET_MIN`: timezone offset sent to the backend (default: -180)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::translate::TranslationSettings;

/// Default port for the proxy.
pub const DEFAULT_PORT: u16 = 8080;

/// Default backend base URL.
pub const DEFAULT_BACKEND_URL: &str = "https://chat.openai.com";

/// Default credential refresh interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    /// The refresh interval must be non-zero.
    #[error("Refresh interval must be greater than zero")]
    ZeroRefreshInterval,
}

/// Configuration for the proxy server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to bind to (0 for auto-assign).
    pub port: u16,
    /// Base URL of the conversational backend, without trailing slash.
    pub backend_base_url: String,
    /// How often session credentials are re-acquired.
    pub refresh_interval: Duration,
    /// Optional timeout for outbound calls. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Fixed fields of every backend payload.
    pub translation: TranslationSettings,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
            translation: TranslationSettings::default(),
        }
    }
}

impl ProxyConfig {
    /// Build a config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("CHATGATE_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "CHATGATE_PORT")? {
            config.port = port;
        }
        if let Some(url) = lookup("CHATGATE_BACKEND_URL") {
            config.backend_base_url = url;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "CHATGATE_REFRESH_SECS")? {
            config.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "CHATGATE_TIMEOUT_SECS")? {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(model) = lookup("CHATGATE_MODEL") {
            config.translation.model = model;
        }
        if let Some(offset) = parse_var(&lookup, "CHATGATE_TZ_OFFSET_MIN")? {
            config.translation.timezone_offset_min = offset;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the type system does not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Backend base URL with any trailing slash removed.
    pub fn backend_base(&self) -> &str {
        self.backend_base_url.trim_end_matches('/')
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}
