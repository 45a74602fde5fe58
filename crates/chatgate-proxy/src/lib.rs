//! HTTP front door for chatgate.
//!
//! Accepts OpenAI-style chat-completion requests, translates them into the
//! backend's conversation payload and forwards them using session
//! credentials that a background task keeps fresh.

#![deny(unsafe_code)]

pub mod backend;
pub mod bootstrap;
pub mod cors;
pub mod error;
pub mod forward;
pub mod server;
pub mod session;

pub use bootstrap::{ProxyContext, bootstrap, run};
pub use error::ProxyError;
pub use forward::{ForwardError, ForwardingClient};
pub use server::{AppState, create_router, serve};
pub use session::{RefreshOutcome, SessionBootstrapper, SessionError};
