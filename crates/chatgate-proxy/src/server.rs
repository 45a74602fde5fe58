//! Axum HTTP server for the translation proxy.
//!
//! Routes:
//! - `POST /v1/chat/completions`: translate, forward, relay
//! - `OPTIONS *`: CORS preflight
//! - anything else: 404 envelope

use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use chatgate_core::{
    DEFAULT_COMPLETION_PREFIX, TranslationSettings, new_completion_id, parse_request,
    translate_fresh,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::cors::{cors_headers, handle_options};
use crate::error::{ProxyError, not_found};
use crate::forward::ForwardingClient;

/// Path of the only forwarding route.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Shared application state for the proxy server.
#[derive(Clone)]
pub struct AppState {
    /// Client for the backend conversation endpoint.
    forwarder: Arc<ForwardingClient>,
    /// Fixed fields of every backend payload.
    translation: Arc<TranslationSettings>,
}

impl AppState {
    pub fn new(forwarder: ForwardingClient, translation: TranslationSettings) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
            translation: Arc::new(translation),
        }
    }
}

/// Build the proxy router.
///
/// Request bodies are unbounded: chat histories of any size are forwarded.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            CHAT_COMPLETIONS_PATH,
            post(chat_completions).options(options).fallback(fallback),
        )
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Run the proxy server on a pre-bound listener until `cancel` is triggered.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Proxy listening on {addr}");
    info!("Configure clients to use: http://{addr}/v1");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("Proxy server shut down");
    Ok(())
}

async fn options(headers: HeaderMap) -> Response {
    handle_options(&headers)
}

/// Catch-all: `OPTIONS` gets CORS handling, everything else is 404.
async fn fallback(method: Method, headers: HeaderMap) -> Response {
    if method == Method::OPTIONS {
        return handle_options(&headers);
    }
    debug!(%method, "No route matched");
    not_found()
}

/// Handle chat completions - translate and relay to the backend.
async fn chat_completions(State(state): State<AppState>, body: Bytes) -> Response {
    let completion_id = new_completion_id(DEFAULT_COMPLETION_PREFIX);
    let span = info_span!("chat_completion", %completion_id);

    async move {
        debug!(bytes = body.len(), "POST {CHAT_COMPLETIONS_PATH}");

        match relay(&state, &body).await {
            Ok(upstream) => (
                StatusCode::OK,
                cors_headers(),
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                upstream,
            )
                .into_response(),
            Err(e) => {
                warn!(error = %e, "Chat completion failed");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn relay(state: &AppState, body: &[u8]) -> Result<Bytes, ProxyError> {
    let request = parse_request(body)?;
    let payload = translate_fresh(&request, &state.translation);
    info!(turns = payload.messages.len(), "Processing chat completion request");

    Ok(state.forwarder.forward(&payload).await?)
}
