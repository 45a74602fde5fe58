//! HTTP error mapping for the proxy.
//!
//! Every failure while handling a chat request becomes a 500 response with
//! the JSON error envelope and CORS headers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chatgate_core::{ErrorEnvelope, TranslateError};
use thiserror::Error;

use crate::cors::cors_headers;
use crate::forward::ForwardError;

/// Errors raised while serving a chat completion.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound request could not be read.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The backend call failed.
    #[error(transparent)]
    Forward(#[from] ForwardError),
}

impl ProxyError {
    /// Status code sent to the caller.
    pub const fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope::invalid_request(self.to_string());
        (self.status(), cors_headers(), Json(body)).into_response()
    }
}

/// 404 response for unknown routes.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorEnvelope::not_found())).into_response()
}
