//! Cross-origin handling.
//!
//! Preflight requests get permissive CORS headers; any other `OPTIONS`
//! request only gets an `Allow` header.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ALLOW,
    CONTENT_TYPE, ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
const ALLOW_HEADER_VALUE: &str = "GET, POST, OPTIONS";
const MAX_AGE_SECS: &str = "86400";

/// Headers attached to preflight, chat and chat-error responses.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
    headers
}

/// Whether the request carries all three preflight headers.
pub fn is_preflight(headers: &HeaderMap) -> bool {
    headers.contains_key(ORIGIN)
        && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
        && headers.contains_key(ACCESS_CONTROL_REQUEST_HEADERS)
}

/// Respond to an `OPTIONS` request.
pub fn handle_options(headers: &HeaderMap) -> Response {
    if is_preflight(headers) {
        (
            StatusCode::NO_CONTENT,
            cors_headers(),
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        )
            .into_response()
    } else {
        (
            StatusCode::OK,
            [(ALLOW, HeaderValue::from_static(ALLOW_HEADER_VALUE))],
        )
            .into_response()
    }
}
