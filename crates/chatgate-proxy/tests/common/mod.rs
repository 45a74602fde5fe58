//! In-process fake of the conversational backend.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;

/// A request received by the fake backend.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Canned response served by one fake endpoint.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: r#"{"detail":"unavailable"}"#.to_string(),
        }
    }
}

#[derive(Clone, Default)]
struct FakeState {
    session: Arc<Mutex<Option<Canned>>>,
    conversation: Arc<Mutex<Option<Canned>>>,
    session_calls: Arc<Mutex<Vec<Captured>>>,
    conversation_calls: Arc<Mutex<Vec<Captured>>>,
}

/// Handle to a running fake backend.
pub struct FakeBackend {
    pub addr: SocketAddr,
    state: FakeState,
}

impl FakeBackend {
    /// Start a fake backend on an ephemeral port.
    pub async fn start(session: Canned, conversation: Canned) -> Self {
        let state = FakeState::default();
        *state.session.lock().unwrap() = Some(session);
        *state.conversation.lock().unwrap() = Some(conversation);

        let app = Router::new()
            .route("/backend-anon/sentinel/chat-requirements", get(session_handler))
            .route("/backend-api/conversation", post(conversation_handler))
            .layer(DefaultBodyLimit::disable())
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_session(&self, canned: Canned) {
        *self.state.session.lock().unwrap() = Some(canned);
    }

    pub fn session_calls(&self) -> Vec<Captured> {
        self.state.session_calls.lock().unwrap().clone()
    }

    pub fn conversation_calls(&self) -> Vec<Captured> {
        self.state.conversation_calls.lock().unwrap().clone()
    }
}

fn respond(canned: Option<Canned>) -> Response {
    match canned {
        Some(c) => (
            c.status,
            [("content-type", "application/json")],
            c.body,
        )
            .into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn session_handler(State(state): State<FakeState>, headers: HeaderMap) -> Response {
    state.session_calls.lock().unwrap().push(Captured {
        headers,
        body: Bytes::new(),
    });
    respond(state.session.lock().unwrap().clone())
}

async fn conversation_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state
        .conversation_calls
        .lock()
        .unwrap()
        .push(Captured { headers, body });
    respond(state.conversation.lock().unwrap().clone())
}
