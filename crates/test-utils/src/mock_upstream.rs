//! Mock GraphQL upstream for integration tests.
//!
//! Serves one canned response on every POST and records what it received, so
//! tests can check both what the adapter returned and what it sent.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Path the mock serves GraphQL on.
pub const GRAPHQL_PATH: &str = "/graphql";

/// A request the mock upstream received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Raw request body
    pub body: String,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

impl RecordedRequest {
    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("recorded body should be JSON")
    }
}

#[derive(Debug)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running mock upstream bound to an ephemeral localhost port.
///
/// The server task is aborted when this value is dropped.
#[derive(Debug)]
pub struct MockUpstream {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    /// Serves `body` with `200 OK` and a JSON content type.
    pub async fn json(body: &Value) -> Self {
        Self::start(StatusCode::OK, body.to_string()).await
    }

    /// Serves `body` verbatim with `status`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let state = Arc::new(MockState {
            status,
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(GRAPHQL_PATH, post(handle_graphql))
        .layer(DefaultBodyLimit::disable())
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Full GraphQL endpoint URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}{GRAPHQL_PATH}", self.addr)
    }

    /// Everything received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.state.requests.lock().await.len()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_graphql(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().await.push(RecordedRequest {
        body: String::from_utf8_lossy(&body).into_owned(),
        content_type: header_value(header::CONTENT_TYPE),
        user_agent: header_value(header::USER_AGENT),
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// A localhost URL nothing is listening on.
///
/// # Panics
///
/// Panics if no local port can be bound.
#[must_use]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}{GRAPHQL_PATH}")
}
