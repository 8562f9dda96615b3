//! In-process mock of the Heartcore content delivery API
//!
//! Serves `/{project}/content/type/{content_type}` with a response the test
//! can swap at any time, and records every request it receives.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use heartcore::ClientConfig;
use tokio::sync::oneshot;

pub const PROJECT_ALIAS: &str = "test-project";
pub const API_KEY: &str = "test-key";

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub project: String,
    pub content_type: String,
    pub query: BTreeMap<String, String>,
    pub accept: Option<String>,
    pub project_alias_header: Option<String>,
    pub api_key_header: Option<String>,
}

#[derive(Debug)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockUpstream {
    addr: SocketAddr,
    state: Shared,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn content_handler(
    State(state): State<Shared>,
    Path((project, content_type)): Path<(String, String)>,
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        project,
        content_type,
        query,
        accept: header_value(&headers, "accept"),
        project_alias_header: header_value(&headers, "umb-project-alias"),
        api_key_header: header_value(&headers, "api-key"),
    });
    (state.status, state.body.clone())
}

impl MockUpstream {
    /// Starts the mock on a random local port, answering 200 with `body`
    pub async fn start(body: &str) -> Self {
        let state = Arc::new(Mutex::new(MockState {
            status: StatusCode::OK,
            body: body.to_string(),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/{project}/content/type/{content_type}", get(content_handler))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Mock upstream has no address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this mock with valid credentials
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(PROJECT_ALIAS, API_KEY).with_api_url(self.url())
    }

    /// Replaces the response served from now on
    pub fn respond(&self, status: StatusCode, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.status = status;
        state.body = body.to_string();
    }

    pub fn hits(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Builds an API response body wrapping the given records
pub fn embedded(records: serde_json::Value) -> String {
    serde_json::json!({ "_embedded": { "content": records } }).to_string()
}

/// Returns a local address that refuses connections
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);
    format!("http://{}", addr)
}
