//! Local stand-in for the analysis service, bound to an ephemeral port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use guided_report_models::HealthStatus;
use serde_json::Value;

type Responder = dyn Fn(usize) -> (StatusCode, String) + Send + Sync;

/// One request seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub content_type: Option<String>,
    pub body: Value,
}

struct StubState {
    hits: AtomicUsize,
    recorded: Mutex<Vec<Recorded>>,
    delay: Duration,
    responder: Box<Responder>,
}

pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Serve `/analyze`, answering call `n` (1-based) with `responder(n)`
    /// after `delay`.
    pub async fn spawn<F>(delay: Duration, responder: F) -> Self
    where
        F: Fn(usize) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let state = Arc::new(StubState {
            hits: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
            delay,
            responder: Box::new(responder),
        });

        let app = Router::new()
            .route("/analyze", post(analyze))
            .route("/health", get(|| async { Json(HealthStatus::ok()) }))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Always answer 200 with `{"analysis": <text>}`.
    pub async fn analysis(text: &str) -> Self {
        let body = serde_json::json!({ "analysis": text }).to_string();
        Self::spawn(Duration::ZERO, move |_| (StatusCode::OK, body.clone())).await
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }
}

async fn analyze(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let n = state.hits.fetch_add(1, Ordering::SeqCst) + 1;
    state.recorded.lock().unwrap().push(Recorded {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let (status, body) = (state.responder)(n);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// An address nothing listens on.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
