//! In-process JSON-RPC Server
//!
//! A loopback axum server that answers JSON-RPC 2.0 requests (single and
//! batched) from a closure, so `SolanaRpcClient` can be exercised over real
//! HTTP without a ledger node.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use ledger_analytics::config::LedgerRpcConfig;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// `Ok(result)` or `Err((code, message))` for one method call
pub type Responder = dyn Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync;

pub struct FakeRpcState {
    responder: Box<Responder>,
    /// HTTP requests received, batches counting once
    pub http_requests: AtomicUsize,
    /// Every request body received, in arrival order
    pub bodies: Mutex<Vec<Value>>,
    /// Answer this many requests with 503 before behaving
    pub failures_remaining: AtomicUsize,
    /// Answer batches in reverse order
    pub reverse_batches: AtomicBool,
}

impl FakeRpcState {
    fn answer(&self, request: &Value) -> Value {
        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request.get("method").and_then(Value::as_str).unwrap_or("");
        let params = request.get("params").cloned().unwrap_or(Value::Null);

        match (self.responder)(method, &params) {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err((code, message)) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": code, "message": message },
            }),
        }
    }

    pub fn http_requests(&self) -> usize {
        self.http_requests.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.bodies.lock().unwrap().last().cloned()
    }
}

pub struct FakeRpcServer {
    pub url: String,
    pub state: Arc<FakeRpcState>,
    handle: JoinHandle<()>,
}

impl FakeRpcServer {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync + 'static,
    {
        let state = Arc::new(FakeRpcState {
            responder: Box::new(responder),
            http_requests: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
            failures_remaining: AtomicUsize::new(0),
            reverse_batches: AtomicBool::new(false),
        });

        let app = Router::new()
            .route("/", post(handle_rpc))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// Client settings pointing at this server with fast retries
    pub fn rpc_config(&self) -> LedgerRpcConfig {
        LedgerRpcConfig {
            url: self.url.clone(),
            commitment: "confirmed".to_string(),
            timeout_seconds: 5,
            max_retries: 3,
            initial_backoff_ms: 10,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 1,
        }
    }
}

impl Drop for FakeRpcServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_rpc(State(state): State<Arc<FakeRpcState>>, Json(body): Json<Value>) -> Response {
    state.http_requests.fetch_add(1, Ordering::SeqCst);
    state.bodies.lock().unwrap().push(body.clone());

    let failing = state
        .failures_remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let reply = match &body {
        Value::Array(requests) => {
            let mut replies: Vec<Value> = requests.iter().map(|r| state.answer(r)).collect();
            if state.reverse_batches.load(Ordering::SeqCst) {
                replies.reverse();
            }
            Value::Array(replies)
        }
        request => state.answer(request),
    };

    Json(reply).into_response()
}
