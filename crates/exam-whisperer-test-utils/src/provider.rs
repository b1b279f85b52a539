//! In-process chat-completion provider for HTTP-level client tests.

use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned reply served for every request.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
}

impl MockReply {
    /// Successful completion whose first choice carries `content`.
    pub fn content(content: impl Into<String>) -> Self {
        let body = json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content.into() },
                "finish_reason": "stop"
            }]
        });
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with an arbitrary body.
    pub fn raw(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }
}

/// One request received by the mock.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

struct MockState {
    reply: Mutex<MockReply>,
    requests: Mutex<Vec<MockRequest>>,
}

/// Chat-completion endpoint served on an ephemeral local port.
pub struct MockProvider {
    endpoint: String,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockProvider {
    pub async fn start(reply: MockReply) -> std::io::Result<Self> {
        let state = Arc::new(MockState {
            reply: Mutex::new(reply),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            endpoint: format!("http://{addr}/v1/chat/completions"),
            state,
            task,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_reply(&self, reply: MockReply) {
        *self.state.reply.lock() = reply;
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.state.requests.lock().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
    state.requests.lock().push(MockRequest {
        authorization,
        body,
    });
    let reply = state.reply.lock().clone();
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(CONTENT_TYPE, "application/json")], reply.body)
}
