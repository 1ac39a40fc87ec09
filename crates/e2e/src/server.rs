//! In-process mock of the Veritas backend
//!
//! Serves `/api/projects`, `/api/analytics/dashboard` and a generic echo
//! surface under `/svc/...`, recording every request it sees.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

/// One request as the mock received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    projects: Mutex<Vec<Value>>,
    analytics: Mutex<Value>,
    failures: Mutex<HashMap<(String, String), u16>>,
    stalls: Mutex<HashSet<(String, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Handle to a running mock backend; stops when dropped.
pub struct MockBackend {
    pub base_url: String,
    pub addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Bind an ephemeral port on loopback and start serving.
    pub async fn start() -> E2eResult<Self> {
        let state = Arc::new(MockState {
            analytics: Mutex::new(json!({})),
            ..Default::default()
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| E2eError::ServerStartup(format!("bind 127.0.0.1:0: {}", e)))?;
        let addr = listener.local_addr()?;
        let router = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("mock backend stopped: {}", e);
            }
        });

        let base_url = format!("http://{}", addr);
        info!("Mock backend listening on {}", base_url);
        Ok(Self {
            base_url,
            addr,
            state,
            task,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL of the generic echo surface, for service registry entries.
    pub fn service_url(&self) -> String {
        format!("{}/svc", self.base_url)
    }

    pub fn set_projects(&self, projects: Vec<Value>) {
        *self.state.projects.lock() = projects;
    }

    pub fn set_analytics(&self, analytics: Value) {
        *self.state.analytics.lock() = analytics;
    }

    /// Answer `method path` with `status` and an error body from now on.
    pub fn fail(&self, method: &str, path: &str, status: u16) {
        self.state
            .failures
            .lock()
            .insert((method.to_string(), path.to_string()), status);
    }

    /// Accept `method path` but never answer it.
    pub fn stall(&self, method: &str, path: &str) {
        self.state
            .stalls
            .lock()
            .insert((method.to_string(), path.to_string()));
    }

    pub fn clear_failures(&self) {
        self.state.failures.lock().clear();
        self.state.stalls.lock().clear();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// `"METHOD /path"` for every request, in arrival order.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn reset_requests(&self) {
        self.state.requests.lock().clear();
    }

    pub fn expect_count(&self, method: &str, path: &str, expected: usize) -> E2eResult<()> {
        let got = self.count(method, path);
        if got == expected {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "expected {} x {} {}, saw {} (log: {:?})",
                expected,
                method,
                path,
                got,
                self.request_lines()
            )))
        }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body_json: Option<Value> = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    state.requests.lock().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body_json.clone(),
    });
    debug!("mock backend: {} {}", method, path);

    let key = (method.to_string(), path.clone());
    if state.stalls.lock().contains(&key) {
        debug!("mock backend: stalling {} {}", method, path);
        std::future::pending::<()>().await;
    }

    let failure = state
        .failures
        .lock()
        .get(&key)
        .copied();
    if let Some(status) = failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({"error": "injected failure"}))).into_response();
    }

    match (method.as_str(), path.as_str()) {
        ("GET", "/api/projects") => Json(Value::Array(state.projects.lock().clone())).into_response(),
        ("POST", "/api/projects") => create_project(&state, body_json),
        ("GET", "/api/analytics/dashboard") => Json(state.analytics.lock().clone()).into_response(),
        ("GET", "/svc/not-json") => (StatusCode::OK, "<html>oops</html>").into_response(),
        (_, "/svc/empty") => StatusCode::NO_CONTENT.into_response(),
        (_, p) if p.starts_with("/svc/") => Json(json!({
            "method": method.as_str(),
            "path": p,
            "body": body_json,
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response(),
    }
}

fn create_project(state: &MockState, body: Option<Value>) -> Response {
    let Some(name) = body
        .as_ref()
        .and_then(|b| b.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
    else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "name is required"}))).into_response();
    };

    let mut projects = state.projects.lock();
    let field = |key: &str| body.as_ref().and_then(|b| b.get(key)).cloned().unwrap_or(Value::Null);
    let project = json!({
        "id": (projects.len() + 1).to_string(),
        "name": name,
        "repository": field("repository"),
        "description": field("description"),
        "status": "active",
        "created_at": chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    });
    projects.insert(0, project.clone());
    (StatusCode::CREATED, Json(project)).into_response()
}
