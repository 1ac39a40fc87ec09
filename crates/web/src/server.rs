//! Web server implementation

use crate::backend::DashboardBackend;
use crate::config::{LinkTargets, WebConfig};
use crate::dashboard::{Dashboard, Tab};
use crate::render;
use crate::static_files::StaticFiles;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use veritas_common::ui::FormData;
use veritas_common::{ApiClient, Database, LocalStorage, NewProject};

/// Web server state
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

struct WebServerState {
    /// The page session. One lock holder at a time, including across fetches.
    dashboard: Mutex<Dashboard>,
    links: LinkTargets,
    static_files: StaticFiles,
}

pub async fn serve(cfg: WebConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg.listen.parse()?;
    let server = WebServer::new(&cfg)?;
    server.serve(addr).await
}

impl WebServer {
    /// Create a new web server
    pub fn new(cfg: &WebConfig) -> anyhow::Result<Self> {
        cfg.validate()?;

        let client = ApiClient::new(cfg.registry()?);
        let backend = DashboardBackend::new(client, cfg.api_base_url.clone());

        let mut dashboard = Dashboard::new(backend);
        if let Some(storage) = open_storage(cfg) {
            dashboard = dashboard.with_storage(storage);
        }

        Ok(Self::from_parts(dashboard, cfg.link_targets()))
    }

    /// Wrap an already built session.
    pub fn from_parts(dashboard: Dashboard, links: LinkTargets) -> Self {
        Self {
            state: Arc::new(WebServerState {
                dashboard: Mutex::new(dashboard),
                links,
                static_files: StaticFiles::new(),
            }),
        }
    }

    /// Create router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/projects", post(create_project_handler))
            .route("/projects/new", get(open_form_handler))
            .route("/projects/cancel", get(close_form_handler))
            .route("/refresh", post(refresh_handler))
            .route("/health", get(health_handler))
            .route("/static/*path", get(static_handler))
            .fallback(not_found_handler)
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the web server
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("Veritas dashboard starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

/// Storage trouble never blocks startup; fall back to memory, then to none.
fn open_storage(cfg: &WebConfig) -> Option<LocalStorage> {
    let path = cfg.storage_path();
    match Database::open(&path) {
        Ok(db) => Some(LocalStorage::new(db)),
        Err(e) => {
            warn!("storage at {:?} unavailable ({}), using in-memory storage", path, e);
            match LocalStorage::ephemeral() {
                Ok(storage) => Some(storage),
                Err(e) => {
                    warn!("in-memory storage unavailable: {}", e);
                    None
                }
            }
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct IndexQuery {
    tab: Option<String>,
}

/// Finish a claimed fetch, if any, then render. The session lock is never
/// held across backend I/O.
async fn settle(state: &WebServerState, pending: Option<DashboardBackend>) -> Html<String> {
    if let Some(backend) = pending {
        let view = Dashboard::fetch(&backend).await;
        state.dashboard.lock().await.install(view);
    }
    let mut dash = state.dashboard.lock().await;
    Html(render::page(&mut dash, &state.links))
}

async fn index_handler(
    State(state): State<Arc<WebServerState>>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let pending = {
        let mut dash = state.dashboard.lock().await;
        if let Some(tab) = query.tab.as_deref() {
            match tab.parse::<Tab>() {
                Ok(tab) => dash.set_tab(tab),
                Err(e) => debug!("ignoring tab switch: {}", e),
            }
        }
        dash.begin_mount()
    };
    settle(&state, pending).await
}

async fn open_form_handler(State(state): State<Arc<WebServerState>>) -> Html<String> {
    let pending = {
        let mut dash = state.dashboard.lock().await;
        dash.set_tab(Tab::Projects);
        dash.open_create_form();
        dash.begin_mount()
    };
    settle(&state, pending).await
}

async fn close_form_handler(State(state): State<Arc<WebServerState>>) -> Html<String> {
    let pending = {
        let mut dash = state.dashboard.lock().await;
        dash.close_create_form();
        dash.begin_mount()
    };
    settle(&state, pending).await
}

fn new_project_from_form(form: &FormData) -> NewProject {
    NewProject {
        name: form.get("name").unwrap_or_default().to_string(),
        repository: form.get("repository").map(str::to_string),
        description: form.get("description").map(str::to_string),
    }
}

async fn create_project_handler(
    State(state): State<Arc<WebServerState>>,
    body: String,
) -> Html<String> {
    let form = FormData::parse(&body);

    let prepared = {
        let mut dash = state.dashboard.lock().await;
        dash.set_tab(Tab::Projects);
        match dash.prepare_create(new_project_from_form(&form)) {
            Ok(project) => Ok((dash.backend().clone(), project)),
            Err(e) => {
                debug!("project rejected: {}", e);
                Err(dash.begin_mount())
            }
        }
    };
    let (backend, project) = match prepared {
        Ok(ready) => ready,
        Err(pending) => return settle(&state, pending).await,
    };

    let pending = match backend.create_project(&project).await {
        Ok(()) => {
            let mut dash = state.dashboard.lock().await;
            dash.project_created(&project);
            Some(dash.begin_reload())
        }
        Err(e) => {
            error!("Error creating project: {}", e);
            state.dashboard.lock().await.begin_mount()
        }
    };
    settle(&state, pending).await
}

async fn refresh_handler(State(state): State<Arc<WebServerState>>) -> Html<String> {
    let pending = state.dashboard.lock().await.begin_reload();
    settle(&state, Some(pending)).await
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "veritas-web",
        "version": veritas_common::VERSION
    }))
}

async fn static_handler(
    State(state): State<Arc<WebServerState>>,
    Path(path): Path<String>,
) -> Response {
    state.static_files.serve(&path)
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
