//! Axum HTTP server — hosts the Swagger UI under its prefix and the OpenAPI
//! document under its own route.
//!
//! `run()` drives the axum event loop; the [`CancellationToken`] is wired to
//! axum's graceful shutdown.
//!
//! ## URL layout (default prefix `/docs`)
//!
//! ```text
//! GET  /health                 → "ok"
//! GET  /openapi.json           → spec document (only when spec.path is set)
//! GET  /                       → 307 to /docs/
//! GET  /docs                   → 308 to /docs/
//! GET  /docs/                  → index page
//! GET  /docs/*path             → initializer script, dist assets, or 404
//! ```
//!
//! With an empty prefix the UI owns `/` and every unmatched path.

mod spec;
mod ui;

use std::path::Path;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, HEALTH_ROUTE};
use crate::error::AppError;
use crate::ui::UiServeHandle;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — all fields are reference-counted.
#[derive(Clone)]
pub(crate) struct AppState {
    /// UI backend; the one handle to the rendered page.
    pub ui: UiServeHandle,
    /// Normalised mount prefix (`""` for root).
    pub prefix: Arc<str>,
    /// The hosted OpenAPI document, if any.
    pub spec_path: Option<Arc<Path>>,
}

// ── Server ────────────────────────────────────────────────────────────────────

pub struct Server {
    bind_addr: String,
    router: Router,
}

impl Server {
    /// Build the UI backend and router from `config`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            bind_addr: config.server.bind.clone(),
            router: router(config)?,
        })
    }

    /// Serve until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), AppError> {
        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| AppError::Serve(format!("bind failed on {}: {e}", self.bind_addr)))?;

        let local = listener
            .local_addr()
            .map_or_else(|_| self.bind_addr.clone(), |a| a.to_string());
        info!(bind_addr = %local, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| AppError::Serve(format!("server error: {e}")))?;

        info!("server shut down");
        Ok(())
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the complete router for `config`, including the UI backend.
pub fn router(config: &Config) -> Result<Router, AppError> {
    let state = AppState {
        ui: crate::ui::start(config)?,
        prefix: Arc::from(config.ui.prefix.as_str()),
        spec_path: config.spec.path.as_deref().map(Arc::from),
    };
    if let Some(path) = &state.spec_path {
        info!(route = %config.spec.route, path = %path.display(), "hosting spec document");
    }
    Ok(build_router(state, &config.spec.route))
}

fn build_router(state: AppState, spec_route: &str) -> Router {
    let mut router = Router::new().route(HEALTH_ROUTE, get(|| async { "ok" }));

    if state.spec_path.is_some() {
        router = router.route(spec_route, get(spec::document));
    }

    let prefix = state.prefix.to_string();
    router = if prefix.is_empty() {
        router
            .route("/", get(ui::serve_path))
            .route("/{*path}", get(ui::serve_path))
    } else {
        router
            .route("/", get(ui::redirect_root))
            .route(&prefix, get(ui::redirect_slash))
            .route(&format!("{prefix}/"), get(ui::serve_path))
            .route(&format!("{prefix}/{{*path}}"), get(ui::serve_path))
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
