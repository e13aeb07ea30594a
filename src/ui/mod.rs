//! UI layer — serves the documentation page and its assets.
//!
//! # Architecture
//!
//! The UI layer does **not** run tasks of its own. [`start`] builds a
//! [`UiServeHandle`], a trait object the HTTP server calls synchronously to
//! serve static assets or rendered pages. Rendering happens once, at
//! construction; `serve` only looks things up (or reads from the dist
//! directory on disk).
//!
//! The handle is shared through the router state. Nothing here is global.

pub mod swagger;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::AppError;

// ── UiServe trait ─────────────────────────────────────────────────────────────

/// Response returned by [`UiServe::serve`].
#[derive(Debug, Clone)]
pub struct ServeResponse {
    /// HTTP status line, e.g. `"200 OK"` or `"404 Not Found"`.
    pub status: &'static str,
    /// MIME content type, e.g. `"text/html; charset=utf-8"`.
    pub content_type: &'static str,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Quoted entity tag for conditional requests, when the body is stable.
    pub etag: Option<String>,
}

impl ServeResponse {
    pub fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            content_type,
            body,
            etag: None,
        }
    }

    pub fn bad_request() -> Self {
        Self {
            status: "400 Bad Request",
            content_type: swagger::assets::TEXT_MIME,
            body: b"bad request\n".to_vec(),
            etag: None,
        }
    }
}

/// A UI backend that can serve HTTP requests for static assets / pages.
///
/// Implementations capture their configuration at construction time.
/// [`UiServe::serve`] is called per-request and must not block on anything
/// slower than local file I/O.
pub trait UiServe: Send + Sync {
    /// Serve a request for `path`, relative to the mount prefix
    /// (e.g. `"/"`, `"/swagger-initializer.js"`, `"/swagger-ui.css"`).
    ///
    /// Returns `None` to let the caller fall through to its own 404.
    fn serve(&self, path: &str) -> Option<ServeResponse>;
}

/// Shared handle passed to the HTTP server.
pub type UiServeHandle = Arc<dyn UiServe>;

// ── start ─────────────────────────────────────────────────────────────────────

/// Build the Swagger UI backend and return its serve handle.
pub fn start(config: &Config) -> Result<UiServeHandle, AppError> {
    let backend = swagger::SwaggerUiBackend::new(&config.ui)?;
    info!(prefix = %display_prefix(&config.ui.prefix), "ui: swagger backend loaded");
    Ok(Arc::new(backend))
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() { "/" } else { prefix }
}
