//! Swagger UI backend.
//!
//! Serves the index page and the rendered `swagger-initializer.js` from
//! memory. Any other path is looked up in the configured dist directory, if
//! one exists; otherwise the page pulls the bundle from the CDN and those
//! paths fall through to a 404.

pub mod assets;
pub mod initializer;
pub mod options;

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::SwaggerUiConfig;
use crate::error::AppError;

use self::assets::{HTML_MIME, JS_MIME};
use self::initializer::{Initializer, contains_placeholder, render};
use self::options::UiOptions;

use super::{ServeResponse, UiServe};

pub const INITIALIZER_PATH: &str = "/swagger-initializer.js";

// ── Cached pages ─────────────────────────────────────────────────────────────

/// A page rendered at startup with a precomputed entity tag.
#[derive(Debug, Clone)]
struct CachedAsset {
    content_type: &'static str,
    body: Vec<u8>,
    etag: String,
}

impl CachedAsset {
    fn new(content_type: &'static str, body: Vec<u8>) -> Self {
        let etag = etag_for(&body);
        Self {
            content_type,
            body,
            etag,
        }
    }

    fn response(&self) -> ServeResponse {
        ServeResponse {
            etag: Some(self.etag.clone()),
            ..ServeResponse::ok(self.content_type, self.body.clone())
        }
    }
}

/// Strong entity tag: quoted hex SHA-256 of the body.
pub fn etag_for(body: &[u8]) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(body)))
}

// ── SwaggerUiBackend ─────────────────────────────────────────────────────────

pub struct SwaggerUiBackend {
    index: CachedAsset,
    initializer: CachedAsset,
    /// Resolved dist directory — `None` if not configured or missing.
    dist_dir: Option<PathBuf>,
}

impl SwaggerUiBackend {
    /// Validate the options, render both pages and resolve the dist directory.
    pub fn new(config: &SwaggerUiConfig) -> Result<Self, AppError> {
        let template = match &config.initializer_template {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    AppError::Template(format!("cannot read {}: {e}", path.display()))
                })?;
                if !contains_placeholder(&text) {
                    warn!(
                        path = %path.display(),
                        "swagger: initializer template has no {{config}} placeholder; serving it verbatim"
                    );
                }
                text
            }
            None => Initializer::default().template(),
        };

        let dist_dir = config.dist_dir.clone().filter(|p| p.is_dir());
        match (&config.dist_dir, &dist_dir) {
            (_, Some(dir)) => info!(dir = %dir.display(), "swagger: serving bundle from disk"),
            (Some(missing), None) => warn!(
                dir = %missing.display(),
                cdn = %config.cdn_base,
                "swagger: dist_dir is not a directory; falling back to CDN"
            ),
            (None, None) => info!(cdn = %config.cdn_base, "swagger: serving bundle from CDN"),
        }

        let asset_base = if dist_dir.is_some() { "." } else { config.cdn_base.as_str() };
        Self::from_parts(&config.options, &template, asset_base, dist_dir)
    }

    /// Build from already-resolved parts.
    pub fn from_parts(
        options: &UiOptions,
        template: &str,
        asset_base: &str,
        dist_dir: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        options.validate()?;
        let script = render(template, &options.to_json()?);
        debug!(bytes = script.len(), "swagger: initializer rendered");

        Ok(Self {
            index: CachedAsset::new(HTML_MIME, assets::index_html(asset_base).into_bytes()),
            initializer: CachedAsset::new(JS_MIME, script.into_bytes()),
            dist_dir,
        })
    }

    /// The rendered bootstrap script.
    pub fn initializer_script(&self) -> &str {
        // Built from `String`s in `from_parts`.
        std::str::from_utf8(&self.initializer.body).unwrap_or_default()
    }
}

impl UiServe for SwaggerUiBackend {
    fn serve(&self, path: &str) -> Option<ServeResponse> {
        if path.contains("..") {
            return Some(ServeResponse::bad_request());
        }

        match path {
            "" | "/" | "/index.html" => Some(self.index.response()),
            INITIALIZER_PATH => Some(self.initializer.response()),
            _ => {
                let root = self.dist_dir.as_deref()?;
                serve_static(root, path)
            }
        }
    }
}

// ── static file serving ──────────────────────────────────────────────────────

/// Serve a file from `root` for the given request `path`; `None` if absent.
fn serve_static(root: &Path, path: &str) -> Option<ServeResponse> {
    let file_path = root.join(path.trim_start_matches('/'));
    if !file_path.is_file() {
        debug!(path, "swagger: no such asset in dist dir");
        return None;
    }

    match fs::read(&file_path) {
        Ok(body) => Some(ServeResponse::ok(assets::mime_from_extension(&file_path), body)),
        Err(e) => {
            warn!(path = %file_path.display(), "swagger: failed to read file: {e}");
            Some(ServeResponse {
                status: "500 Internal Server Error",
                content_type: assets::TEXT_MIME,
                body: b"internal error\n".to_vec(),
                etag: None,
            })
        }
    }
}

/// Remainder of `path` below the mount `prefix`, or `None` if outside it.
///
/// `/docs` matches `/docs`, `/docs/` and `/docs/x`, but not `/docsx`.
/// An empty prefix matches everything.
pub fn strip_prefix<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}
