//! The hosted OpenAPI document.
//!
//! Read from disk on every request so edits show up on reload.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio::fs;
use tracing::error;

use crate::ui::swagger::assets::{TEXT_MIME, mime_from_extension};

use super::AppState;

/// GET <spec route>
pub(super) async fn document(State(state): State<AppState>) -> Response {
    let Some(path) = state.spec_path.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match fs::read(path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, spec_mime(path))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!(path = %path.display(), "failed to read spec document: {e}");
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, TEXT_MIME)],
                "spec document not found\n",
            )
                .into_response()
        }
    }
}

/// Content type for the spec file; JSON when the extension says nothing.
fn spec_mime(path: &std::path::Path) -> &'static str {
    match mime_from_extension(path) {
        "application/octet-stream" => "application/json",
        known => known,
    }
}
