//! UI route handlers.
//!
//! Everything under the mount prefix is handed to the [`UiServe`] backend —
//! via [`tokio::task::spawn_blocking`], because dist-dir lookups do blocking
//! file I/O.
//!
//! [`UiServe`]: crate::ui::UiServe

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Response, StatusCode, Uri, header},
    response::{IntoResponse, Redirect},
};
use tracing::warn;

use crate::ui::swagger::strip_prefix;

use super::AppState;

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET / — send visitors to the mounted UI.
pub(super) async fn redirect_root(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&format!("{}/", state.prefix))
}

/// GET <prefix> — the page loads its assets relative to itself, so it must
/// be addressed with a trailing slash.
pub(super) async fn redirect_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(q) => format!("{}/?{q}", uri.path()),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

/// GET <prefix>/ and <prefix>/*path — delegate to the UI backend or 404.
pub(super) async fn serve_path(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> axum::response::Response {
    let Some(path) = strip_prefix(&state.prefix, uri.path()).map(ToString::to_string) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let ui = state.ui.clone();
    let result = tokio::task::spawn_blocking(move || ui.serve(&path)).await;
    let resp = match result {
        Ok(Some(resp)) => resp,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!(path = %uri.path(), "ui serve task failed: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Some(etag) = &resp.etag {
        if if_none_match(&headers, etag) {
            return Response::builder()
                .status(StatusCode::NOT_MODIFIED)
                .header(header::ETAG, etag.as_str())
                .body(Body::empty())
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
    }

    let mut builder = Response::builder()
        .status(parse_status_code(resp.status))
        .header(header::CONTENT_TYPE, resp.content_type);
    if let Some(etag) = &resp.etag {
        builder = builder
            .header(header::ETAG, etag.as_str())
            .header(header::CACHE_CONTROL, "no-cache");
    }
    builder
        .body(Body::from(resp.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse the status code out of a `"NNN Reason"` string (e.g. `"200 OK"`).
fn parse_status_code(s: &str) -> StatusCode {
    s.split_once(' ')
        .and_then(|(code, _)| code.parse::<u16>().ok())
        .and_then(|n| StatusCode::from_u16(n).ok())
        .unwrap_or(StatusCode::OK)
}

/// True when an `If-None-Match` header matches `etag` (or is `*`).
fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|tag| tag.trim().trim_start_matches("W/"))
        .any(|tag| tag == "*" || tag == etag)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn parse_status_ok() {
        assert_eq!(parse_status_code("200 OK"), StatusCode::OK);
    }

    #[test]
    fn parse_status_bad_request() {
        assert_eq!(parse_status_code("400 Bad Request"), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_status_invalid_falls_back_to_ok() {
        assert_eq!(parse_status_code("garbage"), StatusCode::OK);
    }

    #[test]
    fn if_none_match_variants() {
        let etag = "\"abc\"";
        let mut headers = HeaderMap::new();
        assert!(!if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"x\", W/\"abc\""));
        assert!(if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"other\""));
        assert!(!if_none_match(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("*"));
        assert!(if_none_match(&headers, etag));
    }
}
