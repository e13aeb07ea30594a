//! Built-in page assets and content-type mapping.
//!
//! The bundle itself (`swagger-ui-bundle.js`, the standalone preset and the
//! stylesheet) is never embedded. The page loads it either from the mounted
//! dist directory (asset base `.`) or from a CDN.
//!
//! Without a dist directory nothing under the prefix except the index page and
//! `swagger-initializer.js` exists: `<prefix>/swagger-ui.css`,
//! `<prefix>/swagger-ui-bundle.js` and the preset answer 404, and the page
//! fetches those files from `cdn_base` instead.

use std::path::Path;

/// Default CDN location of `swagger-ui-dist`.
pub const DEFAULT_CDN_BASE: &str = "https://unpkg.com/swagger-ui-dist@5";

/// Placeholder for the asset base inside [`INDEX_HTML`].
const ASSET_BASE_TOKEN: &str = "{assets}";

pub const HTML_MIME: &str = "text/html; charset=utf-8";
pub const JS_MIME: &str = "application/javascript; charset=utf-8";
pub const CSS_MIME: &str = "text/css; charset=utf-8";
pub const TEXT_MIME: &str = "text/plain; charset=utf-8";

// ── Page ─────────────────────────────────────────────────────────────────────

// `{assets}` is the CDN base unless a dist dir is mounted; only then are the
// bundle files served locally.
const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>API Documentation</title>
  <link rel="stylesheet" type="text/css" href="{assets}/swagger-ui.css" />
  <style>
    html { box-sizing: border-box; overflow-y: scroll; }
    *, *::before, *::after { box-sizing: inherit; }
    body { margin: 0; background: #fafafa; }
  </style>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="{assets}/swagger-ui-bundle.js" charset="UTF-8"></script>
  <script src="{assets}/swagger-ui-standalone-preset.js" charset="UTF-8"></script>
  <script src="./swagger-initializer.js" charset="UTF-8"></script>
</body>
</html>
"#;

/// Render the index page with bundle assets resolved against `asset_base`.
///
/// A trailing `/` on the base is dropped.
pub fn index_html(asset_base: &str) -> String {
    INDEX_HTML.replace(ASSET_BASE_TOKEN, asset_base.trim_end_matches('/'))
}

// ── MIME ─────────────────────────────────────────────────────────────────────

/// Map a file extension to a MIME content-type string.
pub fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => HTML_MIME,
        Some("css") => CSS_MIME,
        Some("js" | "mjs") => JS_MIME,
        Some("json" | "map") => "application/json",
        Some("yaml" | "yml") => "application/yaml",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt" | "md") => TEXT_MIME,
        _ => "application/octet-stream",
    }
}
