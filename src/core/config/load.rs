//! Configuration loading with overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains, and
//! applies env / CLI overrides on top.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;
use crate::logger;
use crate::ui::swagger::options::{DEFAULT_DOM_ID, STANDALONE_LAYOUT, UiOptions};

use super::raw::{RawConfig, RawUiOptions};
use super::types::*;

/// Deep-merge two TOML values.
/// Tables are merged recursively; for every other type the overlay value
/// replaces the base value wholesale.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow any `[meta] base = "..."` chain, and return the
/// fully merged `toml::Value`. `visited` carries canonicalized paths already
/// seen in this chain so circular references are caught early.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay_val: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    if let Some(base_str) = overlay_val
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
    {
        let base_path = if Path::new(base_str).is_absolute() {
            PathBuf::from(base_str)
        } else {
            path.parent().unwrap_or(Path::new(".")).join(base_str)
        };
        let base_val = load_raw_merged(&base_path, visited)?;
        Ok(merge_toml(base_val, overlay_val))
    } else {
        Ok(overlay_val)
    }
}

/// Load config from the given path, or `config/default.toml`, then apply overrides.
/// If no path is given and `config/default.toml` does not exist, built-in defaults are used.
pub fn load(config_path: Option<&str>, overrides: &Overrides) -> Result<Config, AppError> {
    if let Some(path) = config_path {
        return load_from(Path::new(path), overrides);
    }

    let default_path = Path::new("config/default.toml");
    if default_path.exists() {
        load_from(default_path, overrides)
    } else {
        resolve(RawConfig::default(), overrides)
    }
}

/// Internal loader — accepts an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, overrides: &Overrides) -> Result<Config, AppError> {
    let merged_val = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged_val).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    resolve(parsed, overrides)
}

fn resolve(parsed: RawConfig, overrides: &Overrides) -> Result<Config, AppError> {
    let bind = overrides.bind.clone().unwrap_or(parsed.server.bind);
    let log_level = overrides.log_level.clone().unwrap_or(parsed.server.log_level);
    // Directive syntax (`target=level,...`) is left to EnvFilter.
    if !log_level.contains('=') {
        logger::parse_level(&log_level)
            .map_err(|_| AppError::Config(format!("server.log_level '{log_level}' is not a log level")))?;
    }

    let spec_path = overrides
        .spec_path
        .as_deref()
        .or(parsed.spec.path.as_deref())
        .map(expand_home);
    if let Some(p) = &spec_path {
        if !p.is_file() {
            return Err(AppError::Config(format!(
                "spec.path {} is not a readable file",
                p.display()
            )));
        }
    }

    let prefix = normalize_prefix(&parsed.ui.prefix);
    check_literal_path("ui.prefix", &prefix)?;
    if prefix == HEALTH_ROUTE {
        return Err(AppError::Config(format!(
            "ui.prefix {prefix} collides with a built-in route"
        )));
    }

    let spec_route = parsed.spec.route;
    check_literal_path("spec.route", &spec_route)?;
    if !spec_route.starts_with('/') {
        return Err(AppError::Config(format!(
            "spec.route must start with '/': {spec_route}"
        )));
    }
    if spec_route == HEALTH_ROUTE || spec_route == "/" || spec_route.trim_end_matches('/') == prefix {
        return Err(AppError::Config(format!(
            "spec.route {spec_route} collides with a built-in route"
        )));
    }

    let mut options = resolve_options(parsed.ui.options);
    if spec_path.is_some() && !options.has_source() {
        options.url = Some(spec_route.clone());
    }

    Ok(Config {
        log_level,
        server: ServerConfig { bind },
        spec: SpecConfig {
            path: spec_path,
            route: spec_route,
        },
        ui: SwaggerUiConfig {
            prefix,
            dist_dir: parsed.ui.dist_dir.as_deref().map(expand_home),
            cdn_base: parsed.ui.cdn_base,
            initializer_template: parsed.ui.initializer_template.as_deref().map(expand_home),
            options,
        },
    })
}

fn resolve_options(raw: RawUiOptions) -> UiOptions {
    UiOptions {
        config_url: raw.config_url,
        dom_id: Some(raw.dom_id.unwrap_or_else(|| DEFAULT_DOM_ID.to_string())),
        url: raw.url,
        urls: raw.urls,
        urls_primary_name: raw.urls_primary_name,
        query_config_enabled: raw.query_config_enabled,
        deep_linking: Some(raw.deep_linking.unwrap_or(true)),
        display_operation_id: raw.display_operation_id,
        default_models_expand_depth: raw.default_models_expand_depth,
        default_model_expand_depth: raw.default_model_expand_depth,
        default_model_rendering: raw.default_model_rendering,
        display_request_duration: raw.display_request_duration,
        doc_expansion: raw.doc_expansion,
        filter: raw.filter,
        max_displayed_tags: raw.max_displayed_tags,
        show_extensions: raw.show_extensions,
        show_common_extensions: raw.show_common_extensions,
        try_it_out_enabled: raw.try_it_out_enabled,
        request_snippets_enabled: raw.request_snippets_enabled,
        oauth2_redirect_url: raw.oauth2_redirect_url,
        show_mutated_request: raw.show_mutated_request,
        supported_submit_methods: raw.supported_submit_methods,
        validator_url: raw.validator_url,
        with_credentials: raw.with_credentials,
        persist_authorization: raw.persist_authorization,
        layout: raw.layout.unwrap_or_else(|| STANDALONE_LAYOUT.to_string()),
    }
}

/// Routes are registered verbatim; braces would be read as captures.
fn check_literal_path(key: &str, path: &str) -> Result<(), AppError> {
    if path.contains(['{', '}']) {
        return Err(AppError::Config(format!(
            "{key} must be a literal path without '{{' or '}}': {path}"
        )));
    }
    Ok(())
}

/// Normalise a mount prefix: leading `/`, no trailing `/`, `""` for root.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::swagger::options::DocExpansion;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    fn spec_file() -> NamedTempFile {
        write_toml(r#"{"openapi":"3.0.0","info":{"title":"t","version":"1"},"paths":{}}"#)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.ui.prefix, "/docs");
        assert_eq!(cfg.spec.route, "/openapi.json");
        assert!(cfg.spec.path.is_none());
        assert_eq!(cfg.ui.options, UiOptions::default());
    }

    #[test]
    fn parses_ui_options() {
        let f = write_toml(
            r#"
[ui]
prefix = "api-docs/"

[ui.options]
doc_expansion = "none"
filter = true
urls_primary_name = "v2"

[[ui.options.urls]]
name = "v1"
url = "/v1.json"

[[ui.options.urls]]
name = "v2"
url = "/v2.json"
"#,
        );
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.ui.prefix, "/api-docs");
        assert_eq!(cfg.ui.options.doc_expansion, Some(DocExpansion::Collapsed));
        assert_eq!(cfg.ui.options.filter, Some(true));
        assert_eq!(cfg.ui.options.urls.len(), 2);
        assert_eq!(cfg.ui.options.urls[1].url, "/v2.json");
        assert!(cfg.ui.options.url.is_none());
        assert!(cfg.ui.options.validate().is_ok());
    }

    #[test]
    fn spec_path_points_ui_at_spec_route() {
        let spec = spec_file();
        let f = write_toml(&format!(
            "[spec]\npath = \"{}\"\nroute = \"/api.json\"\n",
            spec.path().display()
        ));
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.spec.path.as_deref(), Some(spec.path()));
        assert_eq!(cfg.ui.options.url.as_deref(), Some("/api.json"));
    }

    #[test]
    fn explicit_url_wins_over_spec_route() {
        let spec = spec_file();
        let f = write_toml(&format!(
            "[spec]\npath = \"{}\"\n[ui.options]\nurl = \"https://example.com/api.yaml\"\n",
            spec.path().display()
        ));
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.ui.options.url.as_deref(), Some("https://example.com/api.yaml"));
    }

    #[test]
    fn missing_spec_file_errors() {
        let f = write_toml("[spec]\npath = \"/nonexistent/openapi.json\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("spec.path"));
    }

    #[test]
    fn bad_spec_route_errors() {
        let f = write_toml("[spec]\nroute = \"openapi.json\"\n");
        assert!(load_from(f.path(), &Overrides::default()).is_err());

        let f = write_toml("[spec]\nroute = \"/health\"\n");
        assert!(load_from(f.path(), &Overrides::default()).is_err());
    }

    #[test]
    fn prefix_on_health_route_errors() {
        let f = write_toml("[ui]\nprefix = \"/health/\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("ui.prefix"));
    }

    #[test]
    fn route_captures_are_rejected() {
        let f = write_toml("[spec]\nroute = \"/docs/{*rest}\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("spec.route"));

        let f = write_toml("[ui]\nprefix = \"/\"\n[spec]\nroute = \"/{*x}\"\n");
        assert!(load_from(f.path(), &Overrides::default()).is_err());

        let f = write_toml("[ui]\nprefix = \"/api/{version}\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("ui.prefix"));
    }

    #[test]
    fn spec_route_under_prefix_is_accepted() {
        let f = write_toml("[spec]\nroute = \"/docs/openapi.json\"\n");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.spec.route, "/docs/openapi.json");
    }

    #[test]
    fn unknown_log_level_errors() {
        let f = write_toml("[server]\nlog_level = \"verbose\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("verbose"));

        let f = write_toml("");
        let overrides = Overrides {
            log_level: Some("loud".into()),
            ..Default::default()
        };
        assert!(load_from(f.path(), &overrides).is_err());
    }

    #[test]
    fn log_directives_are_accepted() {
        let f = write_toml("[server]\nlog_level = \"swagger_host=debug,tower_http=warn\"\n");
        let cfg = load_from(f.path(), &Overrides::default()).unwrap();
        assert_eq!(cfg.log_level, "swagger_host=debug,tower_http=warn");
    }

    #[test]
    fn invalid_enum_value_errors() {
        let f = write_toml("[ui.options]\ndoc_expansion = \"everything\"\n");
        let err = load_from(f.path(), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("config error"));
    }

    #[test]
    fn overrides_take_precedence() {
        let spec = spec_file();
        let f = write_toml("[server]\nbind = \"0.0.0.0:9000\"\nlog_level = \"warn\"\n");
        let overrides = Overrides {
            bind: Some("127.0.0.1:0".into()),
            log_level: Some("debug".into()),
            spec_path: Some(spec.path().display().to_string()),
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:0");
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.spec.path.is_some());
    }

    #[test]
    fn overrides_with_keeps_unset_fields() {
        let env = Overrides {
            bind: Some("a".into()),
            log_level: Some("warn".into()),
            spec_path: None,
        };
        let cli = Overrides {
            bind: Some("b".into()),
            ..Default::default()
        };
        let merged = env.with(cli);
        assert_eq!(merged.bind.as_deref(), Some("b"));
        assert_eq!(merged.log_level.as_deref(), Some("warn"));
        assert!(merged.spec_path.is_none());
    }

    #[test]
    fn base_chain_merges_tables() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("base.toml"),
            "[server]\nbind = \"0.0.0.0:1\"\nlog_level = \"warn\"\n[ui.options]\nfilter = true\n",
        )
        .unwrap();
        let child = dir.path().join("child.toml");
        fs::write(
            &child,
            "[meta]\nbase = \"base.toml\"\n[server]\nbind = \"0.0.0.0:2\"\n",
        )
        .unwrap();

        let cfg = load_from(&child, &Overrides::default()).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:2");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.ui.options.filter, Some(true));
    }

    #[test]
    fn circular_base_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.toml"), "[meta]\nbase = \"b.toml\"\n").unwrap();
        fs::write(dir.path().join("b.toml"), "[meta]\nbase = \"a.toml\"\n").unwrap();
        let err = load_from(&dir.path().join("a.toml"), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), &Overrides::default());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn prefix_normalisation() {
        assert_eq!(normalize_prefix("/docs"), "/docs");
        assert_eq!(normalize_prefix("docs/"), "/docs");
        assert_eq!(normalize_prefix("/a/b/"), "/a/b");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/specs/openapi.json");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("openapi.json"));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
