//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

use crate::ui::swagger::assets::DEFAULT_CDN_BASE;
use crate::ui::swagger::options::{DocExpansion, ModelRendering, SpecUrl, SubmitMethod};

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub spec: RawSpec,
    #[serde(default)]
    pub ui: RawUi,
}

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: default_log_level(),
        }
    }
}

// ── Spec document ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawSpec {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_spec_route")]
    pub route: String,
}

impl Default for RawSpec {
    fn default() -> Self {
        Self {
            path: None,
            route: default_spec_route(),
        }
    }
}

// ── UI ───────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawUi {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub dist_dir: Option<String>,
    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,
    #[serde(default)]
    pub initializer_template: Option<String>,
    #[serde(default)]
    pub options: RawUiOptions,
}

impl Default for RawUi {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            dist_dir: None,
            cdn_base: default_cdn_base(),
            initializer_template: None,
            options: RawUiOptions::default(),
        }
    }
}

/// `[ui.options]` — snake_case mirror of `UiOptions`.
#[derive(Deserialize, Default)]
pub(super) struct RawUiOptions {
    pub config_url: Option<String>,
    pub dom_id: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub urls: Vec<SpecUrl>,
    pub urls_primary_name: Option<String>,
    pub query_config_enabled: Option<bool>,
    pub deep_linking: Option<bool>,
    pub display_operation_id: Option<bool>,
    pub default_models_expand_depth: Option<i32>,
    pub default_model_expand_depth: Option<i32>,
    pub default_model_rendering: Option<ModelRendering>,
    pub display_request_duration: Option<bool>,
    pub doc_expansion: Option<DocExpansion>,
    pub filter: Option<bool>,
    pub max_displayed_tags: Option<u32>,
    pub show_extensions: Option<bool>,
    pub show_common_extensions: Option<bool>,
    pub try_it_out_enabled: Option<bool>,
    pub request_snippets_enabled: Option<bool>,
    pub oauth2_redirect_url: Option<String>,
    pub show_mutated_request: Option<bool>,
    pub supported_submit_methods: Option<Vec<SubmitMethod>>,
    pub validator_url: Option<String>,
    pub with_credentials: Option<bool>,
    pub persist_authorization: Option<bool>,
    pub layout: Option<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_spec_route() -> String {
    "/openapi.json".to_string()
}

pub(super) fn default_prefix() -> String {
    "/docs".to_string()
}

fn default_cdn_base() -> String {
    DEFAULT_CDN_BASE.to_string()
}
