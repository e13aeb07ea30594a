//! The configuration literal handed to the Swagger UI constructor.
//!
//! [`UiOptions`] serialises to the camelCase JSON object the bundle expects.
//! Anything left unset is omitted from the output, so the page only sees the
//! keys an operator actually configured (plus `dom_id`, `deepLinking` and
//! `layout`, which carry defaults).

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Layout component used by the standalone preset.
pub const STANDALONE_LAYOUT: &str = "StandaloneLayout";

/// Default DOM selector the UI mounts into. Must match the built-in page.
pub const DEFAULT_DOM_ID: &str = "#swagger-ui";

/// Controls default expansion for operations and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    /// Expand tags only.
    List,
    /// Expand tags and operations.
    Full,
    /// Expand nothing.
    #[serde(rename = "none")]
    Collapsed,
}

/// How models are shown when the API is first rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRendering {
    Example,
    Model,
}

/// HTTP methods that have "Try it out" enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

/// One entry in the document selector shown in the top bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecUrl {
    pub name: String,
    pub url: String,
}

impl SpecUrl {
    pub fn named(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl From<&str> for SpecUrl {
    fn from(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }
}

impl From<String> for SpecUrl {
    fn from(url: String) -> Self {
        Self {
            url,
            ..Default::default()
        }
    }
}

impl From<&String> for SpecUrl {
    fn from(url: &String) -> Self {
        Self::from(url.as_str())
    }
}

/// Options passed verbatim (as JSON) to `SwaggerUIBundle`.
///
/// `presets` and `plugins` are deliberately absent: the initializer script
/// appends them after spreading this object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiOptions {
    /// URL to fetch external configuration from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_url: Option<String>,

    /// Selector of the DOM element the UI renders into.
    #[serde(rename = "dom_id", skip_serializing_if = "Option::is_none")]
    pub dom_id: Option<String>,

    /// Single API document to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Multiple API documents, selectable in the top bar.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<SpecUrl>,

    /// Name of the entry in `urls` shown first.
    #[serde(rename = "urls.primaryName", skip_serializing_if = "Option::is_none")]
    pub urls_primary_name: Option<String>,

    /// Allow overriding options with query parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_config_enabled: Option<bool>,

    /// Scroll to and expand the operation named in the URL fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_linking: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_operation_id: Option<bool>,

    /// `-1` hides the models section completely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_models_expand_depth: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_expand_depth: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_rendering: Option<ModelRendering>,

    /// Show request duration (ms) for "Try it out" requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_request_duration: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_expansion: Option<DocExpansion>,

    /// Show the tag filter box in the top bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_displayed_tags: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_extensions: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_common_extensions: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub try_it_out_enabled: Option<bool>,

    /// When disabled the legacy curl snippet is shown instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_snippets_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2_redirect_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_mutated_request: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_submit_methods: Option<Vec<SubmitMethod>>,

    /// `"none"` disables document validation badges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator_url: Option<String>,

    /// Send credentials with CORS requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_credentials: Option<bool>,

    /// Keep authorization across browser refreshes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_authorization: Option<bool>,

    pub layout: String,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            config_url: None,
            dom_id: Some(DEFAULT_DOM_ID.to_string()),
            url: None,
            urls: Vec::new(),
            urls_primary_name: None,
            query_config_enabled: None,
            deep_linking: Some(true),
            display_operation_id: None,
            default_models_expand_depth: None,
            default_model_expand_depth: None,
            default_model_rendering: None,
            display_request_duration: None,
            doc_expansion: None,
            filter: None,
            max_displayed_tags: None,
            show_extensions: None,
            show_common_extensions: None,
            try_it_out_enabled: None,
            request_snippets_enabled: None,
            oauth2_redirect_url: None,
            show_mutated_request: None,
            supported_submit_methods: None,
            validator_url: None,
            with_credentials: None,
            persist_authorization: None,
            layout: STANDALONE_LAYOUT.to_string(),
        }
    }
}

impl UiOptions {
    /// Append a document to the selector list.
    pub fn push_url<U: Into<SpecUrl>>(&mut self, u: U) -> &mut Self {
        self.urls.push(u.into());
        self
    }

    /// Whether any document source is configured.
    pub fn has_source(&self) -> bool {
        self.url.is_some() || !self.urls.is_empty() || self.config_url.is_some()
    }

    /// Compact JSON object literal.
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self)
            .map_err(|e| AppError::Template(format!("cannot serialise ui options: {e}")))
    }

    /// Reject option sets the page cannot render anything from.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.layout.trim().is_empty() {
            return Err(AppError::Config("ui.options.layout must not be empty".into()));
        }
        if self.dom_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(AppError::Config("ui.options.dom_id must not be empty".into()));
        }
        if !self.has_source() {
            return Err(AppError::Config(
                "no API document configured: set spec.path, ui.options.url, ui.options.urls or ui.options.config_url"
                    .into(),
            ));
        }
        if let Some(primary) = &self.urls_primary_name {
            if !self.urls.iter().any(|u| &u.name == primary) {
                return Err(AppError::Config(format!(
                    "ui.options.urls_primary_name '{primary}' does not match any ui.options.urls entry"
                )));
            }
        }
        Ok(())
    }
}
