//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the server and UI backend
//! consume. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

use crate::ui::swagger::options::UiOptions;

/// Liveness route; neither the UI nor the spec document may take it.
pub const HEALTH_ROUTE: &str = "/health";

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the listener to.
    pub bind: String,
}

/// The OpenAPI document served by this host.
#[derive(Debug, Clone)]
pub struct SpecConfig {
    /// File on disk, or `None` when the UI points at external documents only.
    pub path: Option<PathBuf>,
    /// Route the document is served under, e.g. `/openapi.json`.
    pub route: String,
}

/// Swagger UI backend configuration.
#[derive(Debug, Clone)]
pub struct SwaggerUiConfig {
    /// Mount path, normalised: leading `/`, no trailing `/`; empty for root.
    pub prefix: String,
    /// Local `swagger-ui-dist` directory. When set, bundle assets come from here.
    pub dist_dir: Option<PathBuf>,
    /// Bundle location used when no dist directory is configured.
    pub cdn_base: String,
    /// Replacement for the generated initializer script.
    pub initializer_template: Option<PathBuf>,
    /// The configuration literal.
    pub options: UiOptions,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub server: ServerConfig,
    pub spec: SpecConfig,
    pub ui: SwaggerUiConfig,
}

/// Values that take precedence over the file (env vars, CLI flags).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub log_level: Option<String>,
    pub spec_path: Option<String>,
}

impl Overrides {
    /// Read `SWAGGER_HOST_BIND`, `SWAGGER_HOST_LOG_LEVEL` and `SWAGGER_HOST_SPEC`.
    pub fn from_env() -> Self {
        Self {
            bind: std::env::var("SWAGGER_HOST_BIND").ok(),
            log_level: std::env::var("SWAGGER_HOST_LOG_LEVEL").ok(),
            spec_path: std::env::var("SWAGGER_HOST_SPEC").ok(),
        }
    }

    /// Fields set in `other` replace ours.
    #[must_use]
    pub fn with(mut self, other: Overrides) -> Self {
        if other.bind.is_some() {
            self.bind = other.bind;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.spec_path.is_some() {
            self.spec_path = other.spec_path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_reads_swagger_host_vars() {
        // No other test reads these variables.
        unsafe {
            std::env::set_var("SWAGGER_HOST_BIND", "0.0.0.0:9999");
            std::env::set_var("SWAGGER_HOST_LOG_LEVEL", "debug");
            std::env::set_var("SWAGGER_HOST_SPEC", "/srv/openapi.yaml");
        }
        let env = Overrides::from_env();
        unsafe {
            std::env::remove_var("SWAGGER_HOST_BIND");
            std::env::remove_var("SWAGGER_HOST_LOG_LEVEL");
            std::env::remove_var("SWAGGER_HOST_SPEC");
        }

        assert_eq!(env.bind.as_deref(), Some("0.0.0.0:9999"));
        assert_eq!(env.log_level.as_deref(), Some("debug"));
        assert_eq!(env.spec_path.as_deref(), Some("/srv/openapi.yaml"));

        let cli = Overrides {
            spec_path: Some("api.json".into()),
            ..Default::default()
        };
        let merged = env.with(cli);
        assert_eq!(merged.bind.as_deref(), Some("0.0.0.0:9999"));
        assert_eq!(merged.spec_path.as_deref(), Some("api.json"));
    }
}
