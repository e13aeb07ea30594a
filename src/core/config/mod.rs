//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the file given with `-f`), then applies `SWAGGER_HOST_BIND`,
//! `SWAGGER_HOST_LOG_LEVEL`, `SWAGGER_HOST_SPEC` and CLI overrides.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `SwaggerUiConfig`, …).
//! - **raw** — Raw TOML deserialization types. These mirror the file shape
//!   and use serde defaults; kept private.
//! - **load** — Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from, normalize_prefix};
pub use types::*;

#[cfg(test)]
impl Config {
    /// `Config` for unit tests — UI pointed at the default spec route, no files.
    pub fn test_default() -> Self {
        let mut options = crate::ui::swagger::options::UiOptions::default();
        options.url = Some(raw::default_spec_route());
        Self {
            log_level: raw::default_log_level(),
            server: ServerConfig {
                bind: raw::default_bind(),
            },
            spec: SpecConfig {
                path: None,
                route: raw::default_spec_route(),
            },
            ui: SwaggerUiConfig {
                prefix: raw::default_prefix(),
                dist_dir: None,
                cdn_base: crate::ui::swagger::assets::DEFAULT_CDN_BASE.to_string(),
                initializer_template: None,
                options,
            },
        }
    }
}
