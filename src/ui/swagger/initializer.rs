//! `swagger-initializer.js` — the page bootstrap script.
//!
//! The script runs once from `window.onload`, spreads the configuration
//! literal into a fresh object, appends the preset and plugin lists and
//! stores the constructed UI in `window.ui`. The literal is spliced in by
//! plain text substitution of [`CONFIG_TOKEN`].

use std::fmt::Write as _;

use crate::error::AppError;

use super::options::UiOptions;

/// Placeholder replaced by the JSON configuration literal.
pub const CONFIG_TOKEN: &str = "{config}";

/// Presets selected from the bundle's global tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Apis,
    Standalone,
}

impl Preset {
    pub fn js_expr(self) -> &'static str {
        match self {
            Preset::Apis => "SwaggerUIBundle.presets.apis",
            Preset::Standalone => "SwaggerUIStandalonePreset",
        }
    }
}

/// Plugins selected from the bundle's global tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    DownloadUrl,
}

impl Plugin {
    pub fn js_expr(self) -> &'static str {
        match self {
            Plugin::DownloadUrl => "SwaggerUIBundle.plugins.DownloadUrl",
        }
    }
}

/// Shape of the generated bootstrap script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub presets: Vec<Preset>,
    pub plugins: Vec<Plugin>,
}

impl Default for Initializer {
    fn default() -> Self {
        Self {
            presets: vec![Preset::Apis, Preset::Standalone],
            plugins: vec![Plugin::DownloadUrl],
        }
    }
}

impl Initializer {
    /// Script text with [`CONFIG_TOKEN`] still in place.
    pub fn template(&self) -> String {
        let mut out = String::new();
        out.push_str("window.onload = function () {\n");
        let _ = writeln!(out, "    let config = {CONFIG_TOKEN};");
        out.push_str("    window.ui = SwaggerUIBundle({\n");
        out.push_str("        ...config,\n");
        push_js_list(&mut out, "presets", self.presets.iter().map(|p| p.js_expr()));
        push_js_list(&mut out, "plugins", self.plugins.iter().map(|p| p.js_expr()));
        out.push_str("    });\n");
        out.push_str("};\n");
        out
    }

    /// Render the script for `options`.
    pub fn render(&self, options: &UiOptions) -> Result<String, AppError> {
        Ok(render(&self.template(), &options.to_json()?))
    }
}

fn push_js_list<'a>(out: &mut String, key: &str, items: impl Iterator<Item = &'a str>) {
    let _ = writeln!(out, "        {key}: [");
    for item in items {
        let _ = writeln!(out, "            {item},");
    }
    out.push_str("        ],\n");
}

/// Substitute every [`CONFIG_TOKEN`] in `template` with `config_json`.
///
/// Text without the token comes back unchanged.
pub fn render(template: &str, config_json: &str) -> String {
    template.replace(CONFIG_TOKEN, config_json)
}

/// True when `script` still carries an unsubstituted placeholder.
pub fn contains_placeholder(script: &str) -> bool {
    script.contains(CONFIG_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_runs_on_load_and_assigns_global() {
        let t = Initializer::default().template();
        assert!(t.starts_with("window.onload = function () {"));
        assert!(t.trim_end().ends_with("};"));
        assert!(t.contains("window.ui = SwaggerUIBundle({"));
        assert!(t.contains("...config,"));
        assert_eq!(t.matches(CONFIG_TOKEN).count(), 1);
    }

    #[test]
    fn template_lists_fixed_presets_and_plugins() {
        let t = Initializer::default().template();
        let presets = t.find("presets: [").unwrap();
        let plugins = t.find("plugins: [").unwrap();
        assert!(presets < plugins);

        let apis = t.find("SwaggerUIBundle.presets.apis,").unwrap();
        let standalone = t.find("SwaggerUIStandalonePreset,").unwrap();
        assert!(presets < apis && apis < standalone && standalone < plugins);
        assert!(t[plugins..].contains("SwaggerUIBundle.plugins.DownloadUrl,"));
    }

    #[test]
    fn render_substitutes_config_literal() {
        let mut options = UiOptions::default();
        options.url = Some("/openapi.json".into());
        let script = Initializer::default().render(&options).unwrap();

        assert!(!contains_placeholder(&script));
        assert!(script.contains(r##"let config = {"dom_id":"#swagger-ui","url":"/openapi.json""##));
    }

    #[test]
    fn render_replaces_every_occurrence() {
        assert_eq!(render("a {config} b {config}", "{}"), "a {} b {}");
    }

    #[test]
    fn template_without_token_passes_through() {
        let custom = "window.ui = SwaggerUIBundle({ url: '/x.json' });\n";
        assert_eq!(render(custom, r#"{"url":"/y.json"}"#), custom);
    }

    #[test]
    fn unsubstituted_template_keeps_placeholder() {
        let t = Initializer::default().template();
        assert!(contains_placeholder(&t));
        assert!(t.contains("let config = {config};"));
    }

    #[test]
    fn custom_lists_are_honoured() {
        let init = Initializer {
            presets: vec![Preset::Apis],
            plugins: vec![],
        };
        let t = init.template();
        assert!(!t.contains("SwaggerUIStandalonePreset"));
        assert!(!t.contains("DownloadUrl"));
        assert!(t.contains("plugins: [\n        ],"));
    }
}
